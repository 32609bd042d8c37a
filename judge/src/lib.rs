mod game;
mod recording;
pub use game::*;
pub use recording::*;
