pub use board::*;
pub use cards::*;
pub use errors::*;
pub use game::*;
pub use hero::*;
pub use moves::*;
pub use opponent::*;
pub use rng::*;
pub use session::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod cards;
mod errors;
mod game;
mod hero;
mod moves;
mod opponent;
mod rng;
mod session;
mod visualization;
