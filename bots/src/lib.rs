mod greedy;
mod heuristic;
mod random;
pub use greedy::*;
pub use heuristic::*;
pub use random::*;

use rand::rngs::StdRng;
use rand::SeedableRng;
use triad::{Board, Card, Move, Owner};

/// A trait to simplify writing bots.
///
/// Bots run in the same process as whoever drives the match. A bot is told
/// which side it plays at the start of every match and is then asked for a
/// move whenever it's its turn and it still has cards.
pub trait Bot {
    fn name(&self) -> &str;

    fn new_game(&mut self, _side: Owner) {}

    /// Pick a card from `hand` and an empty cell. Returning `None` forfeits
    /// the game, since a side holding cards has to play one.
    fn play_turn(&mut self, board: &Board, hand: &[Card], side: Owner) -> Option<Move>;
}

/// The bots that can be selected on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum BotKind {
    /// The automated opponent of the game itself
    Heuristic,
    /// Maximizes captures, breaking ties randomly
    Greedy,
    /// Plays a uniformly random legal move
    Random,
}

impl BotKind {
    pub fn build(self, seed: u64) -> Box<dyn Bot> {
        let rng = StdRng::seed_from_u64(seed);
        match self {
            BotKind::Heuristic => Box::new(HeuristicBot),
            BotKind::Greedy => Box::new(GreedyBot::new(rng)),
            BotKind::Random => Box::new(RandomBot::new(rng)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BotKind::Heuristic => "heuristic",
            BotKind::Greedy => "greedy",
            BotKind::Random => "random",
        }
    }
}

impl std::fmt::Display for BotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All legal moves for `hand`, in hand-index then cell order.
pub fn legal_moves(board: &Board, hand: &[Card]) -> Vec<Move> {
    let empty_cells = board.empty_cells();
    (0..hand.len())
        .flat_map(|card_index| {
            empty_cells
                .into_iter()
                .map(move |cell| Move { card_index, cell })
        })
        .collect()
}
