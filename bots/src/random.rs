use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use triad::{Board, Card, Move, Owner};

use crate::{legal_moves, Bot};

/// Plays any legal move, uniformly at random.
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        "random"
    }

    fn play_turn(&mut self, board: &Board, hand: &[Card], _side: Owner) -> Option<Move> {
        legal_moves(board, hand).choose(&mut self.rng).copied()
    }
}
