use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::trace;
use triad::{scored_moves, Board, Card, Move, Owner};

use crate::Bot;

/// Like the heuristic bot, but picks randomly among all moves sharing the top score.
pub struct GreedyBot {
    rng: StdRng,
}

impl GreedyBot {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    fn top_choices(board: &Board, hand: &[Card], side: Owner) -> Vec<Move> {
        let mut top_choices: Vec<Move> = Vec::new();
        let mut top_score = i32::MIN;
        for scored in scored_moves(board, hand, side) {
            match scored.score.cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    top_choices.push(scored.mv);
                }
                std::cmp::Ordering::Greater => {
                    top_choices = vec![scored.mv];
                    top_score = scored.score;
                }
            }
        }
        trace!(top_score, candidates = top_choices.len(), "Greedy choices");
        top_choices
    }
}

impl Bot for GreedyBot {
    fn name(&self) -> &str {
        "greedy"
    }

    fn play_turn(&mut self, board: &Board, hand: &[Card], side: Owner) -> Option<Move> {
        Self::top_choices(board, hand, side)
            .choose(&mut self.rng)
            .copied()
    }
}
