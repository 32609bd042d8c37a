use triad::{best_move, Board, Card, Move, Owner};

use crate::Bot;

/// Plays like the automated opponent: the best move by one-ply lookahead,
/// first in scan order on ties.
pub struct HeuristicBot;

impl Bot for HeuristicBot {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn play_turn(&mut self, board: &Board, hand: &[Card], side: Owner) -> Option<Move> {
        best_move(board, hand, side).map(|scored| scored.mv)
    }
}
