use tracing::{debug, trace};

use crate::{Board, Card, Move, Owner, PlacementCalculation};

const FLIP_WEIGHT: i32 = 10;
const MARGIN_WEIGHT: i32 = 3;
const EXPOSURE_WEIGHT: i32 = 2;

/// A candidate move together with its heuristic value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// The heuristic value of a placement for the placing side:
/// `flips * 10 + (own cells - other cells) * 3 - exposed edges * 2`,
/// all measured after the placement.
pub fn heuristic_score(calculation: &PlacementCalculation<'_>) -> i32 {
    let flips = calculation.flipped.len() as i32;
    let margin = calculation.resulting_score().margin(calculation.owner);
    let exposed = calculation.exposed_edges() as i32;
    flips * FLIP_WEIGHT + margin * MARGIN_WEIGHT - exposed * EXPOSURE_WEIGHT
}

/// Every legal move for `hand`, scored, in hand-index then cell-index order.
pub fn scored_moves<'a>(
    board: &'a Board,
    hand: &'a [Card],
    mover: Owner,
) -> impl Iterator<Item = ScoredMove> + 'a {
    let empty_cells = board.empty_cells();
    hand.iter()
        .enumerate()
        .flat_map(move |(card_index, card)| {
            empty_cells.into_iter().filter_map(move |cell| {
                let calculation = board.calculate(cell, mover, card).ok()?;
                Some(ScoredMove {
                    mv: Move { card_index, cell },
                    score: heuristic_score(&calculation),
                })
            })
        })
}

/// The highest scoring move for `mover`, or `None` if there is no legal move.
///
/// This only looks one placement ahead: the other side's reply is not
/// considered. Among equally scored moves, the first one in
/// [`scored_moves()`] order wins, so lower hand indices and lower cells are preferred.
pub fn best_move(board: &Board, hand: &[Card], mover: Owner) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;
    for candidate in scored_moves(board, hand, mover) {
        trace!(mv = ?candidate.mv, score = candidate.score, "Evaluated move");
        if best.map_or(true, |b| candidate.score > b.score) {
            debug!(mv = ?candidate.mv, score = candidate.score, "New best move");
            best = Some(candidate);
        }
    }
    best
}

/// The automated opponent: picks which card of its hand to play, and where.
///
/// Deterministic for identical inputs. Returns `None` when the hand is empty
/// or the board is full.
pub fn choose_opponent_move(board: &Board, opponent_hand: &[Card]) -> Option<Move> {
    best_move(board, opponent_hand, Owner::Opponent).map(|scored| scored.mv)
}
