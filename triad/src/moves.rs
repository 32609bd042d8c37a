use serde::{Deserialize, Serialize};

use crate::{CellSet, Owner};

/// Specifies which card of a hand to play, and where.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Index into the mover's hand.
    pub card_index: usize,
    /// Board cell, 0 to 8.
    pub cell: usize,
}

/// What happened when a move was applied to a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub mover: Owner,
    pub hero_id: String,
    pub cell: usize,
    /// The cells that changed owner.
    pub flipped: CellSet,
}

impl TurnReport {
    pub fn flips(&self) -> u32 {
        self.flipped.len()
    }
}

/// The one-line feedback shown to the human after a move.
impl std::fmt::Display for TurnReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.mover, self.flips()) {
            (Owner::Player, 0) => write!(f, "No flips."),
            (Owner::Player, n) => write!(f, "You flipped {}!", n),
            (Owner::Opponent, 0) => write!(f, "AI played. No flips."),
            (Owner::Opponent, n) => write!(f, "AI flipped {}.", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_lines() {
        let report = |mover, flipped: &[usize]| TurnReport {
            mover,
            hero_id: String::from("rudy"),
            cell: 4,
            flipped: flipped.iter().copied().collect(),
        };
        assert_eq!(report(Owner::Player, &[]).to_string(), "No flips.");
        assert_eq!(report(Owner::Player, &[1, 3]).to_string(), "You flipped 2!");
        assert_eq!(
            report(Owner::Opponent, &[]).to_string(),
            "AI played. No flips."
        );
        assert_eq!(report(Owner::Opponent, &[5]).to_string(), "AI flipped 1.");
    }

    #[test]
    fn move_json() {
        let mv: Move = serde_json::from_str(r#"{"card_index": 2, "cell": 8}"#).unwrap();
        assert_eq!(
            mv,
            Move {
                card_index: 2,
                cell: 8
            }
        );
    }
}
