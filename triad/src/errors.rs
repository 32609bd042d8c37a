use crate::Owner;

/// The error type for [`Board::calculate()`](crate::Board::calculate), i.e. for placing a single card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    OutOfBounds { cell: usize },
    CellOccupied { cell: usize },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::OutOfBounds { cell } => {
                write!(f, "Cell {} is not on the 3x3 board", cell)
            }
            IllegalPlacement::CellOccupied { cell } => {
                write!(f, "Cell {} already holds a card", cell)
            }
        }
    }
}

/// The error type for one turn of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    MatchOver,
    NotYourTurn { mover: Owner },
    NoCardSelected,
    CardNotInHand { card_index: usize },
    UnknownCard { hero_id: String },
    IllegalPlacement { cell: usize, err: IllegalPlacement },
    PassWithCardsInHand { mover: Owner },
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::IllegalPlacement { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::MatchOver => write!(f, "The match is already over"),
            IllegalMove::NotYourTurn { mover } => {
                write!(f, "It is not the {}'s turn", mover)
            }
            IllegalMove::NoCardSelected => write!(f, "Select a card from your hand first"),
            IllegalMove::CardNotInHand { card_index } => {
                write!(f, "There is no card at index {} in the hand", card_index)
            }
            IllegalMove::UnknownCard { hero_id } => {
                write!(f, "The card of hero '{}' is not in the hand", hero_id)
            }
            IllegalMove::IllegalPlacement { cell, err: _ } => {
                write!(f, "Cannot place a card on cell {}", cell)
            }
            IllegalMove::PassWithCardsInHand { mover } => {
                write!(f, "The {} tried to pass while holding cards", mover)
            }
        }
    }
}

/// The error type for building a [`Roster`](crate::Roster) and dealing hands from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterError {
    EmptyHeroId,
    DuplicateHeroId(String),
    TooFewHeroes { needed: usize, available: usize },
}

impl std::error::Error for RosterError {}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::EmptyHeroId => write!(f, "A hero in the roster has an empty id"),
            RosterError::DuplicateHeroId(id) => {
                write!(f, "The hero id '{}' appears more than once in the roster", id)
            }
            RosterError::TooFewHeroes { needed, available } => write!(
                f,
                "Dealing needs {} heroes, but the roster only has {}",
                needed, available
            ),
        }
    }
}
