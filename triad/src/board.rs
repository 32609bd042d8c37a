mod cell_set;

pub use cell_set::*;

use serde::{Deserialize, Serialize};

use crate::{Card, Direction, IllegalPlacement};

/// The number of rows and columns of the board.
pub const BOARD_SIZE: usize = 3;
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// The two sides of a match. The `Player` is the human, or whoever moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    Player,
    Opponent,
}

impl Owner {
    pub fn other(self) -> Self {
        match self {
            Owner::Player => Owner::Opponent,
            Owner::Opponent => Owner::Player,
        }
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Owner::Player => write!(f, "player"),
            Owner::Opponent => write!(f, "opponent"),
        }
    }
}

/// An occupied cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub owner: Owner,
    pub card: Card,
}

/// Number of cells owned by each side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u8,
    pub opponent: u8,
}

impl Score {
    pub fn of(self, owner: Owner) -> u8 {
        match owner {
            Owner::Player => self.player,
            Owner::Opponent => self.opponent,
        }
    }

    /// Cells owned by `owner` minus cells owned by the other side.
    pub fn margin(self, owner: Owner) -> i32 {
        i32::from(self.of(owner)) - i32::from(self.of(owner.other()))
    }

    fn add(&mut self, owner: Owner, amount: u8) {
        match owner {
            Owner::Player => self.player += amount,
            Owner::Opponent => self.opponent += amount,
        }
    }
}

/// The orthogonal neighbours of a cell that exist on the board, in
/// north, east, south, west order, together with the direction they lie in.
pub fn neighbors(cell: usize) -> impl Iterator<Item = (Direction, usize)> {
    debug_assert!(cell < NUM_CELLS);
    let (row, col) = (cell / BOARD_SIZE, cell % BOARD_SIZE);
    [
        (row > 0).then(|| (Direction::North, cell - BOARD_SIZE)),
        (col + 1 < BOARD_SIZE).then(|| (Direction::East, cell + 1)),
        (row + 1 < BOARD_SIZE).then(|| (Direction::South, cell + BOARD_SIZE)),
        (col > 0).then(|| (Direction::West, cell - 1)),
    ]
    .into_iter()
    .flatten()
}

/// The 3x3 board. Cells are indexed 0 to 8 in row-major order.
///
/// A placed card never leaves the board, only its owner can change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Slot>; NUM_CELLS],
}

/// The planned effects of placing a card, see [`Board::calculate()`].
pub struct PlacementCalculation<'a> {
    /// This struct ties together the board and the placement, to prevent any possible mixups
    board: &'a Board,
    card: &'a Card,
    pub cell: usize,
    pub owner: Owner,
    /// The neighbours that change owner.
    pub flipped: CellSet,
}

/// A board after a placement, with the cells that were captured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub board: Board,
    pub flipped: CellSet,
}

impl Placement {
    pub fn flips(&self) -> u32 {
        self.flipped.len()
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: usize) -> Option<&Slot> {
        self.cells.get(cell).and_then(Option::as_ref)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn empty_cells(&self) -> CellSet {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(cell, _)| cell)
            .collect()
    }

    pub fn cells_owned_by(&self, owner: Owner) -> CellSet {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(|s| s.owner == owner))
            .map(|(cell, _)| cell)
            .collect()
    }

    pub fn score(&self) -> Score {
        let mut score = Score::default();
        for slot in self.cells.iter().flatten() {
            score.add(slot.owner, 1);
        }
        score
    }

    /// All cells with their contents, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&Slot>)> {
        self.cells.iter().map(Option::as_ref).enumerate()
    }

    /// Calculate placing a card and return the captures this would cause.
    ///
    /// A neighbour of the target cell is captured when it belongs to the other
    /// side and the placed card's side facing it is strictly greater than its
    /// side facing back. Captures don't chain.
    ///
    /// The returned struct has a method to actually apply the placement and
    /// get a new board. This function does not check whose turn it is or
    /// whether the card is in anyone's hand.
    pub fn calculate<'a>(
        &'a self,
        cell: usize,
        owner: Owner,
        card: &'a Card,
    ) -> Result<PlacementCalculation<'a>, IllegalPlacement> {
        if cell >= NUM_CELLS {
            return Err(IllegalPlacement::OutOfBounds { cell });
        }
        if self.cells[cell].is_some() {
            return Err(IllegalPlacement::CellOccupied { cell });
        }

        let mut flipped = CellSet::new();
        for (dir, neighbor) in neighbors(cell) {
            let Some(slot) = &self.cells[neighbor] else {
                continue;
            };
            if slot.owner == owner {
                continue;
            }
            if card.side(dir) > slot.card.side(dir.opposite()) {
                flipped = flipped.insert(neighbor);
            }
        }

        Ok(PlacementCalculation {
            board: self,
            card,
            cell,
            owner,
            flipped,
        })
    }
}

impl<'a> PlacementCalculation<'a> {
    /// The score after the placement, without building the new board.
    pub fn resulting_score(&self) -> Score {
        let mut score = self.board.score();
        let flips = self.flipped.len() as u8;
        score.add(self.owner, flips + 1);
        match self.owner.other() {
            Owner::Player => score.player -= flips,
            Owner::Opponent => score.opponent -= flips,
        }
        score
    }

    /// Neighbours that keep their owner and would beat the placed card's
    /// facing side if they were the ones being placed.
    pub fn exposed_edges(&self) -> u32 {
        let mut exposed = 0;
        for (dir, neighbor) in neighbors(self.cell) {
            if self.flipped.contains(neighbor) {
                continue;
            }
            let Some(slot) = &self.board.cells[neighbor] else {
                continue;
            };
            if slot.owner != self.owner
                && slot.card.side(dir.opposite()) > self.card.side(dir)
            {
                exposed += 1;
            }
        }
        exposed
    }

    /// Apply the placement.
    pub fn execute(self) -> Board {
        let mut cells = self.board.cells.clone();
        cells[self.cell] = Some(Slot {
            owner: self.owner,
            card: self.card.clone(),
        });
        for cell in self.flipped {
            if let Some(slot) = &mut cells[cell] {
                slot.owner = self.owner;
            }
        }
        Board { cells }
    }
}

/// Places `card` for `owner` on an empty cell and resolves captures.
///
/// This is a pure function: the given board is left untouched and the new
/// board is returned together with the captured cells.
pub fn place_card(
    board: &Board,
    cell: usize,
    owner: Owner,
    card: &Card,
) -> Result<Placement, IllegalPlacement> {
    let calculation = board.calculate(cell, owner, card)?;
    let flipped = calculation.flipped;
    Ok(Placement {
        board: calculation.execute(),
        flipped,
    })
}
