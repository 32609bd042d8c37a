use std::iter::FusedIterator;

use serde::{Serialize, Serializer};

use super::NUM_CELLS;

const VALID_BITS: u16 = 0b1_1111_1111;

/// A set of board cells, stored as one bit per cell.
///
/// Allows intersection, union and complement via bitwise ops.
/// Iterating yields cell indices in ascending order.
///
/// ```
/// use triad::CellSet;
/// let set = CellSet::new().insert(4).insert(1).insert(4);
/// assert_eq!(set.len(), 2);
/// assert_eq!(Vec::from_iter(set), vec![1, 4]);
/// ```
///
/// Like the other small value types of this crate, the "mutating" methods
/// return a new set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellSet {
    // Only the low 9 bits are used.
    bits: u16,
}

impl std::ops::BitAnd for CellSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl std::ops::BitOr for CellSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

/// The complement within the board's nine cells.
impl std::ops::Not for CellSet {
    type Output = Self;

    fn not(self) -> Self {
        Self {
            bits: !self.bits & VALID_BITS,
        }
    }
}

impl CellSet {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    /// All nine cells.
    pub fn full() -> Self {
        Self { bits: VALID_BITS }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, cell: usize) -> bool {
        cell < NUM_CELLS && (self.bits & (1u16 << cell)) != 0
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, cell: usize) -> Self {
        debug_assert!(cell < NUM_CELLS);
        Self {
            bits: self.bits | (1u16 << cell),
        }
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn remove(self, cell: usize) -> Self {
        debug_assert!(cell < NUM_CELLS);
        Self {
            bits: self.bits & !(1u16 << cell),
        }
    }
}

impl FromIterator<usize> for CellSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        iter.into_iter().fold(CellSet::new(), CellSet::insert)
    }
}

impl IntoIterator for CellSet {
    type Item = usize;

    type IntoIter = CellSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CellSetIter { bits: self.bits }
    }
}

/// Serialized as a list of cell indices.
impl Serialize for CellSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(*self)
    }
}

/// Iterator for a [`CellSet`] that returns cells by ascending index.
#[derive(Clone, Copy, Debug)]
pub struct CellSetIter {
    bits: u16,
}

impl Iterator for CellSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let cell = self.bits.trailing_zeros() as usize;
            self.bits ^= 1u16 << cell;
            Some(cell)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for CellSetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for CellSetIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_stays_on_the_board() {
        let set = CellSet::from_iter([0, 4, 8]);
        assert_eq!((!set).len(), 6);
        assert_eq!(!CellSet::full(), CellSet::new());
        assert_eq!(set | !set, CellSet::full());
        assert!((set & !set).is_empty());
    }

    #[test]
    fn contains_is_false_off_the_board() {
        assert!(!CellSet::full().contains(9));
        assert!(!CellSet::full().contains(100));
    }

    #[test]
    fn serializes_as_list() {
        let set = CellSet::new().insert(7).insert(2);
        assert_eq!(serde_json::to_string(&set).unwrap(), "[2,7]");
    }
}
