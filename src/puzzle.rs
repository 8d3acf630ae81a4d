use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::cell::{Cell, ShipLength};
use crate::error::{InvalidSpec, SpecInvalidReason};
use crate::location::{Dimension, Location};

/// A required multiset of ships: ship length to number of ships of that length.
///
/// Entries with a count of zero are never stored, so two fleets are equal exactly when they call for the same ships.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Fleet(BTreeMap<ShipLength, usize>);

impl Fleet {
    /// The usual 10x10 fleet: one carrier (5), one battleship (4), two cruisers (3), three destroyers (2) and four submarines (1).
    pub fn standard() -> Self {
        Self::from_iter([(5, 1), (4, 1), (3, 2), (2, 3), (1, 4)])
    }

    /// Add `count` ships of `length` to this fleet.
    pub fn add(&mut self, length: ShipLength, count: usize) -> &mut Self {
        if count > 0 {
            *self.0.entry(length).or_default() += count;
        }
        self
    }

    /// The number of ships of `length` required.
    pub fn count(&self, length: ShipLength) -> usize {
        self.0.get(&length).copied().unwrap_or_default()
    }

    /// `(length, count)` pairs in ascending order of length.
    pub fn iter(&self) -> impl Iterator<Item = (ShipLength, usize)> + '_ {
        self.0.iter().map(|(length, count)| (*length, *count))
    }

    /// Lengths present in this fleet, ascending.
    pub fn lengths(&self) -> impl Iterator<Item = ShipLength> + '_ {
        self.0.keys().copied()
    }

    /// Number of ships.
    pub fn ship_count(&self) -> usize {
        self.0.values().sum()
    }

    /// Number of cells the whole fleet occupies.
    pub fn total_cells(&self) -> usize {
        self.iter().map(|(length, count)| length * count).sum()
    }

    /// Whether no ships are required at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ShipLength, usize)> for Fleet {
    fn from_iter<T: IntoIterator<Item = (ShipLength, usize)>>(iter: T) -> Self {
        let mut fleet = Self::default();
        for (length, count) in iter {
            fleet.add(length, count);
        }
        fleet
    }
}

impl Display for Fleet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.iter().map(|(length, count)| format!("{length}: {count}")).join(", "))
    }
}

/// One Battleship solitaire instance: a square board, the ship cells required in every row and column,
/// revealed cells, and the fleet to place.
///
/// Build with [`Puzzle::new`] or a [`PuzzleBuilder`](crate::builder::PuzzleBuilder).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Puzzle {
    pub(crate) size: Dimension,
    pub(crate) row_tallies: Vec<usize>,
    pub(crate) col_tallies: Vec<usize>,
    pub(crate) hints: BTreeMap<Location, Cell>,
    pub(crate) fleet: Fleet,
}

impl Puzzle {
    /// Check and assemble a puzzle.
    ///
    /// Fails with every [`SpecInvalidReason`] that applies: tallies of the wrong length or with different sums,
    /// hints off the board, of [`Cell::Unknown`] or of a zero-length ship, a zero-length ship in the fleet, or a fleet larger than the board.
    pub fn new(
        size: Dimension,
        row_tallies: Vec<usize>,
        col_tallies: Vec<usize>,
        hints: BTreeMap<Location, Cell>,
        fleet: Fleet,
    ) -> Result<Self, InvalidSpec> {
        let mut reasons = Vec::new();
        let side = size.get();

        if row_tallies.len() != side {
            reasons.push(SpecInvalidReason::RowTallyLength { expected: side, found: row_tallies.len() });
        }
        if col_tallies.len() != side {
            reasons.push(SpecInvalidReason::ColumnTallyLength { expected: side, found: col_tallies.len() });
        }

        let (rows, columns) = (row_tallies.iter().sum(), col_tallies.iter().sum());
        if rows != columns {
            reasons.push(SpecInvalidReason::TallySumMismatch { rows, columns });
        }

        for (location, hint) in &hints {
            if !location.within(side) {
                reasons.push(SpecInvalidReason::HintOutOfBounds { location: *location });
            } else if *hint == Cell::Unknown {
                reasons.push(SpecInvalidReason::UnknownHint { location: *location });
            } else if *hint == (Cell::Ship { length: 0 }) {
                reasons.push(SpecInvalidReason::ZeroLengthHint { location: *location });
            }
        }

        if fleet.count(0) > 0 {
            reasons.push(SpecInvalidReason::ZeroLengthShip);
        }
        let capacity = side * side;
        if fleet.total_cells() > capacity {
            reasons.push(SpecInvalidReason::FleetTooLarge { cells: fleet.total_cells(), capacity });
        }

        if !reasons.is_empty() {
            return Err(InvalidSpec { reasons });
        }

        Ok(Self { size, row_tallies, col_tallies, hints, fleet })
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> Dimension {
        self.size
    }

    /// Ship cells required per row, top to bottom.
    pub fn row_tallies(&self) -> &[usize] {
        &self.row_tallies
    }

    /// Ship cells required per column, left to right.
    pub fn col_tallies(&self) -> &[usize] {
        &self.col_tallies
    }

    /// Revealed cells. None of them are [`Cell::Unknown`] or a ship of length 0.
    pub fn hints(&self) -> &BTreeMap<Location, Cell> {
        &self.hints
    }

    /// The ships to place.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }
}
