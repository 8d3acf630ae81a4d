use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

/// A row or column index.
pub type Coord = usize;
/// Side length of a (square) board.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(row, col)` on a board. The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    #[inline]
    pub(crate) fn within(&self, size: Coord) -> bool {
        self.0 < size && self.1 < size
    }

    /// This location and its eight neighbors, dropping any that fall off a `size` × `size` board.
    pub(crate) fn surroundings(self, size: Coord) -> impl Iterator<Item = Location> {
        (-1..=1)
            .flat_map(move |dr| (-1..=1).map(move |dc| self.offset_by((dr, dc))))
            // wrapping offsets off the top/left edge land far out of bounds, so this clips both sides
            .filter(move |loc| loc.within(size))
    }

    /// Orthogonal neighbors that lie on a `size` × `size` board.
    pub(crate) fn orthogonal(self, size: Coord) -> impl Iterator<Item = Location> {
        [(0, 1), (0, -1), (1, 0), (-1, 0)].into_iter()
            .map(move |step| self.offset_by(step))
            .filter(move |loc| loc.within(size))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.0, self.1)
    }
}
