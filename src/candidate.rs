use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;

use crate::cell::ShipLength;
use crate::location::{Coord, Dimension, Location};
use crate::puzzle::Fleet;

/// Dense index of a [`Candidate`] in the sequence produced by [`generate`].
pub type CandidateId = usize;

/// The axis a ship runs along.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Orientation {
    /// Left to right from the anchor.
    Horizontal,
    /// Top to bottom from the anchor.
    Vertical,
}

impl Orientation {
    #[inline]
    fn step(&self) -> (isize, isize) {
        match self {
            Self::Horizontal => (0, 1),
            Self::Vertical => (1, 0),
        }
    }
}

/// One possible placement of one ship.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Candidate {
    /// Position in the output of [`generate`], and the index of this candidate's variable.
    pub id: CandidateId,
    pub length: ShipLength,
    /// Always [`Orientation::Horizontal`] for ships of length 1.
    pub orientation: Orientation,
    /// The top or leftmost cell.
    pub anchor: Location,
    /// Occupied cells, starting at `anchor`.
    pub cells: Vec<Location>,
}

impl Candidate {
    fn new(id: CandidateId, length: ShipLength, orientation: Orientation, anchor: Location) -> Self {
        let cells = (0..length as isize)
            .map(|k| {
                let (dr, dc) = orientation.step();
                anchor.offset_by((dr * k, dc * k))
            })
            .collect_vec();

        Self { id, length, orientation, anchor, cells }
    }

    /// Whether this placement covers `location`.
    pub fn covers(&self, location: Location) -> bool {
        // cells are contiguous along one axis, so a range check does it
        match self.orientation {
            Orientation::Horizontal => location.0 == self.anchor.0 && (self.anchor.1..self.anchor.1 + self.length).contains(&location.1),
            Orientation::Vertical => location.1 == self.anchor.1 && (self.anchor.0..self.anchor.0 + self.length).contains(&location.0),
        }
    }
}

/// Every placement of every ship length in `fleet` on a `size` × `size` board.
///
/// Lengths are visited in ascending order. For each, horizontal placements come first in row-major order of their anchors,
/// then vertical placements in column-major order. Ships of length 1 get no vertical placements, which would only duplicate
/// the horizontal ones. Ids are assigned densely from 0 in that order, so the same inputs always give the same ids.
///
/// Lengths that do not fit on the board produce no placements.
pub fn generate(size: Dimension, fleet: &Fleet) -> Vec<Candidate> {
    let size = size.get();
    let mut candidates = Vec::new();

    for length in fleet.lengths() {
        if length == 0 || length > size {
            continue;
        }
        let free = size - length + 1;

        for orientation in Orientation::VARIANTS {
            if *orientation == Orientation::Vertical && length == 1 {
                continue;
            }

            let anchors: Vec<Location> = match orientation {
                Orientation::Horizontal => (0..size).cartesian_product(0..free).map(|(r, c)| Location(r, c)).collect(),
                Orientation::Vertical => (0..size).cartesian_product(0..free).map(|(c, r)| Location(r, c)).collect(),
            };

            for anchor in anchors {
                candidates.push(Candidate::new(candidates.len(), length, *orientation, anchor));
            }
        }
    }

    log::debug!("generated {} candidates for fleet {} on a {}x{} board", candidates.len(), fleet, size, size);
    candidates
}

/// Index from each cell of the board to the candidates covering it.
#[derive(Clone, Debug)]
pub struct Occupancy {
    cells: Array2<Vec<CandidateId>>,
}

impl Occupancy {
    /// Build the index for `candidates` on a `size` × `size` board.
    pub fn index(candidates: &[Candidate], size: Dimension) -> Self {
        let mut cells = Array2::from_shape_simple_fn((size.get(), size.get()), Vec::new);

        for candidate in candidates {
            for location in &candidate.cells {
                if let Some(ids) = cells.get_mut(location.as_index()) {
                    ids.push(candidate.id);
                }
            }
        }

        Self { cells }
    }

    /// Ids of candidates covering `location`, ascending. Empty for locations off the board.
    pub fn covering(&self, location: Location) -> &[CandidateId] {
        self.cells.get(location.as_index()).map(Vec::as_slice).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn size(&self) -> Coord {
        self.cells.nrows()
    }
}
