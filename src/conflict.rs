use std::collections::{BTreeSet, HashSet};

use unordered_pair::UnorderedPair;

use crate::candidate::{Candidate, CandidateId, Occupancy};
use crate::location::{Dimension, Location};

/// Two candidates that cannot both be placed. The lower id is always in `.0`.
pub type Conflict = UnorderedPair<CandidateId>;

/// Every pair of `candidates` that overlap or touch, orthogonally or diagonally.
///
/// Rather than comparing all pairs, each candidate's footprint (its cells grown by one in all eight directions) is looked up
/// in an [`Occupancy`] index, so the work per candidate is bounded by its footprint and how crowded those cells are.
/// A pair is only recorded from its lower id, which keeps every [`Conflict`] canonical and unique.
pub fn conflicts(candidates: &[Candidate], size: Dimension) -> HashSet<Conflict> {
    let occupancy = Occupancy::index(candidates, size);
    conflicts_with(candidates, &occupancy)
}

pub(crate) fn conflicts_with(candidates: &[Candidate], occupancy: &Occupancy) -> HashSet<Conflict> {
    let mut found = HashSet::new();

    for candidate in candidates {
        for location in footprint(candidate, occupancy.size()) {
            for &other in occupancy.covering(location) {
                if other > candidate.id {
                    found.insert(UnorderedPair(candidate.id, other));
                }
            }
        }
    }

    log::debug!("found {} incompatible pairs among {} candidates", found.len(), candidates.len());
    found
}

/// The cells of `candidate` and all of their neighbors, clipped to the board.
fn footprint(candidate: &Candidate, size: usize) -> BTreeSet<Location> {
    candidate.cells.iter()
        .flat_map(|cell| cell.surroundings(size))
        .collect()
}
