//! Error types for every stage of the pipeline.
//!
//! None of these are fatal: building a puzzle reports [`InvalidSpec`], encoding and solving report [`SolverFailure`],
//! and validating a board reports [`ValidationFailure`]. [`Error`] wraps all of them for callers running the whole chain.

use itertools::Itertools;

use crate::location::{Coord, Location};
use crate::puzzle::Fleet;

/// One reason a puzzle description was rejected.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SpecInvalidReason {
    /// The row tallies do not have one entry per row.
    #[error("expected {expected} row tallies, found {found}")]
    RowTallyLength { expected: usize, found: usize },
    /// The column tallies do not have one entry per column.
    #[error("expected {expected} column tallies, found {found}")]
    ColumnTallyLength { expected: usize, found: usize },
    /// Rows and columns disagree on the total number of ship cells.
    #[error("row tallies sum to {rows} but column tallies sum to {columns}")]
    TallySumMismatch { rows: usize, columns: usize },
    /// A hint names a cell outside the board.
    #[error("hint at {location} is outside the board")]
    HintOutOfBounds { location: Location },
    /// A hint is neither water nor a ship.
    #[error("hint at {location} must be water or a ship")]
    UnknownHint { location: Location },
    /// A hint is a ship of length 0.
    #[error("hint at {location} is a ship of length 0")]
    ZeroLengthHint { location: Location },
    /// The fleet names a ship of length 0.
    #[error("fleet contains a ship of length 0")]
    ZeroLengthShip,
    /// The fleet would need more cells than the board has.
    #[error("fleet needs {cells} cells but the board only has {capacity}")]
    FleetTooLarge { cells: usize, capacity: usize },
}

/// A malformed puzzle, carrying every reason found.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid puzzle: {}", .reasons.iter().join("; "))]
pub struct InvalidSpec {
    /// Never empty.
    pub reasons: Vec<SpecInvalidReason>,
}

impl From<SpecInvalidReason> for InvalidSpec {
    fn from(reason: SpecInvalidReason) -> Self {
        Self { reasons: vec![reason] }
    }
}

/// Reasons encoding or solving a puzzle may fail.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SolverFailure {
    /// A hint calls for a ship on a cell no placement can cover. Detected before any solver runs.
    #[error("hint at {location} calls for a ship but no placement covers it")]
    UnreachableHint { location: Location },
    /// The solver proved no selection of placements satisfies every constraint.
    #[error("no placement of the fleet satisfies every constraint")]
    Infeasible,
    /// The solver backend itself failed.
    #[error("solver backend failed: {0}")]
    Backend(String),
}

/// Why [`Board::validate`](crate::Board::validate) rejected a grid.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationFailure {
    /// A row holds the wrong number of ship cells.
    #[error("row tally mismatch in row {row}: expected {expected}, found {found}")]
    RowTally { row: Coord, expected: usize, found: usize },
    /// A column holds the wrong number of ship cells.
    #[error("column tally mismatch in column {col}: expected {expected}, found {found}")]
    ColumnTally { col: Coord, expected: usize, found: usize },
    /// Two ship cells touch diagonally; `location` is one of them.
    #[error("diagonal touch at {location}")]
    DiagonalTouch { location: Location },
    /// The ships on the grid are not the required fleet. Bent ships are counted under length 0.
    #[error("fleet mismatch: found {found}, expected {expected}")]
    FleetMismatch { found: Fleet, expected: Fleet },
}

/// A per-cell array did not match the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("expected a {expected:?} array, found {found:?}")]
pub struct ShapeMismatch {
    /// The board's `(rows, cols)`.
    pub expected: (usize, usize),
    /// The offending array's `(rows, cols)`.
    pub found: (usize, usize),
}

/// Any failure this crate reports.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Building the puzzle failed.
    #[error(transparent)]
    InvalidSpec(#[from] InvalidSpec),
    /// Encoding or solving failed.
    #[error(transparent)]
    Solver(#[from] SolverFailure),
    /// The solved board did not validate.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    /// A per-cell model did not fit the board.
    #[error(transparent)]
    Shape(#[from] ShapeMismatch),
}
