#![warn(missing_docs)]

//! # `broadside`
//!
//! Encoding and checking for [Battleship solitaire](https://en.wikipedia.org/wiki/Battleship_(puzzle)) (also "Bimaru"):
//! given how many ship cells lie in each row and column, a few revealed cells and the fleet to place,
//! find straight ships that never touch, not even diagonally, and match every count.
//!
//! Describe a puzzle with a [`PuzzleBuilder`](builder::PuzzleBuilder), then call [`solve()`](crate::Puzzle::solve) with any
//! [`BinarySolver`], such as the bundled [`SatBackend`]. Lay the result out on a [`Board`] and
//! [`validate()`](crate::Board::validate) it, or let [`solve_board()`](crate::Puzzle::solve_board) do all of that.
//!
//! # Internals
//! Solving follows the ship-based formulation: rather than deciding cell by cell, we list every way each ship length
//! could sit on the board and choose among those placements.
//!
//! 1. [`generate`] lists every horizontal and vertical placement of every ship length as a [`Candidate`] with a dense id.
//! 2. [`conflicts`] finds the pairs of candidates that overlap or touch. Each candidate's cells, grown by one in every direction,
//!    are looked up in an index of which candidates cover which cell, so no all-pairs comparison is needed.
//! 3. [`encode`] states the puzzle as a [`ConstraintSystem`] with one 0/1 variable per candidate: fleet counts, weighted row and
//!    column tallies, at most one of each conflicting pair, and the hints.
//! 4. A [`BinarySolver`] picks the placements. [`SatBackend`] compiles the linear constraints to CNF with cardinality encodings
//!    and asks [`varisat`]; any other 0/1 integer programming backend can stand in for it.
//!
//! Since every constraint is an equality or a bound with no objective, any feasible answer is a solution.
//!
//! [`Board::validate`] does not trust any of this. It recounts the tallies, scans for diagonal contact and recovers the ships
//! from the raw grid by flood fill before comparing them to the fleet.

pub use board::Board;
pub use builder::PuzzleBuilder;
pub use candidate::{generate, Candidate, CandidateId, Occupancy, Orientation};
pub use cell::{Cell, ShipLength};
pub use conflict::{conflicts, Conflict};
pub use encoder::{encode, extract_solution};
pub use error::{Error, InvalidSpec, ShapeMismatch, SolverFailure, SpecInvalidReason, ValidationFailure};
pub use location::{Coord, Dimension, Location};
pub use puzzle::{Fleet, Puzzle};
pub use sat::{SatBackend, SatConfig};
pub use system::{Assignment, BinarySolver, ConstraintOrigin, ConstraintSystem, LinearConstraint, Relation, Term, VarIndex};

pub(crate) mod board;
pub mod builder;
pub(crate) mod candidate;
pub(crate) mod cell;
pub(crate) mod conflict;
pub(crate) mod encoder;
pub mod error;
pub(crate) mod location;
pub(crate) mod logic;
pub(crate) mod puzzle;
pub mod sat;
pub mod system;
mod validate;
