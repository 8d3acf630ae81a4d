//! A solver-neutral binary linear program: 0/1 variables, linear constraints with non-negative integer coefficients.
//!
//! [`encode`](crate::encoder::encode) produces a [`ConstraintSystem`]; anything implementing [`BinarySolver`] may answer it.

use std::fmt::{Display, Formatter};

use crate::candidate::CandidateId;
use crate::cell::ShipLength;
use crate::conflict::Conflict;
use crate::error::SolverFailure;
use crate::location::{Coord, Location};

/// Index of a 0/1 decision variable. Variable `i` stands for candidate `i`.
pub type VarIndex = usize;

/// `coefficient × variable`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Term {
    /// How many times the variable counts. Never zero in an encoded system.
    pub coefficient: usize,
    pub var: VarIndex,
}

/// How the left hand side of a [`LinearConstraint`] compares to its right hand side.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Relation {
    /// `lhs = rhs`
    Equal,
    /// `lhs ≤ rhs`
    AtMost,
    /// `lhs ≥ rhs`
    AtLeast,
}

/// The puzzle rule a constraint stands for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ConstraintOrigin {
    /// Exactly the required number of ships of `length` are placed.
    Fleet { length: ShipLength },
    /// The ship cells in `row` add up to its tally.
    RowTally { row: Coord },
    /// The ship cells in `col` add up to its tally.
    ColumnTally { col: Coord },
    /// The two candidates overlap or touch.
    Conflict(Conflict),
    /// No ship covers a cell hinted as water.
    HintWater(Location),
    /// Exactly one ship covers a cell hinted as a ship.
    HintShip(Location),
    /// The ship covering a hinted cell has the hinted length.
    HintLength(Location),
}

impl Display for ConstraintOrigin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fleet { length } => write!(f, "fleet count for length {length}"),
            Self::RowTally { row } => write!(f, "row tally {row}"),
            Self::ColumnTally { col } => write!(f, "column tally {col}"),
            Self::Conflict(pair) => write!(f, "conflict {} / {}", pair.0, pair.1),
            Self::HintWater(location) => write!(f, "water hint at {location}"),
            Self::HintShip(location) => write!(f, "ship hint at {location}"),
            Self::HintLength(location) => write!(f, "ship length hint at {location}"),
        }
    }
}

/// `Σ terms (relation) rhs`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinearConstraint {
    /// The rule this constraint encodes, for diagnostics.
    pub origin: ConstraintOrigin,
    /// Terms in ascending variable order.
    pub terms: Vec<Term>,
    pub relation: Relation,
    pub rhs: usize,
}

impl LinearConstraint {
    /// Unit-coefficient sum of `vars`.
    pub(crate) fn sum_of(origin: ConstraintOrigin, vars: impl IntoIterator<Item = CandidateId>, relation: Relation, rhs: usize) -> Self {
        Self {
            origin,
            terms: vars.into_iter().map(|var| Term { coefficient: 1, var }).collect(),
            relation,
            rhs,
        }
    }

    /// Evaluate the left hand side under a 0/1 reading of `values`; anything above one half counts as 1.
    pub fn lhs(&self, values: &[f64]) -> usize {
        self.terms.iter()
            .filter(|term| values.get(term.var).is_some_and(|value| *value > 0.5))
            .map(|term| term.coefficient)
            .sum()
    }

    /// Whether `values` satisfy this constraint under the same reading as [`Self::lhs`].
    pub fn is_satisfied_by(&self, values: &[f64]) -> bool {
        let lhs = self.lhs(values);
        match self.relation {
            Relation::Equal => lhs == self.rhs,
            Relation::AtMost => lhs <= self.rhs,
            Relation::AtLeast => lhs >= self.rhs,
        }
    }
}

/// Variables `0..num_vars` and the constraints over them. There is no objective; any feasible assignment is a solution.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConstraintSystem {
    /// Number of variables, one more than the highest candidate id encoded.
    pub num_vars: usize,
    /// In emission order: fleet, row tallies, column tallies, conflicts, hints.
    pub constraints: Vec<LinearConstraint>,
}

impl ConstraintSystem {
    /// Constraints whose origin passes `filter`.
    pub fn constraints_where<'a>(&'a self, filter: impl Fn(&ConstraintOrigin) -> bool + 'a) -> impl Iterator<Item = &'a LinearConstraint> + 'a {
        self.constraints.iter().filter(move |constraint| filter(&constraint.origin))
    }

    /// The first constraint `values` violate, if any.
    pub fn first_violation(&self, values: &[f64]) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|constraint| !constraint.is_satisfied_by(values))
    }
}

/// One value per variable, indexed by [`VarIndex`]. Exact solvers answer 0.0 or 1.0; relaxations may answer in between.
pub type Assignment = Vec<f64>;

/// Anything able to decide a [`ConstraintSystem`].
///
/// [`SatBackend`](crate::sat::SatBackend) is the built-in implementation.
pub trait BinarySolver {
    /// Find an assignment satisfying every constraint of `system`.
    ///
    /// Returns [`SolverFailure::Infeasible`] if none exists, or [`SolverFailure::Backend`] if the solver could not decide.
    fn solve(&mut self, system: &ConstraintSystem) -> Result<Assignment, SolverFailure>;
}
