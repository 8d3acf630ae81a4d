use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::candidate::{generate, Candidate, Occupancy};
use crate::cell::Cell;
use crate::conflict::{conflicts_with, Conflict};
use crate::error::SolverFailure;
use crate::puzzle::Puzzle;
use crate::system::{Assignment, BinarySolver, ConstraintOrigin, ConstraintSystem, LinearConstraint, Relation, Term};

/// Translate `puzzle` into a [`ConstraintSystem`] with one 0/1 variable per candidate (1 = placed).
///
/// # Constraints
/// ## Fleet
/// For every ship length, the placed candidates of that length number exactly the fleet's count.
///
/// ## Tallies
/// For every row, each placed candidate contributes one per cell it has in that row; the total is the row tally.
/// A horizontal ship in the row counts its full length, a vertical ship crossing it counts once. Columns likewise.
///
/// ## Conflicts
/// Of each conflicting pair, at most one is placed.
///
/// ## Hints
/// Let the covering set of a hinted cell be the candidates with a cell there.
/// Water: nothing in the covering set is placed.
/// Ship of length `n`: exactly one covering candidate is placed, and none of the covering candidates of another length are.
///
/// A ship hint with an empty covering set can never be satisfied, and fails with [`SolverFailure::UnreachableHint`]
/// without building anything further. Water hints with an empty covering set need no constraint.
///
/// `candidates` need not be everything [`generate`] returns: a subset works, as do candidates generated for another size.
/// Variables are numbered by candidate id, so `num_vars` is one past the highest id, and cells off this puzzle's board
/// count toward nothing.
pub fn encode(puzzle: &Puzzle, candidates: &[Candidate], conflicts: &HashSet<Conflict>) -> Result<ConstraintSystem, SolverFailure> {
    let occupancy = Occupancy::index(candidates, puzzle.size);
    encode_with(puzzle, candidates, &occupancy, conflicts)
}

fn encode_with(puzzle: &Puzzle, candidates: &[Candidate], occupancy: &Occupancy, conflicts: &HashSet<Conflict>) -> Result<ConstraintSystem, SolverFailure> {
    let size = puzzle.size.get();
    let mut constraints = Vec::new();
    let length_of: HashMap<_, _> = candidates.iter().map(|c| (c.id, c.length)).collect();

    for (length, count) in puzzle.fleet.iter() {
        constraints.push(LinearConstraint::sum_of(
            ConstraintOrigin::Fleet { length },
            candidates.iter().filter(|c| c.length == length).map(|c| c.id),
            Relation::Equal,
            count,
        ));
    }

    let mut row_terms = vec![Vec::new(); size];
    let mut col_terms = vec![Vec::new(); size];
    for candidate in candidates {
        let on_board = candidate.cells.iter().filter(|location| location.within(size)).collect_vec();
        for (row, coefficient) in on_board.iter().counts_by(|location| location.0) {
            row_terms[row].push(Term { coefficient, var: candidate.id });
        }
        for (col, coefficient) in on_board.iter().counts_by(|location| location.1) {
            col_terms[col].push(Term { coefficient, var: candidate.id });
        }
    }
    // counts_by hands back a HashMap, so restore generation order
    row_terms.iter_mut().chain(col_terms.iter_mut()).for_each(|terms| terms.sort_by_key(|term| term.var));

    for (row, terms) in row_terms.into_iter().enumerate() {
        constraints.push(LinearConstraint { origin: ConstraintOrigin::RowTally { row }, terms, relation: Relation::Equal, rhs: puzzle.row_tallies[row] });
    }
    for (col, terms) in col_terms.into_iter().enumerate() {
        constraints.push(LinearConstraint { origin: ConstraintOrigin::ColumnTally { col }, terms, relation: Relation::Equal, rhs: puzzle.col_tallies[col] });
    }

    for pair in conflicts.iter().sorted_by_key(|pair| (pair.0, pair.1)) {
        constraints.push(LinearConstraint::sum_of(ConstraintOrigin::Conflict(*pair), [pair.0, pair.1], Relation::AtMost, 1));
    }

    for (location, hint) in &puzzle.hints {
        let covering = occupancy.covering(*location);

        match hint {
            Cell::Water => {
                if !covering.is_empty() {
                    constraints.push(LinearConstraint::sum_of(ConstraintOrigin::HintWater(*location), covering.iter().copied(), Relation::Equal, 0));
                }
            }
            Cell::Ship { length } => {
                if covering.is_empty() {
                    return Err(SolverFailure::UnreachableHint { location: *location });
                }

                constraints.push(LinearConstraint::sum_of(ConstraintOrigin::HintShip(*location), covering.iter().copied(), Relation::Equal, 1));

                let wrong_length = covering.iter()
                    .copied()
                    .filter(|id| length_of.get(id) != Some(length))
                    .collect_vec();
                if !wrong_length.is_empty() {
                    constraints.push(LinearConstraint::sum_of(ConstraintOrigin::HintLength(*location), wrong_length, Relation::Equal, 0));
                }
            }
            // rejected when the puzzle was built
            Cell::Unknown => {}
        }
    }

    log::debug!("encoded {} constraints over {} variables", constraints.len(), candidates.len());

    Ok(ConstraintSystem {
        num_vars: candidates.iter().map(|c| c.id + 1).max().unwrap_or_default(),
        constraints,
    })
}

/// The candidates an assignment places, in generation order.
///
/// A value above 0.5 counts as placed, which absorbs the slack of solvers working in floating point.
pub fn extract_solution(candidates: &[Candidate], assignment: &Assignment) -> Vec<Candidate> {
    candidates.iter()
        .filter(|candidate| assignment.get(candidate.id).is_some_and(|value| *value > 0.5))
        .cloned()
        .collect_vec()
}

impl Puzzle {
    /// Solve this puzzle, deferring the search to `solver`.
    ///
    /// Returns the placed candidates in generation order, or [`SolverFailure::UnreachableHint`] before the solver runs,
    /// or whatever failure the solver reports.
    pub fn solve<S: BinarySolver + ?Sized>(&self, solver: &mut S) -> Result<Vec<Candidate>, SolverFailure> {
        let candidates = generate(self.size, &self.fleet);
        let occupancy = Occupancy::index(&candidates, self.size);
        let conflicts = conflicts_with(&candidates, &occupancy);
        let system = encode_with(self, &candidates, &occupancy, &conflicts)?;

        let assignment = solver.solve(&system).inspect_err(|failure| log::info!("puzzle not solved: {failure}"))?;
        let ships = extract_solution(&candidates, &assignment);
        log::info!("solver placed {} ships", ships.len());

        Ok(ships)
    }
}
