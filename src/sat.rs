use std::collections::HashSet;

use itertools::Itertools;
use varisat::{Solver, Var};

use crate::error::SolverFailure;
use crate::logic::{cardinality, Cnf};
use crate::system::{Assignment, BinarySolver, ConstraintSystem};

/// Settings for [`SatBackend`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SatConfig {
    /// Constraints over at most this many literals (counting a coefficient of `k` as `k` literals) are encoded by listing
    /// forbidden combinations; longer ones use a sequential counter.
    pub naive_limit: usize,
}

impl Default for SatConfig {
    fn default() -> Self {
        Self { naive_limit: 10 }
    }
}

impl SatConfig {
    /// Use listed combinations for constraints over up to `naive_limit` literals.
    pub fn with_naive_limit(mut self, naive_limit: usize) -> Self {
        self.naive_limit = naive_limit;
        self
    }
}

/// A [`BinarySolver`] that compiles the constraint system to CNF and hands it to [`varisat`].
///
/// Variable `i` of the system is SAT variable `i`; counters get fresh variables above those.
/// A term with coefficient `k` enters its constraint as `k` copies of the same literal.
#[derive(Clone, Debug, Default)]
pub struct SatBackend {
    config: SatConfig,
}

impl SatBackend {
    /// A backend with the default [`SatConfig`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend using `config` instead of [`SatConfig::default`].
    pub fn with_config(config: SatConfig) -> Self {
        Self { config }
    }

    /// The settings this backend compiles with.
    pub fn config(&self) -> SatConfig {
        self.config
    }

    pub(crate) fn compile(&self, system: &ConstraintSystem) -> Cnf {
        let mut cnf = Cnf::with_vars(system.num_vars);

        for constraint in &system.constraints {
            let lits = constraint.terms.iter()
                .flat_map(|term| std::iter::repeat(Var::from_index(term.var).positive()).take(term.coefficient))
                .collect_vec();
            cardinality(&mut cnf, &lits, constraint.relation, constraint.rhs, self.config.naive_limit);
        }

        log::debug!("compiled {} constraints to {} clauses over {} variables", system.constraints.len(), cnf.formula.len(), cnf.var_count());
        cnf
    }
}

impl BinarySolver for SatBackend {
    fn solve(&mut self, system: &ConstraintSystem) -> Result<Assignment, SolverFailure> {
        let cnf = self.compile(system);

        let mut solver = Solver::new();
        solver.add_formula(&cnf.formula);
        match solver.solve() {
            Ok(true) => {}
            Ok(false) => return Err(SolverFailure::Infeasible),
            Err(err) => return Err(SolverFailure::Backend(format!("{err:?}"))),
        }
        let model = solver.model().ok_or_else(|| SolverFailure::Backend("satisfiable but no model".to_string()))?;

        // variables no clause mentions may be missing from the model; those stay 0
        let placed: HashSet<usize> = model.iter()
            .filter(|lit| lit.is_positive())
            .map(|lit| lit.var().index())
            .collect();

        Ok((0..system.num_vars)
            .map(|var| if placed.contains(&var) { 1.0 } else { 0.0 })
            .collect())
    }
}
