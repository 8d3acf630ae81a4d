use itertools::Itertools;
use varisat::{CnfFormula, ExtendFormula, Lit, Var};

use crate::system::Relation;

/// A formula under construction, along with the next free variable index.
///
/// Indices below the one given to [`Self::with_vars`] belong to the caller; auxiliary variables are handed out above them.
pub(crate) struct Cnf {
    pub(crate) formula: CnfFormula,
    next_var: usize,
}

impl Cnf {
    pub(crate) fn with_vars(reserved: usize) -> Self {
        Self { formula: CnfFormula::new(), next_var: reserved }
    }

    #[inline]
    fn fresh(&mut self) -> Var {
        self.next_var += 1;
        Var::from_index(self.next_var - 1)
    }

    #[inline]
    fn clause(&mut self, lits: impl IntoIterator<Item = Lit>) {
        // a literal may appear more than once when it carries a weight
        self.formula.add_clause(&lits.into_iter().unique().collect_vec());
    }

    pub(crate) fn var_count(&self) -> usize {
        self.next_var
    }
}

/// Constrain how many of `lits` are true, counting a literal once per appearance.
///
/// Lists up to `naive_limit` long are encoded by enumerating combinations outright; longer ones get a sequential counter.
pub(crate) fn cardinality(cnf: &mut Cnf, lits: &[Lit], relation: Relation, bound: usize, naive_limit: usize) {
    let n = lits.len();
    let (floor, ceiling) = match relation {
        Relation::Equal => (bound, Some(bound)),
        Relation::AtMost => (0, Some(bound)),
        Relation::AtLeast => (bound, None),
    };
    // at most n of n always holds
    let ceiling = ceiling.filter(|ceiling| *ceiling < n);

    if floor > n {
        cnf.clause([]);
        return;
    }
    if floor == 0 && ceiling.is_none() {
        return;
    }
    if ceiling == Some(0) {
        lits.iter().for_each(|lit| cnf.clause([!*lit]));
        return;
    }
    if floor == n {
        lits.iter().for_each(|lit| cnf.clause([*lit]));
        return;
    }

    if n <= naive_limit {
        naive(cnf, lits, floor, ceiling);
    } else {
        sequential_counter(cnf, lits, floor, ceiling);
    }
}

fn naive(cnf: &mut Cnf, lits: &[Lit], floor: usize, ceiling: Option<usize>) {
    if let Some(ceiling) = ceiling {
        // no ceiling + 1 of them are all true
        for combo in lits.iter().combinations(ceiling + 1) {
            cnf.clause(combo.into_iter().map(|lit| !*lit));
        }
    }

    if floor > 0 {
        // no n - floor + 1 of them are all false
        for combo in lits.iter().combinations(lits.len() - floor + 1) {
            cnf.clause(combo.into_iter().copied());
        }
    }
}

/// Registers `r[i][j]` hold exactly when at least `j + 1` of `lits[..=i]` are true.
///
/// Both directions of that definition are encoded, so a single counter serves the floor and the ceiling together:
/// the ceiling forbids `r[n-1][ceiling]` and the floor requires `r[n-1][floor-1]`.
fn sequential_counter(cnf: &mut Cnf, lits: &[Lit], floor: usize, ceiling: Option<usize>) {
    let n = lits.len();
    let width = ceiling.map_or(floor, |ceiling| floor.max(ceiling + 1));
    let registers = (0..n)
        .map(|_| (0..width).map(|_| cnf.fresh().positive()).collect_vec())
        .collect_vec();

    // first input: r[0][0] = x_0, nothing higher
    cnf.clause([!lits[0], registers[0][0]]);
    cnf.clause([!registers[0][0], lits[0]]);
    for j in 1..width {
        cnf.clause([!registers[0][j]]);
    }

    for i in 1..n {
        let (x, prev, here) = (lits[i], &registers[i - 1], &registers[i]);

        // r[i][0] = r[i-1][0] + x_i
        cnf.clause([!x, here[0]]);
        cnf.clause([!prev[0], here[0]]);
        cnf.clause([!here[0], prev[0], x]);

        // r[i][j] = r[i-1][j] + x_i * r[i-1][j-1]
        for j in 1..width {
            cnf.clause([!prev[j], here[j]]);
            cnf.clause([!x, !prev[j - 1], here[j]]);
            cnf.clause([!here[j], prev[j], x]);
            cnf.clause([!here[j], prev[j], prev[j - 1]]);
        }
    }

    let last = &registers[n - 1];
    if let Some(ceiling) = ceiling {
        cnf.clause([!last[ceiling]]);
    }
    if floor > 0 {
        cnf.clause([last[floor - 1]]);
    }
}
