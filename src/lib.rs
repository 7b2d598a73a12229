pub mod assignment;
pub mod formula;
pub mod plot;
pub mod report;
pub mod solver;

#[cfg(test)]
mod brute_force;

use std::time::Duration;

/// Outcome of one timed search.
///
/// When `satisfiable` is false the assignment is whatever the search left behind and means
/// nothing; only the verdict and the timing are meaningful.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub assignment: Assignment,
    pub satisfiable: bool,
    pub elapsed: Duration,
    pub stats: SearchStats,
}

impl SearchResult {
    /// Elapsed search time truncated to whole microseconds.
    pub fn elapsed_micros(&self) -> u128 {
        self.elapsed.as_micros()
    }
}

pub use assignment::Assignment;
pub use formula::{check_problems, Clause, Formula, FormulaError, InvalidProblem, Literal, Variable};
pub use solver::{clause_satisfied, solve, SearchStats, Solver};
