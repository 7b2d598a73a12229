use crate::assignment::Assignment;
use crate::formula::{Clause, Formula, Variable};
use crate::SearchResult;
use log::{debug, trace};
use std::time::Instant;

/// Counters for one search.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct SearchStats {
    /// Total assignments checked against every clause.
    pub terminal_checks: u64,
    /// Variables set to a value, counting both branches.
    pub decisions: u64,
}

/// True iff some literal of `clause` is made true by `assignment`.
///
/// Unassigned variables satisfy nothing, so a partial assignment may report a clause as
/// unsatisfied that a later assignment would satisfy.
pub fn clause_satisfied(clause: &Clause, assignment: &Assignment) -> bool {
    clause.literals().any(|literal| assignment.value_of(literal) == Some(true))
}

/// Exhaustive backtracking search over `1..=num_variables`, trying `true` before `false`.
///
/// Clauses are only checked once every variable is assigned, so the worst case visits all
/// `2^num_variables` total assignments. The first satisfying one in that order is returned.
/// Pending branches live on a heap-allocated frame stack, so the number of variables is not
/// limited by the thread's stack size.
pub struct Solver<'f> {
    formula: &'f Formula,
    assignment: Assignment,
    stats: SearchStats,
}

impl<'f> Solver<'f> {
    pub fn new(formula: &'f Formula) -> Self {
        Self {
            formula,
            assignment: Assignment::new(formula.num_variables()),
            stats: SearchStats::default(),
        }
    }

    /// Runs the search and times it.
    pub fn solve(mut self) -> SearchResult {
        let start = Instant::now();
        let satisfiable = self.search();
        let elapsed = start.elapsed();

        debug!(
            "{} after {} terminal checks in {}us",
            if satisfiable { "sat" } else { "unsat" },
            self.stats.terminal_checks,
            elapsed.as_micros()
        );

        SearchResult {
            assignment: self.assignment,
            satisfiable,
            elapsed,
            stats: self.stats,
        }
    }

    pub fn search(&mut self) -> bool {
        let num_variables = self.formula.num_variables();
        let mut frames = Vec::with_capacity(num_variables + 1);
        frames.push(Frame {
            depth: 1,
            next: Some(true),
        });

        // Invariant: variables below a frame's depth are assigned. Entries at its depth and
        // above may hold stale values from an earlier branch; each is overwritten before it
        // is read.
        while let Some(frame) = frames.last_mut() {
            let depth = frame.depth;
            if depth > num_variables {
                frames.pop();
                if self.check() {
                    return true;
                }
                continue;
            }
            match frame.next {
                Some(value) => {
                    frame.next = if value { Some(false) } else { None };
                    trace!("x{} = {}", depth, value);
                    self.stats.decisions += 1;
                    self.assignment.set(Variable(depth), value);
                    frames.push(Frame {
                        depth: depth + 1,
                        next: Some(true),
                    });
                }
                // both values tried below this depth
                None => {
                    frames.pop();
                }
            }
        }
        false
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn check(&mut self) -> bool {
        self.stats.terminal_checks += 1;
        let assignment = &self.assignment;
        self.formula
            .clauses()
            .all(|clause| clause_satisfied(clause, assignment))
    }
}

/// One level of the search: the variable at `depth` and the value to try there next.
struct Frame {
    depth: usize,
    next: Option<bool>,
}

/// Searches `formula` with a fresh assignment, timing only the search itself.
pub fn solve(formula: &Formula) -> SearchResult {
    Solver::new(formula).solve()
}
