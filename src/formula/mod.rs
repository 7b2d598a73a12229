pub mod csv;

use std::fmt::Debug;
use log::warn;
use std::fmt::{self, Formatter};
use thiserror::Error;

/// A propositional variable, indexed from 1.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    /// Decodes a signed literal: the magnitude is the variable, the sign its polarity.
    /// `0` is the row terminator and has no literal.
    pub fn from_dimacs(value: i64) -> Option<Self> {
        let variable = Variable(value.unsigned_abs() as usize);
        if value > 0 {
            Some(Literal::Positive(variable))
        } else if value < 0 {
            Some(Literal::Negative(variable))
        } else {
            None
        }
    }

    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormulaError {
    #[error("clause {clause} mentions variable {variable}, but only {num_variables} are declared")]
    VariableOutOfRange {
        clause: usize,
        variable: usize,
        num_variables: usize,
    },
    #[error("{declared} clauses declared, but {actual} present")]
    ClauseCountMismatch { declared: usize, actual: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("problem {index}: {source}")]
pub struct InvalidProblem {
    pub index: usize,
    pub source: FormulaError,
}

/// Validates every problem, numbering them from 1. In strict mode the first failure is
/// returned; otherwise failures are logged and the number of failing problems is returned.
pub fn check_problems(problems: &[Formula], strict: bool) -> Result<usize, InvalidProblem> {
    let mut failures = 0;
    for (i, f) in problems.iter().enumerate() {
        if let Err(source) = f.validate() {
            if strict {
                return Err(InvalidProblem {
                    index: i + 1,
                    source,
                });
            }
            warn!("problem {}: {}", i + 1, source);
            failures += 1;
        }
    }
    Ok(failures)
}

/// A CNF formula together with the variable and clause counts its header declared.
///
/// The declared counts are metadata: nothing forces them to agree with the clauses.
/// The search ranges over `1..=num_variables()` whatever the clauses mention; use
/// [`Formula::validate`] to find out whether the two disagree.
#[derive(Clone, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
    num_variables: usize,
    num_clauses: usize,
}

impl Formula {
    /// Builds a formula whose declared clause count is the number of clauses given.
    pub fn new(num_variables: usize, conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        let clauses: Vec<Clause> = conjuncts.into_iter().collect();
        let num_clauses = clauses.len();
        Self {
            clauses,
            num_variables,
            num_clauses,
        }
    }

    pub fn with_header(
        num_variables: usize,
        num_clauses: usize,
        conjuncts: impl IntoIterator<Item = Clause>,
    ) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
            num_variables,
            num_clauses,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// The clause count from the header, which may differ from `clauses().count()`.
    pub fn num_clauses(&self) -> usize {
        self.num_clauses
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Checks the declared counts against the clauses.
    pub fn validate(&self) -> Result<(), FormulaError> {
        for (idx, clause) in self.clauses.iter().enumerate() {
            if let Some(literal) = clause
                .literals()
                .find(|l| l.idx() == 0 || l.idx() > self.num_variables)
            {
                return Err(FormulaError::VariableOutOfRange {
                    clause: idx + 1,
                    variable: literal.idx(),
                    num_variables: self.num_variables,
                });
            }
        }
        if self.num_clauses != self.clauses.len() {
            return Err(FormulaError::ClauseCountMismatch {
                declared: self.num_clauses,
                actual: self.clauses.len(),
            });
        }
        Ok(())
    }
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.literals.len() > 1 {
                f.write_str("(")?;
            }
            let mut first_literal = true;
            for literal in &clause.literals {
                if first_literal {
                    first_literal = false;
                } else {
                    f.write_str(" | ")?;
                }
                match literal {
                    Literal::Positive(Variable(x)) => f.write_fmt(format_args!("{}", x))?,
                    Literal::Negative(Variable(x)) => f.write_fmt(format_args!("!{}", x))?,
                }
            }
            if clause.literals.len() > 1 {
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

/// Random formulas over at most `max_vars` variables, every literal in range.
#[cfg(test)]
pub(crate) fn formula_strategy(max_vars: usize) -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::collection::vec;
    use proptest::prelude::*;

    (1..=max_vars).prop_flat_map(|num_variables| {
        let literal = (1..=num_variables, any::<bool>()).prop_map(|(v, positive)| {
            if positive {
                Literal::Positive(Variable(v))
            } else {
                Literal::Negative(Variable(v))
            }
        });
        vec(vec(literal, 1..=3).prop_map(|literals| Clause::new(literals)), 0..12)
            .prop_map(move |clauses| Formula::new(num_variables, clauses))
    })
}
