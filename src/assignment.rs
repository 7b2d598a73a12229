use crate::formula::{Literal, Variable};
use std::fmt::{self, Display, Formatter};

/// A partial assignment over the variables `1..=num_variables`, one slot per variable.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Assignment {
    values: Vec<Option<bool>>,
}

impl Assignment {
    /// An assignment with every variable unassigned.
    pub fn new(num_variables: usize) -> Self {
        Self {
            values: vec![None; num_variables],
        }
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// Value of `variable`, `None` if unassigned. Variables without a slot read as unassigned.
    pub fn get(&self, variable: Variable) -> Option<bool> {
        variable
            .0
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .copied()
            .flatten()
    }

    /// Panics if `variable` is outside `1..=num_variables`.
    pub fn set(&mut self, variable: Variable, value: bool) {
        self.values[variable.0 - 1] = Some(value);
    }

    /// Truth value of `literal` under this assignment, `None` while its variable is unassigned.
    pub fn value_of(&self, literal: &Literal) -> Option<bool> {
        self.get(*literal.variable())
            .map(|value| value == literal.is_positive())
    }

    pub fn is_total(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Assigned variables in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, value)| value.map(|v| (Variable(i + 1), v)))
    }
}

// Rendered as `{1: 1, 2: 0}`, the form the results log has always used.
impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (Variable(x), value) in self.iter() {
            if first {
                first = false;
            } else {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", x, value as u8)?;
        }
        f.write_str("}")
    }
}
