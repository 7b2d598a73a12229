use crate::*;

// Independent enumeration over bitmasks, used to cross-check the search in tests.
// Returns the first model in the search's order: variable 1 is the most significant
// bit and a clear bit means true, so counting up visits true before false.
#[cfg(test)]
pub(crate) fn solve_brute_force(f: &Formula) -> Option<Vec<bool>> {
    let num_variables = f.num_variables();
    assert!(num_variables <= 16); // just for safety

    let assignment_for = |mask: u32, x: usize| -> Option<bool> {
        if x == 0 || x > num_variables {
            return None;
        }
        Some(mask & (1 << (num_variables - x)) == 0)
    };

    'search: for mask in 0..2u32.pow(num_variables as u32) {
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                if assignment_for(mask, literal.idx()) == Some(literal.is_positive()) {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied
        return Some(
            (1..=num_variables)
                .map(|x| mask & (1 << (num_variables - x)) == 0)
                .collect(),
        );
    }
    // no assignment is valid
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};

    #[test]
    fn brute_force_sat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let f = Formula::new(2, vec![c1, c2]);

        assert_eq!(solve_brute_force(&f), Some(vec![false, true]));
    }

    #[test]
    fn brute_force_unsat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let c3 = Clause::new(vec![n(2)]);
        let f = Formula::new(2, vec![c1, c2, c3]);

        assert_eq!(solve_brute_force(&f), None);
    }

    #[test]
    fn brute_force_prefers_true() {
        let c1 = Clause::new(vec![p(1), p(2), p(3)]);
        let c2 = Clause::new(vec![n(1), n(2), p(3)]);
        let c3 = Clause::new(vec![n(2), n(3)]);
        let f = Formula::new(3, vec![c1, c2, c3]);

        assert_eq!(solve_brute_force(&f), Some(vec![true, false, true]));
    }

    #[test]
    fn brute_force_empty() {
        assert_eq!(solve_brute_force(&Formula::new(0, vec![])), Some(vec![]));
        assert_eq!(solve_brute_force(&Formula::new(2, vec![])), Some(vec![true, true]));
    }
}
