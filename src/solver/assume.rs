//! Assumption wrapper strategy: forces an ordered literal list at level 0,
//! one per recursive call with propagation in between, before delegating
//! to the inner strategy. An assumption contradicting the trail fails
//! immediately without consuming an inner decision.

use {
    super::SolveIF,
    crate::{engine::Engine, types::*},
};

pub struct WithAssumptions {
    inner: Box<dyn SolveIF>,
    assumptions: Vec<Lit>,
    next: usize,
}

impl WithAssumptions {
    pub fn new(inner: Box<dyn SolveIF>, assumptions: Vec<Lit>) -> WithAssumptions {
        WithAssumptions {
            inner,
            assumptions,
            next: 0,
        }
    }
}

impl SolveIF for WithAssumptions {
    fn learns_clauses(&self) -> bool {
        self.inner.learns_clauses()
    }
    fn solve(&mut self, f: &mut Engine) -> bool {
        f.propagate();
        if f.is_satisfied() {
            return true;
        }
        if f.is_conflicting() {
            return false;
        }

        let decision = if self.next < self.assumptions.len() {
            self.next += 1;
            Some(self.assumptions[self.next - 1])
        } else {
            None
        };
        match decision {
            None => self.inner.solve(f),
            Some(l) => {
                if f.lit_is_falsified(l) {
                    // earlier assumptions or propagation contradict this one
                    return false;
                }
                if f.lit_is_undefined(l) {
                    f.assume(l);
                }
                self.solve(f)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{cnf::CnfFormula, heuristic::JeroslowWang, solver::Dpll, store::AdjacencyStore},
    };

    fn run(clauses: Vec<Vec<i32>>, assumptions: Vec<i32>) -> (bool, Engine) {
        let cnf = CnfFormula::from_vec_i32(clauses).unwrap();
        let mut engine = Engine::build(
            &cnf,
            Box::new(AdjacencyStore::new(cnf.num_vars())),
            Box::new(JeroslowWang::new(cnf.num_vars())),
        );
        let mut strategy = WithAssumptions::new(
            Box::new(Dpll),
            assumptions.iter().map(|l| Lit::from(*l)).collect(),
        );
        let sat = strategy.solve(&mut engine);
        (sat, engine)
    }

    #[test]
    fn test_assumptions_restrict_a_sat_formula() {
        // (x4 v x5) keeps the formula unresolved while the assumptions are
        // consumed; the wrapper returns as soon as everything is resolved
        let clauses = vec![vec![1, 2], vec![-1, 3], vec![4, 5]];
        let (sat, _) = run(clauses.clone(), vec![]);
        assert!(sat);
        // forcing ¬x2 propagates x1 and x3, contradicting ¬x3
        let (sat, _) = run(clauses, vec![-2, -3]);
        assert!(!sat);
    }

    #[test]
    fn test_assumption_contradicting_propagation_fails_fast() {
        let (sat, engine) = run(vec![vec![1], vec![-1, 2], vec![3, 4]], vec![-2]);
        assert!(!sat);
        // the contradiction was found before any real decision
        assert_eq!(engine.stats().decisions, 0);
    }

    #[test]
    fn test_assumptions_as_level_zero_facts() {
        let (sat, engine) = run(vec![vec![1, 2, 3]], vec![-1, -2]);
        assert!(sat);
        let model = engine.model();
        assert!(model.contains(&-1));
        assert!(model.contains(&-2));
        assert!(model.contains(&3));
    }
}
