//! Plain DPLL: recursive backtracking over the decision heuristic's
//! choices. Assumption decisions are not retried with flipped polarity.

use {
    super::SolveIF,
    crate::engine::Engine,
};

pub struct Dpll;

impl SolveIF for Dpll {
    fn solve(&mut self, f: &mut Engine) -> bool {
        f.propagate();
        if f.is_satisfied() {
            return true;
        }
        if f.is_conflicting() {
            return false;
        }
        let next = f.pick_next_decision();

        f.decide(next.lit);
        if self.solve(f) {
            return true;
        }
        f.backtrack();

        if !next.is_assumption {
            f.decide(!next.lit);
            if self.solve(f) {
                return true;
            }
            f.backtrack();
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{cnf::CnfFormula, heuristic::JeroslowWang, store::AdjacencyStore},
    };

    fn run(clauses: Vec<Vec<i32>>) -> (bool, Engine) {
        let cnf = CnfFormula::from_vec_i32(clauses).unwrap();
        let mut engine = Engine::build(
            &cnf,
            Box::new(AdjacencyStore::new(cnf.num_vars())),
            Box::new(JeroslowWang::new(cnf.num_vars())),
        );
        let sat = Dpll.solve(&mut engine);
        (sat, engine)
    }

    #[test]
    fn test_forced_assignment() {
        let (sat, engine) = run(vec![vec![1, 2, 3], vec![-1], vec![-2]]);
        assert!(sat);
        assert_eq!(engine.model(), vec![-1, -2, 3]);
    }

    #[test]
    fn test_exhaustive_unsat() {
        let (sat, _) = run(vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]]);
        assert!(!sat);
    }

    #[test]
    fn test_sat_with_backtracking() {
        let (sat, engine) = run(vec![
            vec![1, 2],
            vec![-1, 3],
            vec![-3, -2],
            vec![2, 3],
            vec![-1, -2],
        ]);
        assert!(sat);
        let model = engine.model();
        // every clause holds under the returned model
        for clause in [[1, 2], [-1, 3], [-3, -2], [2, 3], [-1, -2]] {
            assert!(clause.iter().any(|l| model.contains(l)));
        }
    }
}
