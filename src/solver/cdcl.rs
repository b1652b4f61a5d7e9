//! Conflict-driven clause learning with Luby restarts. Inner runs are
//! bounded by a conflict budget following the Luby series; the learned
//! database cap grows with the run index and the variable count.

use {
    super::SolveIF,
    crate::{engine::Engine, types::*},
};

pub struct Cdcl {
    luby_reset_base: usize,
    cache_run_coef: f64,
    cache_variable_coef: f64,
    luby: LubySeries,
}

impl Cdcl {
    pub fn new(luby_reset_base: usize, cache_run_coef: f64, cache_variable_coef: f64) -> Cdcl {
        Cdcl {
            luby_reset_base,
            cache_run_coef,
            cache_variable_coef,
            luby: LubySeries::default(),
        }
    }
}

impl SolveIF for Cdcl {
    fn learns_clauses(&self) -> bool {
        true
    }
    fn solve(&mut self, f: &mut Engine) -> bool {
        let mut run_index = 0usize;
        loop {
            run_index += 1;
            let max_conflicts = self.luby_reset_base * self.luby.next_unchecked();
            let max_clauses = ((run_index as f64 * self.cache_run_coef + 1.0)
                * f.num_vars() as f64
                * self.cache_variable_coef) as usize;
            let mut conflicts = 0usize;
            loop {
                if max_conflicts <= conflicts {
                    // budget exhausted: restart with learned clauses kept
                    f.backjump(0);
                    f.note_restart();
                    break;
                }
                f.propagate();
                if f.is_satisfied() {
                    return true;
                }
                if f.is_conflicting() {
                    if f.decision_level() == 0 {
                        // a conflict under nothing but level-0 facts and
                        // assumptions cannot be resolved away
                        return false;
                    }
                    conflicts += 1;
                    let analysis = f.analyze();
                    let Some(assertion_level) = analysis.assertion_level else {
                        // the empty clause: genuinely unsatisfiable
                        return false;
                    };
                    f.backjump(assertion_level);
                    f.add_learned(analysis.clause, analysis.watch_hint);
                    if max_clauses < f.num_learned() {
                        f.reduce_learned(max_clauses / 2);
                    }
                } else {
                    let next = f.pick_next_decision();
                    f.decide(next.lit);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{cnf::CnfFormula, heuristic::Vsids, store::WatchedStore},
    };

    fn run(clauses: Vec<Vec<i32>>) -> (bool, Engine) {
        let cnf = CnfFormula::from_vec_i32(clauses).unwrap();
        let mut engine = Engine::build(
            &cnf,
            Box::new(WatchedStore::new(cnf.num_vars())),
            Box::new(Vsids::new(cnf.num_vars())),
        );
        let sat = Cdcl::new(100, 0.03, 0.17).solve(&mut engine);
        (sat, engine)
    }

    #[test]
    fn test_learns_from_forced_conflict() {
        // deciding any polarity of x1 conflicts after propagation; the
        // learnt clauses are units and the formula is UNSAT
        let (sat, engine) = run(vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]]);
        assert!(!sat);
        assert!(0 < engine.stats().learned_total);
    }

    #[test]
    fn test_sat_after_learning() {
        let (sat, engine) = run(vec![
            vec![1, 2, 3],
            vec![-1, -2],
            vec![-1, -3],
            vec![-2, -3],
            vec![1, 2, -3],
        ]);
        assert!(sat);
        let model = engine.model();
        for clause in [
            vec![1, 2, 3],
            vec![-1, -2],
            vec![-1, -3],
            vec![-2, -3],
            vec![1, 2, -3],
        ] {
            assert!(clause.iter().any(|l| model.contains(l)));
        }
    }

    #[test]
    fn test_pigeonhole_unsat() {
        // 4 pigeons into 3 holes; needs real clause learning to stay small
        let mut clauses: Vec<Vec<i32>> = Vec::new();
        let hole = |p: i32, h: i32| (p - 1) * 3 + h;
        for p in 1..=4 {
            clauses.push((1..=3).map(|h| hole(p, h)).collect());
        }
        for h in 1..=3 {
            for p1 in 1..=4 {
                for p2 in (p1 + 1)..=4 {
                    clauses.push(vec![-hole(p1, h), -hole(p2, h)]);
                }
            }
        }
        let (sat, engine) = run(clauses);
        assert!(!sat);
        assert!(0 < engine.stats().learned_total);
    }

    #[test]
    fn test_never_learns_empty_clause_when_sat() {
        let (sat, engine) = run(vec![
            vec![1, 2],
            vec![-1, 3],
            vec![-3, -2, 4],
            vec![-4, 2],
        ]);
        assert!(sat);
        // every learnt clause is nonempty on a satisfiable formula
        for ci in &engine.learned {
            assert!(!engine.clause_lits(*ci).is_empty());
        }
    }
}
