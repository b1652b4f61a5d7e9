//! Learned-clause database management: subsumption bookkeeping on
//! insertion, removal, and periodic reduction.

use {
    super::Engine,
    crate::{store::ClauseState, types::*},
    ahash::AHashSet,
};

impl Engine {
    /// Learn a clause derived by conflict analysis. Subsumption
    /// bookkeeping runs first: a superset of an already-learned clause is
    /// redundant and discarded; learned clauses that are supersets of the
    /// new one are removed. Insertion never yields a conflicting clause
    /// when driven after backjumping to the assertion level.
    pub fn add_learned(&mut self, lits: Vec<Lit>, watch_hint: Option<(usize, usize)>) {
        self.num_learned_total += 1;
        let set: AHashSet<Lit> = lits.iter().copied().collect();
        let mut learn = true;
        let mut i = 0;
        while i < self.learned.len() {
            let cj = self.learned[i];
            let other = &self.learned_lits[&cj];
            let (subsumes, subsumed) = (set.is_subset(other), other.is_subset(&set));
            if subsumes {
                // the old clause is weaker (or equal); drop it
                self.remove_clause(cj);
                continue;
            }
            if subsumed {
                learn = false;
                break;
            }
            i += 1;
        }
        if learn {
            let ci = self.intern(lits, true);
            let state =
                self.store
                    .add_learned_clause(ci, &self.clauses[ci].lits, watch_hint, &self.asg);
            debug_assert_ne!(state, ClauseState::Conflict);
            self.register_state(ci, state);
            self.learned.push(ci);
            self.learned_lits.insert(ci, set);
        }
    }

    /// unregister a clause everywhere. Also counts reduction removals, as
    /// the subsumption counter covers both paths.
    pub fn remove_clause(&mut self, ci: ClauseIndex) {
        let state = self.store.remove_clause(ci, &self.asg);
        debug_assert_eq!(state, self.states[ci]);
        self.counts[self.states[ci] as usize] -= 1;
        self.clauses[ci].kill();
        if let Some(pos) = self.learned.iter().position(|x| *x == ci) {
            self.learned.remove(pos);
        }
        self.learned_lits.remove(&ci);
        self.num_subsumed += 1;
    }

    /// Database reduction: clauses currently serving as an antecedent are
    /// locked and kept; of the rest, the shortest `target - locked` are
    /// kept and the excess removed (shorter clauses are assumed more
    /// useful). The keep count saturates at zero rather than going
    /// negative.
    pub fn reduce_learned(&mut self, target: usize) {
        let locked: AHashSet<ClauseIndex> = self.reason.iter().flatten().copied().collect();
        let mut unlocked: Vec<ClauseIndex> = self
            .learned
            .iter()
            .copied()
            .filter(|ci| !locked.contains(ci))
            .collect();
        let locked_count = self.learned.len() - unlocked.len();
        unlocked.sort_by_key(|ci| self.clauses[*ci].len());
        let keep = target.saturating_sub(locked_count);
        for ci in unlocked.split_off(keep.min(unlocked.len())) {
            self.remove_clause(ci);
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{cnf::CnfFormula, engine::Engine, heuristic::RandomDecide, store::WatchedStore},
    };

    fn lits(v: &[i32]) -> Vec<Lit> {
        v.iter().map(|l| Lit::from(*l)).collect()
    }

    fn engine(clauses: Vec<Vec<i32>>, num_vars: usize) -> Engine {
        let mut cnf = CnfFormula::from_vec_i32(clauses).unwrap();
        cnf.num_vars = cnf.num_vars.max(num_vars);
        Engine::build(
            &cnf,
            Box::new(WatchedStore::new(cnf.num_vars())),
            Box::new(RandomDecide::default()),
        )
    }

    /// Learning B ⊆ A must remove A and keep B; learning C ⊇ D must be
    /// rejected and leave D intact.
    #[test]
    fn test_subsumption_law() {
        let mut e = engine(vec![vec![1, 2, 3, 4]], 5);
        e.add_learned(lits(&[1, 2, 3]), None);
        assert_eq!(e.num_learned(), 1);
        // a subset supersedes the longer clause
        e.add_learned(lits(&[1, 2]), None);
        assert_eq!(e.num_learned(), 1);
        assert_eq!(e.clause_lits(e.learned[0]), &lits(&[1, 2])[..]);
        // a superset is redundant
        e.add_learned(lits(&[1, 2, 5]), None);
        assert_eq!(e.num_learned(), 1);
        assert_eq!(e.clause_lits(e.learned[0]), &lits(&[1, 2])[..]);
        assert_eq!(e.stats().learned_total, 3);
        assert_eq!(e.stats().subsumption_removed, 1);
    }

    #[test]
    fn test_reduction_keeps_shortest_and_locked() {
        let mut e = engine(vec![vec![1, 2, 3, 4, 5, 6]], 6);
        e.add_learned(lits(&[1, 2, 3, 4]), None);
        e.add_learned(lits(&[2, 3, 4, 5]), None);
        e.add_learned(lits(&[3, 4, 5]), None);
        e.add_learned(lits(&[-1, -2, -3, -4, -5]), None);
        assert_eq!(e.num_learned(), 4);
        e.reduce_learned(2);
        // the two shortest unlocked clauses survive
        assert_eq!(e.num_learned(), 2);
        let survivors: Vec<usize> = e.learned.iter().map(|ci| e.clause_lits(*ci).len()).collect();
        assert!(survivors.contains(&3));
        assert!(survivors.contains(&4));
    }

    #[test]
    fn test_reduction_locks_antecedents() {
        let mut e = engine(vec![vec![1, 2]], 4);
        // force var 3 through a learned clause so the clause is locked
        e.add_learned(lits(&[3, 4]), None);
        e.decide(Lit::from(-4i32));
        e.propagate();
        assert_eq!(e.var_value(3), Some(true));
        e.add_learned(lits(&[1, 2, 3]), None);
        e.reduce_learned(0);
        // the antecedent of var 3 must survive even with a zero target
        assert_eq!(e.num_learned(), 1);
        assert_eq!(e.clause_lits(e.learned[0]), &lits(&[3, 4])[..]);
    }
}
