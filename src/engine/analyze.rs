//! First-UIP conflict analysis by iterated resolution on the recorded
//! conflict witness.

use {
    super::Engine,
    crate::types::*,
    ahash::AHashSet,
};

/// Output of conflict analysis. The clause is sorted by descending
/// decision level (recency as tie-break): index 0 holds the asserting
/// literal, index 1 the assertion-level literal.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub clause: Vec<Lit>,
    /// the level to backjump to; `None` when the empty clause was derived,
    /// i.e. the formula is unsatisfiable
    pub assertion_level: Option<DecisionLevel>,
    /// watch positions for the backend, present when the clause has two
    /// or more literals
    pub watch_hint: Option<(usize, usize)>,
}

impl Engine {
    /// Resolve backwards from the conflict witness until only one literal
    /// of the current decision level remains (the first unique implication
    /// point). Every variable touched along the way is reported to the
    /// decision heuristic.
    pub fn analyze(&mut self) -> Analysis {
        let seed = self
            .conflict_witness()
            .unwrap_or_else(|| panic!("conflict analysis invoked with no recorded conflict witness"));
        let mut clause: AHashSet<Lit> = self.clauses[seed].lits.iter().copied().collect();
        let mut involved: AHashSet<VarId> = AHashSet::new();
        let current = self.decision_level();
        loop {
            // the most recently assigned literal of the current level that
            // still has an antecedent; recency wins ties
            let mut pivot: Option<Lit> = None;
            for l in clause.iter() {
                involved.insert(l.vi());
                if self.asg.level(l.vi()) == current && self.reason[l.vi()].is_some() {
                    if pivot.map_or(true, |p| self.asg.order(p.vi()) < self.asg.order(l.vi())) {
                        pivot = Some(*l);
                    }
                }
            }
            let Some(p) = pivot else { break };
            let ante = self.reason[p.vi()].expect("pivot lost its antecedent");
            for l in self.clauses[ante].lits.iter() {
                debug_assert!(*l != p);
                if clause.contains(&!*l) {
                    clause.remove(&!*l);
                } else {
                    clause.insert(*l);
                }
            }
        }
        let mut vars: Vec<VarId> = involved.into_iter().collect();
        vars.sort_unstable();
        self.heuristic.on_conflict(&vars);

        if clause.is_empty() {
            return Analysis {
                clause: Vec::new(),
                assertion_level: None,
                watch_hint: None,
            };
        }
        let mut lits: Vec<Lit> = clause.into_iter().collect();
        if lits.len() == 1 {
            return Analysis {
                clause: lits,
                assertion_level: Some(0),
                watch_hint: None,
            };
        }
        lits.sort_by(|a, b| {
            (self.asg.level(b.vi()), self.asg.order(b.vi()))
                .cmp(&(self.asg.level(a.vi()), self.asg.order(a.vi())))
        });
        let assertion_level = self.asg.level(lits[1].vi());
        Analysis {
            clause: lits,
            assertion_level: Some(assertion_level),
            watch_hint: Some((0, 1)),
        }
    }

    pub(crate) fn conflict_witness(&self) -> Option<ClauseIndex> {
        self.conflict.or(self.bcp_conflict)
    }
}
