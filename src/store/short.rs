//! Size-specializing decorator: clauses of length ≤2 are tracked by an
//! internal adjacency scheme, with binary clauses additionally compiled
//! into an implication table; longer clauses are forwarded to an inner
//! backend of any kind. Combines O(1) binary propagation with a
//! learning-capable inner backend.

use {
    super::{adjacency::ListClause, ClauseState, StateReport, StoreIF},
    crate::{assign::Assignment, types::*},
};

pub struct ShortClauseStore {
    inner: Box<dyn StoreIF>,
    shadows: Vec<Option<ListClause>>,
    occurs: Vec<Vec<ClauseIndex>>,
    implications: Vec<Vec<(Lit, ClauseIndex)>>,
}

impl ShortClauseStore {
    pub fn new(num_vars: usize, inner: Box<dyn StoreIF>) -> ShortClauseStore {
        ShortClauseStore {
            inner,
            shadows: Vec::new(),
            occurs: vec![Vec::new(); 2 * (num_vars + 1)],
            implications: vec![Vec::new(); 2 * (num_vars + 1)],
        }
    }
    fn is_mine(&self, ci: ClauseIndex) -> bool {
        self.shadows.get(ci).is_some_and(|s| s.is_some())
    }
    fn add_short(&mut self, ci: ClauseIndex, lits: &[Lit], asg: &Assignment) -> ClauseState {
        for l in lits {
            self.occurs[usize::from(*l)].push(ci);
        }
        let shadow = ListClause::register(lits, asg);
        let state = shadow.state();
        if self.shadows.len() <= ci {
            self.shadows.resize_with(ci + 1, || None);
        }
        self.shadows[ci] = Some(shadow);
        if lits.len() == 2 {
            self.implications[usize::from(!lits[0])].push((lits[1], ci));
            self.implications[usize::from(!lits[1])].push((lits[0], ci));
        }
        state
    }
}

impl StoreIF for ShortClauseStore {
    fn add_initial_clause(
        &mut self,
        ci: ClauseIndex,
        lits: &[Lit],
        asg: &Assignment,
    ) -> ClauseState {
        if 2 < lits.len() {
            self.inner.add_initial_clause(ci, lits, asg)
        } else {
            self.add_short(ci, lits, asg)
        }
    }
    fn add_learned_clause(
        &mut self,
        ci: ClauseIndex,
        lits: &[Lit],
        hint: Option<(usize, usize)>,
        asg: &Assignment,
    ) -> ClauseState {
        if 2 < lits.len() {
            self.inner.add_learned_clause(ci, lits, hint, asg)
        } else {
            self.add_short(ci, lits, asg)
        }
    }
    fn remove_clause(&mut self, ci: ClauseIndex, asg: &Assignment) -> ClauseState {
        if self.is_mine(ci) {
            let shadow = self.shadows[ci].take().unwrap();
            for l in shadow.lits.iter() {
                self.occurs[usize::from(*l)].delete_unstable(|x| *x == ci);
            }
            if shadow.lits.len() == 2 {
                self.implications[usize::from(!shadow.lits[0])]
                    .delete_unstable(|(_, src)| *src == ci);
                self.implications[usize::from(!shadow.lits[1])]
                    .delete_unstable(|(_, src)| *src == ci);
            }
            shadow.state()
        } else {
            self.inner.remove_clause(ci, asg)
        }
    }
    fn decide(&mut self, l: Lit, asg: &Assignment, out: &mut Vec<StateReport>) {
        for &ci in &self.occurs[usize::from(l)] {
            let shadow = self.shadows[ci].as_mut().expect("stale occurrence");
            shadow.satisfy(l);
            out.push((ci, shadow.state()));
        }
        for &ci in &self.occurs[usize::from(!l)] {
            let shadow = self.shadows[ci].as_mut().expect("stale occurrence");
            shadow.falsify();
            out.push((ci, shadow.state()));
        }
        self.inner.decide(l, asg, out);
    }
    fn undo(&mut self, l: Lit, asg: &Assignment, out: &mut Vec<StateReport>) {
        for &ci in &self.occurs[usize::from(l)] {
            let shadow = self.shadows[ci].as_mut().expect("stale occurrence");
            shadow.undo_satisfy(l);
            out.push((ci, shadow.state()));
        }
        for &ci in &self.occurs[usize::from(!l)] {
            let shadow = self.shadows[ci].as_mut().expect("stale occurrence");
            shadow.undo_falsify();
            out.push((ci, shadow.state()));
        }
        self.inner.undo(l, asg, out);
    }
    fn unit_literal(&self, ci: ClauseIndex, asg: &Assignment) -> Lit {
        if self.is_mine(ci) {
            self.shadows[ci].as_ref().unwrap().unit_literal(asg)
        } else {
            self.inner.unit_literal(ci, asg)
        }
    }
    fn supports_learning(&self) -> bool {
        self.inner.supports_learning()
    }
    fn has_implications(&self) -> bool {
        true
    }
    fn implications(&self, l: Lit) -> &[(Lit, ClauseIndex)] {
        &self.implications[usize::from(l)]
    }
}
