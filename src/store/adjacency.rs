//! Adjacency-list backend: per clause a falsified-literal counter and a
//! satisfaction witness, per literal a list of the clauses containing it.
//! `decide`/`undo` cost is linear in the variable's clause occurrences.

use {
    super::{ClauseState, StateReport, StoreIF},
    crate::{assign::Assignment, types::*},
};

/// Shadow bookkeeping for one clause. Shared with the eager backend and
/// the short-clause decorator, which track (some of) their clauses the
/// same way.
#[derive(Clone, Debug)]
pub(crate) struct ListClause {
    pub(crate) lits: Box<[Lit]>,
    falsified: usize,
    witness: Option<Lit>,
}

impl ListClause {
    /// register the clause under the current assignment: count already
    /// falsified literals and pick the earliest-assigned satisfied literal
    /// (lowest decision order) as the witness.
    pub(crate) fn register(lits: &[Lit], asg: &Assignment) -> ListClause {
        let mut falsified = 0;
        let mut witness = None;
        let mut lowest_order = u64::MAX;
        for l in lits {
            if asg.lit_is_satisfied(*l) && asg.order(l.vi()) < lowest_order {
                lowest_order = asg.order(l.vi());
                witness = Some(*l);
            }
            if asg.lit_is_falsified(*l) {
                falsified += 1;
            }
        }
        ListClause {
            lits: lits.to_vec().into_boxed_slice(),
            falsified,
            witness,
        }
    }
    pub(crate) fn satisfy(&mut self, l: Lit) {
        if self.witness.is_none() {
            self.witness = Some(l);
        }
    }
    pub(crate) fn undo_satisfy(&mut self, l: Lit) {
        if self.witness == Some(l) {
            self.witness = None;
        }
    }
    pub(crate) fn falsify(&mut self) {
        self.falsified += 1;
        debug_assert!(self.falsified <= self.lits.len());
    }
    pub(crate) fn undo_falsify(&mut self) {
        debug_assert!(0 < self.falsified);
        self.falsified -= 1;
    }
    pub(crate) fn state(&self) -> ClauseState {
        if self.witness.is_some() {
            ClauseState::Satisfied
        } else if self.falsified == self.lits.len() {
            ClauseState::Conflict
        } else if self.falsified + 1 == self.lits.len() {
            ClauseState::Unit
        } else {
            ClauseState::Unresolved
        }
    }
    pub(crate) fn unit_literal(&self, asg: &Assignment) -> Lit {
        for l in self.lits.iter() {
            if asg.lit_is_undefined(*l) {
                return *l;
            }
        }
        panic!("unit literal requested from a non-unit clause {:?}", i32s(&self.lits));
    }
}

pub struct AdjacencyStore {
    /// shadow state per clause id; `None` for ids this backend never saw
    /// or already removed
    shadows: Vec<Option<ListClause>>,
    /// clauses containing each literal, indexed by literal encoding
    occurs: Vec<Vec<ClauseIndex>>,
}

impl AdjacencyStore {
    pub fn new(num_vars: usize) -> AdjacencyStore {
        AdjacencyStore {
            shadows: Vec::new(),
            occurs: vec![Vec::new(); 2 * (num_vars + 1)],
        }
    }
    fn slot(&mut self, ci: ClauseIndex) -> &mut Option<ListClause> {
        if self.shadows.len() <= ci {
            self.shadows.resize_with(ci + 1, || None);
        }
        &mut self.shadows[ci]
    }
    fn add(&mut self, ci: ClauseIndex, lits: &[Lit], asg: &Assignment) -> ClauseState {
        for l in lits {
            self.occurs[usize::from(*l)].push(ci);
        }
        let shadow = ListClause::register(lits, asg);
        let state = shadow.state();
        *self.slot(ci) = Some(shadow);
        state
    }
}

impl StoreIF for AdjacencyStore {
    fn add_initial_clause(
        &mut self,
        ci: ClauseIndex,
        lits: &[Lit],
        asg: &Assignment,
    ) -> ClauseState {
        self.add(ci, lits, asg)
    }
    fn add_learned_clause(
        &mut self,
        ci: ClauseIndex,
        lits: &[Lit],
        _hint: Option<(usize, usize)>,
        asg: &Assignment,
    ) -> ClauseState {
        self.add(ci, lits, asg)
    }
    fn remove_clause(&mut self, ci: ClauseIndex, _asg: &Assignment) -> ClauseState {
        let shadow = self.shadows[ci].take().expect("removing an unregistered clause");
        for l in shadow.lits.iter() {
            self.occurs[usize::from(*l)].delete_unstable(|x| *x == ci);
        }
        shadow.state()
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
    }
    fn undo(&mut self, l: Lit, _asg: &Assignment, out: &mut Vec<StateReport>) {
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
    }
    fn unit_literal(&self, ci: ClauseIndex, asg: &Assignment) -> Lit {
        self.shadows[ci]
            .as_ref()
            .expect("unit literal of an unregistered clause")
            .unit_literal(asg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_states() {
        let mut asg = Assignment::new(3);
        let mut store = AdjacencyStore::new(3);
        let c0: Vec<Lit> = [1i32, 2, 3].iter().map(|l| Lit::from(*l)).collect();
        assert_eq!(store.add_initial_clause(0, &c0, &asg), ClauseState::Unresolved);
        let mut out = Vec::new();
        asg.set(Lit::from(-1i32), 1, 1);
        store.decide(Lit::from(-1i32), &asg, &mut out);
        assert_eq!(out, vec![(0, ClauseState::Unresolved)]);
        out.clear();
        asg.set(Lit::from(-2i32), 2, 2);
        store.decide(Lit::from(-2i32), &asg, &mut out);
        assert_eq!(out, vec![(0, ClauseState::Unit)]);
        assert_eq!(store.unit_literal(0, &asg), Lit::from(3i32));
        out.clear();
        asg.set(Lit::from(-3i32), 3, 3);
        store.decide(Lit::from(-3i32), &asg, &mut out);
        assert_eq!(out, vec![(0, ClauseState::Conflict)]);
        out.clear();
        asg.unset(3);
        store.undo(Lit::from(-3i32), &asg, &mut out);
        assert_eq!(out, vec![(0, ClauseState::Unit)]);
    }

    #[test]
    fn test_witness_keeps_clause_satisfied() {
        let mut asg = Assignment::new(2);
        let mut store = AdjacencyStore::new(2);
        let c0: Vec<Lit> = [1i32, 2].iter().map(|l| Lit::from(*l)).collect();
        store.add_initial_clause(0, &c0, &asg);
        let mut out = Vec::new();
        asg.set(Lit::from(1i32), 1, 1);
        store.decide(Lit::from(1i32), &asg, &mut out);
        asg.set(Lit::from(2i32), 2, 2);
        store.decide(Lit::from(2i32), &asg, &mut out);
        out.clear();
        // undoing the second satisfier must not unsatisfy the clause
        asg.unset(2);
        store.undo(Lit::from(2i32), &asg, &mut out);
        assert_eq!(out, vec![(0, ClauseState::Satisfied)]);
        out.clear();
        asg.unset(1);
        store.undo(Lit::from(1i32), &asg, &mut out);
        assert_eq!(out, vec![(0, ClauseState::Unresolved)]);
    }
}
