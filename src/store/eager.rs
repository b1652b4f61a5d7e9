//! Eager backend: binary clauses are not stored as clause objects at all.
//! Each literal's falsification is pre-compiled into a direct implication
//! list (`¬a ⇒ b` and `¬b ⇒ a`), so binary propagation is a table lookup.
//! Clauses of length ≥3 use the adjacency-list scheme. The implication
//! table is built once from a static clause set, so this backend reports
//! that it cannot accept learned clauses.

use {
    super::{adjacency::ListClause, ClauseState, StateReport, StoreIF},
    crate::{assign::Assignment, types::*},
};

pub struct EagerStore {
    shadows: Vec<Option<ListClause>>,
    occurs: Vec<Vec<ClauseIndex>>,
    /// literals implied by each literal becoming true, with the binary
    /// clause encoding the implication; indexed by literal encoding
    implications: Vec<Vec<(Lit, ClauseIndex)>>,
}

impl EagerStore {
    pub fn new(num_vars: usize) -> EagerStore {
        EagerStore {
            shadows: Vec::new(),
            occurs: vec![Vec::new(); 2 * (num_vars + 1)],
            implications: vec![Vec::new(); 2 * (num_vars + 1)],
        }
    }
    fn add_binary(&mut self, ci: ClauseIndex, lits: &[Lit]) -> ClauseState {
        // (l0 ∨ l1): ¬l0 ⇒ l1 and ¬l1 ⇒ l0
        self.implications[usize::from(!lits[0])].push((lits[1], ci));
        self.implications[usize::from(!lits[1])].push((lits[0], ci));
        ClauseState::ManagedByImplications
    }
    fn add_tracked(&mut self, ci: ClauseIndex, lits: &[Lit], asg: &Assignment) -> ClauseState {
        for l in lits {
            self.occurs[usize::from(*l)].push(ci);
        }
        let shadow = ListClause::register(lits, asg);
        let state = shadow.state();
        if self.shadows.len() <= ci {
            self.shadows.resize_with(ci + 1, || None);
        }
        self.shadows[ci] = Some(shadow);
        state
    }
}

impl StoreIF for EagerStore {
    fn add_initial_clause(
        &mut self,
        ci: ClauseIndex,
        lits: &[Lit],
        asg: &Assignment,
    ) -> ClauseState {
        if lits.len() == 2 {
            self.add_binary(ci, lits)
        } else {
            self.add_tracked(ci, lits, asg)
        }
    }
    fn add_learned_clause(
        &mut self,
        _ci: ClauseIndex,
        _lits: &[Lit],
        _hint: Option<(usize, usize)>,
        _asg: &Assignment,
    ) -> ClauseState {
        unreachable!("the eager backend cannot accept learned clauses")
    }
    fn remove_clause(&mut self, ci: ClauseIndex, _asg: &Assignment) -> ClauseState {
        if self.shadows.get(ci).is_some_and(|s| s.is_some()) {
            let shadow = self.shadows[ci].take().unwrap();
            for l in shadow.lits.iter() {
                self.occurs[usize::from(*l)].delete_unstable(|x| *x == ci);
            }
            shadow.state()
        } else {
            for list in self.implications.iter_mut() {
                list.retain(|(_, src)| *src != ci);
            }
            ClauseState::ManagedByImplications
        }
    }
    fn decide(&mut self, l: Lit, _asg: &Assignment, out: &mut Vec<StateReport>) {
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
    fn supports_learning(&self) -> bool {
        false
    }
    fn has_implications(&self) -> bool {
        true
    }
    fn implications(&self, l: Lit) -> &[(Lit, ClauseIndex)] {
        &self.implications[usize::from(l)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(v: &[i32]) -> Vec<Lit> {
        v.iter().map(|l| Lit::from(*l)).collect()
    }

    #[test]
    fn test_binary_clauses_become_implications() {
        let asg = Assignment::new(3);
        let mut store = EagerStore::new(3);
        assert_eq!(
            store.add_initial_clause(0, &lits(&[-1, 2]), &asg),
            ClauseState::ManagedByImplications
        );
        assert_eq!(
            store.add_initial_clause(1, &lits(&[1, 2, 3]), &asg),
            ClauseState::Unresolved
        );
        assert!(store.has_implications());
        assert!(!store.supports_learning());
        // deciding 1 forces 2 through the table
        assert_eq!(store.implications(Lit::from(1i32)), &[(Lit::from(2i32), 0)]);
        assert_eq!(store.implications(Lit::from(-2i32)), &[(Lit::from(-1i32), 0)]);
        assert!(store.implications(Lit::from(-1i32)).is_empty());
    }

    #[test]
    fn test_removal_drops_implications() {
        let asg = Assignment::new(2);
        let mut store = EagerStore::new(2);
        store.add_initial_clause(0, &lits(&[-1, 2]), &asg);
        assert_eq!(
            store.remove_clause(0, &asg),
            ClauseState::ManagedByImplications
        );
        assert!(store.implications(Lit::from(1i32)).is_empty());
    }
}
