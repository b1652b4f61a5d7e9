//! Module `engine` implements the formula state machine: the assignment
//! trail with decision levels, per-state clause buckets, unit propagation
//! (with transitive binary-implication closure when the backend carries an
//! implication table), backtracking, conflict analysis and the learned
//! clause database.

/// first-UIP conflict analysis
mod analyze;
/// clause container
mod clause;
/// learned-clause registry: subsumption and database reduction
mod db;

pub use self::{
    analyze::Analysis,
    clause::{Clause, ClauseFlag},
};

use {
    crate::{
        assign::Assignment,
        cnf::CnfFormula,
        heuristic::{DecideIF, NextDecision},
        state::Stats,
        store::{ClauseState, StateReport, StoreIF},
        types::*,
    },
    ahash::{AHashMap, AHashSet},
    std::collections::VecDeque,
};

/// Effective lengths of all live, unsatisfied clauses plus the assignment
/// they were measured under. Consumed by the look-ahead strategy for
/// autarky detection and difference-heuristic scoring.
#[derive(Clone, Debug)]
pub struct LengthSnapshot {
    pub lengths: AHashMap<ClauseIndex, usize>,
    pub values: Vec<Option<bool>>,
}

/// The formula state machine. Owns the clause arena, the trail, the
/// assignment table, the antecedent map and the learned-clause registry;
/// composes one clause-state backend and one decision heuristic.
pub struct Engine {
    pub(crate) clauses: Vec<Clause>,
    pub(crate) states: Vec<ClauseState>,
    /// clause count per state, indexed by `ClauseState as usize`
    counts: [usize; 5],
    /// record of assignment; level boundaries in `trail_lim`
    trail: Vec<Lit>,
    trail_lim: Vec<usize>,
    pub(crate) asg: Assignment,
    /// the clause that forced each variable; `None` for decisions and
    /// assumptions
    pub(crate) reason: Vec<Option<ClauseIndex>>,
    /// monotone decide/propagate counter for recency tie-breaks
    tick: u64,
    store: Box<dyn StoreIF>,
    pub(crate) heuristic: Box<dyn DecideIF>,
    unit_queue: VecDeque<ClauseIndex>,
    bcp_queue: VecDeque<Lit>,
    /// first clause reported `Conflict`, cleared when it leaves that state
    conflict: Option<ClauseIndex>,
    /// a falsified implication found during BCP, tracked separately from
    /// clause-object conflicts
    bcp_conflict: Option<ClauseIndex>,
    pub(crate) learned: Vec<ClauseIndex>,
    pub(crate) learned_lits: AHashMap<ClauseIndex, AHashSet<Lit>>,
    reports: Vec<StateReport>,
    // statistics
    num_decision: u64,
    num_propagation: u64,
    num_checked_clauses: u64,
    pub(crate) num_subsumed: u64,
    pub(crate) num_learned_total: u64,
    num_restart: u64,
}

impl Engine {
    /// Load a CNF into a fresh engine over the given backend and decision
    /// heuristic.
    pub fn build(
        cnf: &CnfFormula,
        store: Box<dyn StoreIF>,
        heuristic: Box<dyn DecideIF>,
    ) -> Engine {
        let num_vars = cnf.num_vars();
        let mut engine = Engine {
            clauses: Vec::with_capacity(cnf.num_clauses()),
            states: Vec::with_capacity(cnf.num_clauses()),
            counts: [0; 5],
            trail: Vec::with_capacity(num_vars),
            trail_lim: Vec::new(),
            asg: Assignment::new(num_vars),
            reason: vec![None; num_vars + 1],
            tick: 0,
            store,
            heuristic,
            unit_queue: VecDeque::new(),
            bcp_queue: VecDeque::new(),
            conflict: None,
            bcp_conflict: None,
            learned: Vec::new(),
            learned_lits: AHashMap::new(),
            reports: Vec::new(),
            num_decision: 0,
            num_propagation: 0,
            num_checked_clauses: 0,
            num_subsumed: 0,
            num_learned_total: 0,
            num_restart: 0,
        };
        for c in &cnf.clauses {
            let lits: Vec<Lit> = c.iter().map(|l| Lit::from(*l)).collect();
            let ci = engine.intern(lits, false);
            let state = engine
                .store
                .add_initial_clause(ci, &engine.clauses[ci].lits, &engine.asg);
            engine.register_state(ci, state);
            engine.heuristic.add_initial_clause(&engine.clauses[ci].lits);
        }
        engine
    }

    pub fn num_vars(&self) -> usize {
        self.asg.num_vars()
    }
    #[inline]
    pub fn decision_level(&self) -> DecisionLevel {
        self.trail_lim.len()
    }
    pub fn var_value(&self, vi: VarId) -> Option<bool> {
        self.asg.var_value(vi)
    }
    pub fn lit_is_satisfied(&self, l: Lit) -> bool {
        self.asg.lit_is_satisfied(l)
    }
    pub fn lit_is_falsified(&self, l: Lit) -> bool {
        self.asg.lit_is_falsified(l)
    }
    pub fn lit_is_undefined(&self, l: Lit) -> bool {
        self.asg.lit_is_undefined(l)
    }
    pub fn clause_lits(&self, ci: ClauseIndex) -> &[Lit] {
        &self.clauses[ci].lits
    }
    pub fn num_learned(&self) -> usize {
        self.learned.len()
    }
    pub fn supports_learning(&self) -> bool {
        self.store.supports_learning()
    }
    /// assigned variables as signed indices; undefined ones are excluded
    pub fn model(&self) -> Vec<i32> {
        self.asg.model()
    }

    /// The formula is satisfied: no unresolved, unit or conflicting clause
    /// remains. Clauses folded into an implication table carry no bucket;
    /// they are known satisfied only once every variable is assigned and
    /// the conflict-free BCP closure has run, so their presence demands a
    /// complete assignment.
    pub fn is_satisfied(&self) -> bool {
        self.counts[ClauseState::Unresolved as usize] == 0
            && self.counts[ClauseState::Unit as usize] == 0
            && self.counts[ClauseState::Conflict as usize] == 0
            && self.bcp_conflict.is_none()
            && (self.counts[ClauseState::ManagedByImplications as usize] == 0
                || self.trail.len() == self.num_vars())
    }
    pub fn is_conflicting(&self) -> bool {
        self.conflict.is_some() || self.bcp_conflict.is_some()
    }

    /// ask the decision heuristic for the next branching literal.
    pub fn pick_next_decision(&mut self) -> NextDecision {
        self.heuristic.next_decision(&self.asg)
    }

    /// open a new decision level and make `l` true.
    pub fn decide(&mut self, l: Lit) {
        self.trail_lim.push(self.trail.len());
        self.tick += 1;
        self.asg.set(l, self.decision_level(), self.tick);
        self.trail.push(l);
        self.num_decision += 1;
        self.store.decide(l, &self.asg, &mut self.reports);
        self.apply_reports();
        if self.store.has_implications() {
            self.bcp_queue.push_back(l);
        }
    }

    /// force `l` at level 0 (an external assumption). Exempt from the
    /// polarity-flip retry of plain backtracking search.
    pub fn assume(&mut self, l: Lit) {
        debug_assert_eq!(self.decision_level(), 0);
        self.tick += 1;
        self.asg.set(l, 0, self.tick);
        self.trail.push(l);
        self.store.decide(l, &self.asg, &mut self.reports);
        self.apply_reports();
        if self.store.has_implications() {
            self.bcp_queue.push_back(l);
        }
    }

    /// record a forced literal at the current level. The literal must be
    /// undefined; anything else is a driver bug.
    pub fn propagate_lit(&mut self, l: Lit, antecedent: Option<ClauseIndex>) {
        assert!(
            self.asg.lit_is_undefined(l),
            "propagating already-assigned literal {l}"
        );
        self.num_propagation += 1;
        self.tick += 1;
        self.asg.set(l, self.decision_level(), self.tick);
        self.reason[l.vi()] = antecedent;
        self.trail.push(l);
        self.store.decide(l, &self.asg, &mut self.reports);
        self.apply_reports();
        if self.store.has_implications() {
            self.bcp_queue.push_back(l);
        }
    }

    /// Unit propagation to fixpoint or first conflict. Clause-object units
    /// are consumed from the unit bucket; when the backend carries an
    /// implication table, every newly true literal's implications are
    /// closed transitively in between. A falsified implication raises the
    /// BCP conflict flag.
    pub fn propagate(&mut self) {
        loop {
            if self.is_conflicting() {
                break;
            }
            if let Some(ci) = self.pop_unit() {
                let l = self.store.unit_literal(ci, &self.asg);
                self.propagate_lit(l, Some(ci));
                continue;
            }
            if let Some(seed) = self.bcp_queue.pop_front() {
                let implied = self.store.implications(seed).to_vec();
                for (l, src) in implied {
                    if self.asg.lit_is_undefined(l) {
                        self.propagate_lit(l, Some(src));
                    } else if self.asg.lit_is_falsified(l) {
                        self.bcp_conflict = Some(src);
                        break;
                    }
                }
                continue;
            }
            break;
        }
    }

    /// pop every trail entry of the current decision level, in reverse
    /// assignment order, undoing each in the backend.
    pub fn backtrack(&mut self) {
        debug_assert!(!self.trail_lim.is_empty());
        let lim = self.trail_lim.pop().unwrap_or(0);
        while self.trail.len() > lim {
            let l = self.trail.pop().expect("empty trail under its limit");
            self.asg.unset(l.vi());
            self.reason[l.vi()] = None;
            self.store.undo(l, &self.asg, &mut self.reports);
            self.apply_reports();
        }
        self.bcp_queue.clear();
        self.bcp_conflict = None;
    }

    /// repeat `backtrack` until the given level is reached.
    pub fn backjump(&mut self, level: DecisionLevel) {
        while level < self.decision_level() {
            self.backtrack();
        }
    }

    pub(crate) fn note_restart(&mut self) {
        self.num_restart += 1;
    }

    /// effective length (non-falsified literal count) of every live,
    /// unsatisfied clause.
    pub fn length_snapshot(&self) -> LengthSnapshot {
        let mut lengths = AHashMap::new();
        for (ci, c) in self.clauses.iter().enumerate() {
            if c.is_dead() {
                continue;
            }
            let mut undefined = 0;
            let mut satisfied = false;
            for l in c.iter() {
                match self.asg.lit_value(*l) {
                    Some(true) => {
                        satisfied = true;
                        break;
                    }
                    Some(false) => (),
                    None => undefined += 1,
                }
            }
            if !satisfied {
                lengths.insert(ci, undefined);
            }
        }
        LengthSnapshot {
            lengths,
            values: self.asg.values(),
        }
    }

    pub fn stats(&self) -> Stats {
        Stats {
            decisions: self.num_decision,
            propagations: self.num_propagation,
            checked_clauses: self.num_checked_clauses,
            subsumption_removed: self.num_subsumed,
            learned_live: self.learned.len(),
            learned_total: self.num_learned_total,
            restarts: self.num_restart,
        }
    }

    //
    // internal bookkeeping
    //

    /// append a clause to the arena, returning its stable index.
    pub(crate) fn intern(&mut self, lits: Vec<Lit>, learned: bool) -> ClauseIndex {
        let ci = self.clauses.len();
        self.clauses.push(Clause::new(lits, learned));
        self.states.push(ClauseState::Unresolved);
        self.counts[ClauseState::Unresolved as usize] += 1;
        ci
    }

    /// record the state the backend computed at registration.
    pub(crate) fn register_state(&mut self, ci: ClauseIndex, state: ClauseState) {
        self.counts[self.states[ci] as usize] -= 1;
        self.states[ci] = state;
        self.counts[state as usize] += 1;
        match state {
            ClauseState::Unit => self.unit_queue.push_back(ci),
            ClauseState::Conflict if self.conflict.is_none() => self.conflict = Some(ci),
            _ => (),
        }
    }

    /// drain the backend's state-change reports, moving clauses between
    /// buckets and maintaining the conflict witness.
    fn apply_reports(&mut self) {
        let mut i = 0;
        while i < self.reports.len() {
            let (ci, state) = self.reports[i];
            i += 1;
            self.num_checked_clauses += 1;
            let old = self.states[ci];
            if old != state {
                self.counts[old as usize] -= 1;
                self.counts[state as usize] += 1;
                self.states[ci] = state;
                if state == ClauseState::Unit {
                    self.unit_queue.push_back(ci);
                }
            }
            if state == ClauseState::Conflict {
                if self.conflict.is_none() {
                    self.conflict = Some(ci);
                }
            } else if self.conflict == Some(ci) {
                self.conflict = None;
            }
        }
        self.reports.clear();
    }

    /// next clause that is still unit; stale queue entries are skipped.
    fn pop_unit(&mut self) -> Option<ClauseIndex> {
        while let Some(ci) = self.unit_queue.pop_front() {
            if !self.clauses[ci].is_dead() && self.states[ci] == ClauseState::Unit {
                return Some(ci);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{heuristic::RandomDecide, store::AdjacencyStore},
    };

    fn engine(clauses: Vec<Vec<i32>>) -> Engine {
        let cnf = CnfFormula::from_vec_i32(clauses).unwrap();
        Engine::build(
            &cnf,
            Box::new(AdjacencyStore::new(cnf.num_vars())),
            Box::new(RandomDecide::default()),
        )
    }

    #[test]
    fn test_unit_propagation_chain() {
        let mut e = engine(vec![vec![1, 2, 3], vec![-1], vec![-2]]);
        e.propagate();
        assert!(e.is_satisfied());
        assert_eq!(e.model(), vec![-1, -2, 3]);
        assert!(!e.is_conflicting());
    }

    #[test]
    fn test_conflict_detection() {
        let mut e = engine(vec![vec![1], vec![-1]]);
        e.propagate();
        assert!(e.is_conflicting());
        assert!(!e.is_satisfied());
    }

    #[test]
    fn test_backtrack_inverse_law() {
        let mut e = engine(vec![vec![1, 2], vec![-1, 3], vec![-3, -2, 4]]);
        let values0 = e.asg.values();
        let reason0 = e.reason.clone();
        let states0 = e.states.clone();
        e.decide(Lit::from(-2i32));
        e.propagate();
        e.decide(Lit::from(-4i32));
        e.propagate();
        assert_ne!(values0, e.asg.values());
        e.backtrack();
        e.backtrack();
        assert_eq!(values0, e.asg.values());
        assert_eq!(reason0, e.reason);
        assert_eq!(states0, e.states);
        assert_eq!(e.decision_level(), 0);
    }

    #[test]
    #[should_panic(expected = "propagating already-assigned literal")]
    fn test_double_propagation_is_fatal() {
        let mut e = engine(vec![vec![1, 2]]);
        e.decide(Lit::from(1i32));
        e.propagate_lit(Lit::from(1i32), None);
    }
}
