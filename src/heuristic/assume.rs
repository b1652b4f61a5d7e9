//! Assumption wrapper: serves an externally supplied literal list first,
//! flagged as assumptions, then delegates to an inner heuristic.

use {
    super::{DecideIF, NextDecision},
    crate::{assign::Assignment, types::*},
};

pub struct Assumptions {
    assumptions: Vec<Lit>,
    inner: Box<dyn DecideIF>,
}

impl Assumptions {
    pub fn new(assumptions: Vec<Lit>, inner: Box<dyn DecideIF>) -> Assumptions {
        Assumptions { assumptions, inner }
    }
}

impl DecideIF for Assumptions {
    fn add_initial_clause(&mut self, lits: &[Lit]) {
        self.inner.add_initial_clause(lits);
    }
    fn on_conflict(&mut self, vars: &[VarId]) {
        self.inner.on_conflict(vars);
    }
    fn next_decision(&mut self, asg: &Assignment) -> NextDecision {
        for l in &self.assumptions {
            if asg.lit_is_undefined(*l) {
                return NextDecision {
                    lit: *l,
                    is_assumption: true,
                };
            }
        }
        self.inner.next_decision(asg)
    }
}
