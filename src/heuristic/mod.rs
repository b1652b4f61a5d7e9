//! Module `heuristic` provides the pluggable decision policies that pick
//! the next branching literal.

/// assumption-list wrapper
mod assume;
/// static Jeroslow-Wang scoring
mod jw;
/// fixed-seed random picks
mod random;
/// conflict-driven activity scoring
mod vsids;

pub use self::{assume::Assumptions, jw::JeroslowWang, random::RandomDecide, vsids::Vsids};

use crate::{assign::Assignment, types::*};

/// A branching choice. Assumption decisions are exempt from the
/// polarity-flip retry of plain backtracking search.
#[derive(Clone, Copy, Debug)]
pub struct NextDecision {
    pub lit: Lit,
    pub is_assumption: bool,
}

impl NextDecision {
    pub fn free(lit: Lit) -> NextDecision {
        NextDecision {
            lit,
            is_assumption: false,
        }
    }
}

/// Capability contract of a decision heuristic.
pub trait DecideIF {
    /// observe an initial clause at load time.
    fn add_initial_clause(&mut self, _lits: &[Lit]) {}
    /// observe the variables touched while resolving a conflict.
    fn on_conflict(&mut self, _vars: &[VarId]) {}
    /// pick the next branching literal among the undefined variables.
    fn next_decision(&mut self, asg: &Assignment) -> NextDecision;
}
