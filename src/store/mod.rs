//! Module `store` provides the clause-state backends: interchangeable
//! structures that track, per clause, whether it is satisfied, falsified,
//! unit or unresolved as variables are assigned and unassigned.

/// counter-based occurrence-list backend
pub mod adjacency;
/// implication-table backend for static clause sets
pub mod eager;
/// size-specializing decorator
pub mod short;
/// two-watched-literal backend
pub mod watched;

pub use self::{
    adjacency::AdjacencyStore, eager::EagerStore, short::ShortClauseStore, watched::WatchedStore,
};

use crate::{assign::Assignment, types::*};

/// State of a clause under the current partial assignment. It is a pure
/// function of the clause's literals and the assignment; backends keep
/// shadow bookkeeping consistent with it after every `decide`/`undo`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseState {
    /// two or more undefined literals, none satisfied
    Unresolved,
    /// exactly one undefined literal, none satisfied
    Unit,
    /// all literals falsified
    Conflict,
    /// at least one satisfied literal
    Satisfied,
    /// binary clause folded into an implication table, not tracked as an object
    ManagedByImplications,
}

/// A state-change notification: the clause and its state after the change.
pub type StateReport = (ClauseIndex, ClauseState);

/// Capability contract of a clause-state backend. `decide`/`undo` append
/// a report for every clause whose state they touched to the buffer the
/// engine supplies; the engine drains the buffer synchronously after each
/// call, so delivery is in order and complete before the call site moves on.
pub trait StoreIF {
    /// register a clause, compute its state under the current assignment
    /// and return it.
    fn add_initial_clause(&mut self, ci: ClauseIndex, lits: &[Lit], asg: &Assignment)
        -> ClauseState;
    /// register a learned clause. `hint` carries the positions of the
    /// asserting and assertion-level literals from conflict analysis, used
    /// by watched backends for initial watch placement.
    fn add_learned_clause(
        &mut self,
        ci: ClauseIndex,
        lits: &[Lit],
        hint: Option<(usize, usize)>,
        asg: &Assignment,
    ) -> ClauseState;
    /// unregister a clause and return its last known state.
    fn remove_clause(&mut self, ci: ClauseIndex, asg: &Assignment) -> ClauseState;
    /// `l` just became true: update every clause containing `l` or `!l`
    /// and report each one's state.
    fn decide(&mut self, l: Lit, asg: &Assignment, out: &mut Vec<StateReport>);
    /// reverse exactly the effect of `decide(l)`. The assignment has
    /// already been reset when this is called.
    fn undo(&mut self, l: Lit, asg: &Assignment, out: &mut Vec<StateReport>);
    /// the single remaining undefined literal of a clause known to be
    /// `Unit`. Panics when called on a non-unit clause.
    fn unit_literal(&self, ci: ClauseIndex, asg: &Assignment) -> Lit;
    /// whether learned clauses can be added after construction.
    fn supports_learning(&self) -> bool {
        true
    }
    /// whether `implications` carries a pre-compiled implication table.
    fn has_implications(&self) -> bool {
        false
    }
    /// literals implied by `l` becoming true, with the clause that encodes
    /// each implication.
    fn implications(&self, _l: Lit) -> &[(Lit, ClauseIndex)] {
        &[]
    }
}
