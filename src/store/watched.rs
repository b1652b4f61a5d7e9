//! Two-watched-literal backend. Each clause watches two of its literals;
//! only a falsifying assignment to a watched literal triggers a scan for a
//! replacement. Watch membership is a doubly-linked list per literal so a
//! watch moves between lists in O(1). Watch positions are backtrack-stable:
//! `undo` re-reports states but never moves a watch back.

use {
    super::{ClauseState, StateReport, StoreIF},
    crate::{assign::Assignment, types::*},
};

const NIL: usize = usize::MAX;

/// membership node of a watch list; node id = 2 * clause id + watch slot
#[derive(Clone, Copy, Debug)]
struct Node {
    prev: usize,
    next: usize,
}

#[derive(Clone, Debug)]
struct Watched {
    lits: Box<[Lit]>,
    /// positions of the two watches in `lits`; `NIL` when the clause is
    /// too short to have one
    head: [usize; 2],
}

impl Watched {
    fn watch_lit(&self, slot: usize) -> Option<Lit> {
        (self.head[slot] != NIL).then(|| self.lits[self.head[slot]])
    }
    fn is_satisfied(&self, asg: &Assignment) -> bool {
        self.watch_lit(0).is_some_and(|l| asg.lit_is_satisfied(l))
            || self.watch_lit(1).is_some_and(|l| asg.lit_is_satisfied(l))
    }
    /// state of the clause as seen through its watches alone
    fn state(&self, asg: &Assignment) -> ClauseState {
        let w0 = self.watch_lit(0).map(|l| asg.lit_value(l));
        let w1 = self.watch_lit(1).map(|l| asg.lit_value(l));
        if w0 == Some(Some(true)) || w1 == Some(Some(true)) {
            return ClauseState::Satisfied;
        }
        match (w0, w1) {
            (Some(None), Some(None)) => ClauseState::Unresolved,
            (Some(None), _) | (_, Some(None)) => ClauseState::Unit,
            _ => ClauseState::Conflict,
        }
    }
    fn unit_literal(&self, asg: &Assignment) -> Lit {
        if let Some(l) = self.watch_lit(1).filter(|l| asg.lit_is_undefined(*l)) {
            return l;
        }
        if let Some(l) = self.watch_lit(0).filter(|l| asg.lit_is_undefined(*l)) {
            return l;
        }
        panic!("unit literal requested from a non-unit clause {:?}", i32s(&self.lits));
    }
    /// The watch in `slot` was just falsified: scan once for a replacement
    /// that is undefined or satisfied, starting after the current position
    /// and skipping the sibling watch. Returns the new watched literal, or
    /// `None` when no replacement exists (the clause is unit or conflicting
    /// through the sibling).
    fn move_watch(&mut self, slot: usize, asg: &Assignment) -> Option<Lit> {
        if self.is_satisfied(asg) {
            return None;
        }
        let len = self.lits.len();
        let from = self.head[slot];
        for offset in 1..len {
            let pos = (from + offset) % len;
            if pos == self.head[1 - slot] {
                continue;
            }
            if !asg.lit_is_falsified(self.lits[pos]) {
                self.head[slot] = pos;
                return Some(self.lits[pos]);
            }
        }
        None
    }
}

pub struct WatchedStore {
    shadows: Vec<Option<Watched>>,
    /// two membership nodes per clause slot
    nodes: Vec<Node>,
    /// head node per literal encoding
    heads: Vec<usize>,
}

impl WatchedStore {
    pub fn new(num_vars: usize) -> WatchedStore {
        WatchedStore {
            shadows: Vec::new(),
            nodes: Vec::new(),
            heads: vec![NIL; 2 * (num_vars + 1)],
        }
    }
    fn grow(&mut self, ci: ClauseIndex) {
        if self.shadows.len() <= ci {
            self.shadows.resize_with(ci + 1, || None);
            self.nodes.resize(2 * (ci + 1), Node { prev: NIL, next: NIL });
        }
    }
    fn link(&mut self, node: usize, l: Lit) {
        let head = &mut self.heads[usize::from(l)];
        self.nodes[node] = Node { prev: NIL, next: *head };
        let old = *head;
        *head = node;
        if old != NIL {
            self.nodes[old].prev = node;
        }
    }
    fn unlink(&mut self, node: usize, l: Lit) {
        let Node { prev, next } = self.nodes[node];
        if prev == NIL {
            self.heads[usize::from(l)] = next;
        } else {
            self.nodes[prev].next = next;
        }
        if next != NIL {
            self.nodes[next].prev = prev;
        }
    }
    /// Initial watch placement: prefer undefined literals in clause order,
    /// then decided literals by descending decision order. Loose watches
    /// minimize spurious rescans after backtracking.
    fn place_watches(lits: &[Lit], asg: &Assignment) -> [usize; 2] {
        let mut undefined: Vec<usize> = Vec::new();
        let mut decided: Vec<usize> = Vec::new();
        for (i, l) in lits.iter().enumerate() {
            if asg.lit_is_undefined(*l) {
                undefined.push(i);
            } else {
                decided.push(i);
            }
        }
        decided.sort_by(|a, b| asg.order(lits[*b].vi()).cmp(&asg.order(lits[*a].vi())));
        let mut head = [NIL, NIL];
        for (slot, h) in head.iter_mut().enumerate() {
            if lits.len() <= slot {
                break;
            }
            *h = if slot < undefined.len() {
                undefined[slot]
            } else {
                decided[slot - undefined.len()]
            };
        }
        head
    }
    fn add(
        &mut self,
        ci: ClauseIndex,
        lits: &[Lit],
        head: [usize; 2],
        asg: &Assignment,
    ) -> ClauseState {
        self.grow(ci);
        let shadow = Watched {
            lits: lits.to_vec().into_boxed_slice(),
            head,
        };
        let state = shadow.state(asg);
        for slot in 0..2 {
            if let Some(l) = shadow.watch_lit(slot) {
                self.link(2 * ci + slot, l);
            }
        }
        self.shadows[ci] = Some(shadow);
        state
    }
}

impl StoreIF for WatchedStore {
    fn add_initial_clause(
        &mut self,
        ci: ClauseIndex,
        lits: &[Lit],
        asg: &Assignment,
    ) -> ClauseState {
        let head = Self::place_watches(lits, asg);
        self.add(ci, lits, head, asg)
    }
    fn add_learned_clause(
        &mut self,
        ci: ClauseIndex,
        lits: &[Lit],
        hint: Option<(usize, usize)>,
        asg: &Assignment,
    ) -> ClauseState {
        let head = match hint {
            Some((h0, h1)) => [h0, h1],
            None => Self::place_watches(lits, asg),
        };
        self.add(ci, lits, head, asg)
    }
    fn remove_clause(&mut self, ci: ClauseIndex, asg: &Assignment) -> ClauseState {
        let shadow = self.shadows[ci].take().expect("removing an unregistered clause");
        for slot in 0..2 {
            if let Some(l) = shadow.watch_lit(slot) {
                self.unlink(2 * ci + slot, l);
            }
        }
        shadow.state(asg)
    }
    fn decide(&mut self, l: Lit, asg: &Assignment, out: &mut Vec<StateReport>) {
        // watchers of `l` are now satisfied through the watch; report only
        let mut node = self.heads[usize::from(l)];
        while node != NIL {
            let next = self.nodes[node].next;
            let ci = node >> 1;
            let state = self.shadows[ci].as_ref().expect("stale watch").state(asg);
            out.push((ci, state));
            node = next;
        }
        // watchers of `!l` lost a watch; try to move it
        let fl = !l;
        let mut node = self.heads[usize::from(fl)];
        while node != NIL {
            let next = self.nodes[node].next;
            let ci = node >> 1;
            let slot = node & 1;
            let moved = self.shadows[ci]
                .as_mut()
                .expect("stale watch")
                .move_watch(slot, asg);
            if let Some(new_lit) = moved {
                self.unlink(node, fl);
                self.link(node, new_lit);
            }
            let state = self.shadows[ci].as_ref().expect("stale watch").state(asg);
            out.push((ci, state));
            node = next;
        }
    }
    fn undo(&mut self, l: Lit, asg: &Assignment, out: &mut Vec<StateReport>) {
        // watch positions are backtrack-stable; only the states changed
        for lit in [l, !l] {
            let mut node = self.heads[usize::from(lit)];
            while node != NIL {
                let next = self.nodes[node].next;
                let ci = node >> 1;
                let state = self.shadows[ci].as_ref().expect("stale watch").state(asg);
                out.push((ci, state));
                node = next;
            }
        }
    }
    fn unit_literal(&self, ci: ClauseIndex, asg: &Assignment) -> Lit {
        self.shadows[ci]
            .as_ref()
            .expect("unit literal of an unregistered clause")
            .unit_literal(asg)
    }
}
