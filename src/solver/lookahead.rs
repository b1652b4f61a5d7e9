//! DPLL with look-ahead: before branching, a bounded candidate set is
//! probed in both polarities. A probe that satisfies the formula ends the
//! search; an autarky (a trial that shrinks no clause) is kept without
//! branching; a conflicting polarity forces its opposite. Surviving
//! candidates are ranked by a pluggable difference heuristic.

use {
    super::SolveIF,
    crate::{
        engine::{Engine, LengthSnapshot},
        lookahead::DiffIF,
        types::*,
    },
};

/// minimum number of probed candidates
const MIN_CANDIDATES: usize = 10;

pub struct DpllLookAhead {
    diff: Box<dyn DiffIF>,
}

/// outcome of the probing pass
enum Probe {
    /// branch on this literal, preferred polarity first
    Branch(Lit),
    /// an assignment was kept (autarky or forced polarity); recurse
    /// without a choice at this level
    NoChoice,
    /// a trial satisfied the formula and its assignment was kept
    Satisfied,
}

/// outcome of one polarity trial
enum Trial {
    Satisfied,
    Conflict,
    Autarky,
    Open(f64),
}

impl DpllLookAhead {
    pub fn new(diff: Box<dyn DiffIF>) -> DpllLookAhead {
        DpllLookAhead { diff }
    }

    /// Rank undefined variables by an approximate clause-reduction score
    /// over clauses of effective length ≥ 3 and keep the top decile
    /// (at least `MIN_CANDIDATES`, or all if fewer).
    fn preselect(f: &Engine, before: &LengthSnapshot) -> Vec<VarId> {
        let num_vars = f.num_vars();
        let mut pos = vec![0usize; num_vars + 1];
        let mut neg = vec![0usize; num_vars + 1];
        for (ci, k) in &before.lengths {
            if *k < 3 {
                continue;
            }
            for l in f.clause_lits(*ci) {
                if f.lit_is_falsified(*l) {
                    continue;
                }
                if l.positive() {
                    pos[l.vi()] += 1;
                } else {
                    neg[l.vi()] += 1;
                }
            }
        }
        let mut candidates: Vec<VarId> =
            (1..=num_vars).filter(|vi| f.var_value(*vi).is_none()).collect();
        let score = |vi: VarId| 1024 * pos[vi] * neg[vi] + pos[vi] + neg[vi];
        candidates.sort_by(|a, b| score(*b).cmp(&score(*a)).then(a.cmp(b)));
        let keep = (candidates.len() / 10).max(MIN_CANDIDATES).min(candidates.len());
        candidates.truncate(keep);
        candidates
    }

    /// Tentatively decide and propagate one polarity. The assignment is
    /// undone unless it satisfied the formula, completed an autarky, or
    /// conflicted (in which case the opposite polarity is decided for
    /// real).
    fn probe(&self, f: &mut Engine, l: Lit, before: &LengthSnapshot) -> Trial {
        f.decide(l);
        f.propagate();
        if f.is_satisfied() {
            return Trial::Satisfied;
        }
        if f.is_conflicting() {
            f.backtrack();
            f.decide(!l);
            return Trial::Conflict;
        }
        let after = f.length_snapshot();
        let autarky = after
            .lengths
            .iter()
            .all(|(ci, k)| before.lengths.get(ci) == Some(k));
        if autarky {
            return Trial::Autarky;
        }
        let score = self.diff.score(f, before, &after);
        f.backtrack();
        Trial::Open(score)
    }

    fn look_ahead(&mut self, f: &mut Engine) -> Probe {
        let before = f.length_snapshot();
        let candidates = Self::preselect(f, &before);
        let mut best = f64::NEG_INFINITY;
        let mut best_lit: Option<Lit> = None;
        for vi in candidates {
            if f.var_value(vi).is_some() {
                continue;
            }
            let positive = match self.probe(f, Lit::from((vi, true)), &before) {
                Trial::Satisfied => return Probe::Satisfied,
                Trial::Conflict | Trial::Autarky => return Probe::NoChoice,
                Trial::Open(score) => score,
            };
            let negative = match self.probe(f, Lit::from((vi, false)), &before) {
                Trial::Satisfied => return Probe::Satisfied,
                Trial::Conflict | Trial::Autarky => return Probe::NoChoice,
                Trial::Open(score) => score,
            };
            let mixed = 1024.0 * positive * negative + positive + negative;
            if best < mixed {
                best = mixed;
                best_lit = Some(Lit::from((vi, negative < positive)));
            }
        }
        match best_lit {
            Some(l) => Probe::Branch(l),
            None => panic!("look-ahead found no branching candidate"),
        }
    }
}

impl SolveIF for DpllLookAhead {
    fn solve(&mut self, f: &mut Engine) -> bool {
        f.propagate();
        if f.is_satisfied() {
            return true;
        }
        if f.is_conflicting() {
            return false;
        }
        let entry_level = f.decision_level();

        // may mutate the formula through autarky retention or forcing
        match self.look_ahead(f) {
            Probe::Satisfied => true,
            Probe::NoChoice => {
                if self.solve(f) {
                    return true;
                }
                // unwind the levels the probing pass kept open
                f.backjump(entry_level);
                false
            }
            Probe::Branch(l) => {
                f.decide(l);
                if self.solve(f) {
                    return true;
                }
                f.backtrack();

                f.decide(!l);
                if self.solve(f) {
                    return true;
                }
                f.backtrack();

                false
            }
        }
    }
}
