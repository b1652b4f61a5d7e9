//! Module `assign` provides the per-variable assignment table shared
//! between the engine and the clause-state backends. Backends receive it
//! read-only; only the engine mutates it through `set`/`unset`.

use crate::types::*;

/// The assignment table: truth value, decision level and decision order
/// per variable. A variable is `Satisfied` exactly when its positive
/// literal evaluates to `Some(true)`.
#[derive(Clone, Debug)]
pub struct Assignment {
    /// truth value per var; `None` means Undefined
    value: Vec<Option<bool>>,
    /// decision level per var; meaningful only while assigned
    level: Vec<DecisionLevel>,
    /// decision order tick per var; NOT reset by unassignment, so stale
    /// ticks remain readable for recency comparisons over assigned vars only
    order: Vec<u64>,
    num_vars: usize,
}

impl Assignment {
    pub fn new(num_vars: usize) -> Assignment {
        Assignment {
            value: vec![None; num_vars + 1],
            level: vec![0; num_vars + 1],
            order: vec![0; num_vars + 1],
            num_vars,
        }
    }
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }
    #[inline]
    pub fn var_value(&self, vi: VarId) -> Option<bool> {
        self.value[vi]
    }
    /// the assigned value from the view of `l`:
    /// `Some(true)` when the literal is satisfied, `Some(false)` when
    /// falsified, `None` when its variable is undefined.
    #[inline]
    pub fn lit_value(&self, l: Lit) -> Option<bool> {
        self.value[l.vi()].map(|b| if l.positive() { b } else { !b })
    }
    #[inline]
    pub fn lit_is_satisfied(&self, l: Lit) -> bool {
        self.lit_value(l) == Some(true)
    }
    #[inline]
    pub fn lit_is_falsified(&self, l: Lit) -> bool {
        self.lit_value(l) == Some(false)
    }
    #[inline]
    pub fn lit_is_undefined(&self, l: Lit) -> bool {
        self.value[l.vi()].is_none()
    }
    #[inline]
    pub fn level(&self, vi: VarId) -> DecisionLevel {
        self.level[vi]
    }
    #[inline]
    pub fn order(&self, vi: VarId) -> u64 {
        self.order[vi]
    }
    pub(crate) fn set(&mut self, l: Lit, level: DecisionLevel, order: u64) {
        debug_assert!(self.value[l.vi()].is_none());
        self.value[l.vi()] = Some(l.positive());
        self.level[l.vi()] = level;
        self.order[l.vi()] = order;
    }
    pub(crate) fn unset(&mut self, vi: VarId) {
        debug_assert!(self.value[vi].is_some());
        self.value[vi] = None;
        self.level[vi] = 0;
    }
    /// snapshot of the truth values, indexed by variable
    pub fn values(&self) -> Vec<Option<bool>> {
        self.value.clone()
    }
    /// assigned variables as signed indices in ascending variable order;
    /// undefined variables are excluded
    pub fn model(&self) -> Vec<i32> {
        (1..=self.num_vars)
            .filter_map(|vi| {
                self.value[vi].map(|b| if b { vi as i32 } else { -(vi as i32) })
            })
            .collect::<Vec<_>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_views() {
        let mut asg = Assignment::new(3);
        assert!(asg.lit_is_undefined(Lit::from(2i32)));
        asg.set(Lit::from(-2i32), 1, 1);
        assert!(asg.lit_is_satisfied(Lit::from(-2i32)));
        assert!(asg.lit_is_falsified(Lit::from(2i32)));
        assert_eq!(asg.var_value(2), Some(false));
        assert_eq!(asg.level(2), 1);
        assert_eq!(asg.model(), vec![-2]);
        asg.unset(2);
        assert!(asg.lit_is_undefined(Lit::from(2i32)));
        assert_eq!(asg.model(), Vec::<i32>::new());
    }
}
