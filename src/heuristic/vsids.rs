//! VSIDS: every variable touched during conflict resolution gets its
//! activity bumped by a globally growing amount, giving exponential
//! recency weighting. The variable order is re-sorted after each conflict.
//! Always branches on the negative literal first; there is no phase
//! saving.

use {
    super::{DecideIF, NextDecision},
    crate::{assign::Assignment, types::*},
};

const BUMP_DIVISOR: f64 = 0.95;
const RESCALE_FACTOR: f64 = 1e10;

pub struct Vsids {
    activity: Vec<f64>,
    order: Vec<VarId>,
    bump: f64,
}

impl Vsids {
    pub fn new(num_vars: usize) -> Vsids {
        Vsids {
            activity: vec![0.0; num_vars + 1],
            order: (1..=num_vars).collect(),
            bump: 1.0,
        }
    }
    fn rescale(&mut self) {
        self.bump /= RESCALE_FACTOR;
        for a in self.activity.iter_mut() {
            *a /= RESCALE_FACTOR;
        }
    }
}

impl DecideIF for Vsids {
    fn on_conflict(&mut self, vars: &[VarId]) {
        for vi in vars {
            self.activity[*vi] += self.bump;
        }
        self.bump /= BUMP_DIVISOR;
        if RESCALE_FACTOR < self.bump {
            self.rescale();
        }
        let activity = &self.activity;
        self.order
            .sort_by(|a, b| activity[*b].total_cmp(&activity[*a]));
    }
    fn next_decision(&mut self, asg: &Assignment) -> NextDecision {
        for vi in &self.order {
            if asg.var_value(*vi).is_none() {
                return NextDecision::free(Lit::from((*vi, false)));
            }
        }
        panic!("decision requested but no variable is undefined");
    }
}
