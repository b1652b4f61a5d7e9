//! Uniform random decisions from a fixed seed: reproducible runs, no
//! claim to solving quality.

use {
    super::{DecideIF, NextDecision},
    crate::{assign::Assignment, types::*},
    rand::{rngs::SmallRng, Rng, SeedableRng},
};

/// fixed seed for determinism
const SEED: u64 = 88209;

pub struct RandomDecide {
    rng: SmallRng,
}

impl Default for RandomDecide {
    fn default() -> RandomDecide {
        RandomDecide {
            rng: SmallRng::seed_from_u64(SEED),
        }
    }
}

impl DecideIF for RandomDecide {
    fn next_decision(&mut self, asg: &Assignment) -> NextDecision {
        let unassigned: Vec<VarId> = (1..=asg.num_vars())
            .filter(|vi| asg.var_value(*vi).is_none())
            .collect();
        debug_assert!(!unassigned.is_empty());
        let vi = unassigned[self.rng.random_range(0..unassigned.len())];
        NextDecision::free(Lit::from((vi, true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let asg = Assignment::new(50);
        let picks = |mut h: RandomDecide| {
            (0..10)
                .map(|_| h.next_decision(&asg).lit)
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(RandomDecide::default()), picks(RandomDecide::default()));
    }

    #[test]
    fn test_picks_only_undefined_vars() {
        let mut asg = Assignment::new(4);
        asg.set(Lit::from(1i32), 1, 1);
        asg.set(Lit::from(-3i32), 1, 2);
        let mut h = RandomDecide::default();
        for _ in 0..20 {
            let d = h.next_decision(&asg);
            assert!(asg.lit_is_undefined(d.lit));
            assert!(!d.is_assumption);
        }
    }
}
