//! Static Jeroslow-Wang: variables are scored once at load time by
//! Σ 2^(-clause length) over the initial clauses containing them, sorted
//! lazily on first use, and picked in that fixed order.

use {
    super::{DecideIF, NextDecision},
    crate::{assign::Assignment, types::*},
};

pub struct JeroslowWang {
    score: Vec<f64>,
    order: Vec<VarId>,
    sorted: bool,
}

impl JeroslowWang {
    pub fn new(num_vars: usize) -> JeroslowWang {
        JeroslowWang {
            score: vec![0.0; num_vars + 1],
            order: (1..=num_vars).collect(),
            sorted: false,
        }
    }
}

impl DecideIF for JeroslowWang {
    fn add_initial_clause(&mut self, lits: &[Lit]) {
        for l in lits {
            self.score[l.vi()] += (2.0f64).powi(-(lits.len() as i32));
        }
    }
    fn next_decision(&mut self, asg: &Assignment) -> NextDecision {
        if !self.sorted {
            let score = &self.score;
            self.order.sort_by(|a, b| score[*b].total_cmp(&score[*a]));
            self.sorted = true;
        }
        for vi in &self.order {
            if asg.var_value(*vi).is_none() {
                return NextDecision::free(Lit::from((*vi, true)));
            }
        }
        panic!("decision requested but no variable is undefined");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_follows_scores() {
        let mut h = JeroslowWang::new(3);
        // var 2 appears in two short clauses, var 1 in one, var 3 in a long one
        h.add_initial_clause(&[Lit::from(2i32), Lit::from(-1i32)]);
        h.add_initial_clause(&[Lit::from(-2i32), Lit::from(3i32), Lit::from(1i32)]);
        h.add_initial_clause(&[Lit::from(2i32), Lit::from(-3i32)]);
        let mut asg = Assignment::new(3);
        assert_eq!(h.next_decision(&asg).lit, Lit::from(2i32));
        asg.set(Lit::from(2i32), 1, 1);
        // var 1: 1/4 + 1/8; var 3: 1/8 + 1/4 -- tied, index order breaks it
        let second = h.next_decision(&asg).lit;
        assert_eq!(second, Lit::from(1i32));
    }
}
