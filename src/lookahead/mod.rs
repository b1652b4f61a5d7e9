//! Module `lookahead` provides the difference heuristics: scoring
//! functions over the change in effective clause lengths caused by a
//! tentative assignment, used by the look-ahead search strategy to rank
//! branching candidates.

use crate::{
    engine::{Engine, LengthSnapshot},
    types::*,
};

/// Capability contract of a difference heuristic: score the effect of one
/// polarity trial given the effective-length snapshots before and after
/// the trial's propagation.
pub trait DiffIF {
    fn score(&self, engine: &Engine, before: &LengthSnapshot, after: &LengthSnapshot) -> f64;
}

/// weight table for clause-reduction scoring
fn gamma(k: usize) -> f64 {
    match k {
        2 => 1.0,
        3 => 0.2,
        4 => 0.05,
        5 => 0.01,
        6 => 0.003,
        _ => 20.4514 * 0.218673f64.powi(k as i32),
    }
}

/// Clause-Reduction: Σ Γ(k) over surviving clauses whose effective length
/// changed during the trial.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClauseReduction;

impl DiffIF for ClauseReduction {
    fn score(&self, _engine: &Engine, before: &LengthSnapshot, after: &LengthSnapshot) -> f64 {
        let mut sum = 0.0;
        for (ci, k) in &after.lengths {
            if *k < 2 {
                continue;
            }
            if before.lengths.get(ci) == Some(k) {
                // unaffected by the trial assignment
                continue;
            }
            sum += gamma(*k);
        }
        sum
    }
}

/// Backbone-Search: for every clause the trial made binary, multiply the
/// contribution values of its two remaining literals' complements, where a
/// literal's value is Σ 2^(3-k) over the clauses of effective length k
/// containing it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BackboneSearch;

/// per-literal contribution values under the post-trial snapshot, indexed
/// `[positive][var]` / `[negative][var]`
fn value_per_literal(engine: &Engine, after: &LengthSnapshot) -> (Vec<f64>, Vec<f64>) {
    let num_vars = after.values.len() - 1;
    let mut positive = vec![0.0; num_vars + 1];
    let mut negative = vec![0.0; num_vars + 1];
    for (ci, k) in &after.lengths {
        for l in engine.clause_lits(*ci) {
            let v = (2.0f64).powi(3 - *k as i32);
            if l.positive() {
                positive[l.vi()] += v;
            } else {
                negative[l.vi()] += v;
            }
        }
    }
    (positive, negative)
}

fn newly_binary_product(
    engine: &Engine,
    before: &LengthSnapshot,
    after: &LengthSnapshot,
) -> f64 {
    let (positive, negative) = value_per_literal(engine, after);
    let mut sum = 0.0;
    for (ci, k) in &after.lengths {
        if *k != 2 || before.lengths.get(ci) == Some(k) {
            continue;
        }
        let undefined: Vec<Lit> = engine
            .clause_lits(*ci)
            .iter()
            .filter(|l| after.values[l.vi()].is_none())
            .copied()
            .collect();
        debug_assert_eq!(undefined.len(), 2);
        // the complement's value: satisfying this clause constrains the
        // other occurrences of the opposite literal
        let contribution = |l: Lit| {
            if l.positive() {
                negative[l.vi()]
            } else {
                positive[l.vi()]
            }
        };
        sum += contribution(undefined[0]) * contribution(undefined[1]);
    }
    sum
}

impl DiffIF for BackboneSearch {
    fn score(&self, engine: &Engine, before: &LengthSnapshot, after: &LengthSnapshot) -> f64 {
        newly_binary_product(engine, before, after)
    }
}

/// Weighted-Binaries: the clause-reduction sum plus the backbone product
/// term over newly binary clauses, combining both signals.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeightedBinaries;

impl DiffIF for WeightedBinaries {
    fn score(&self, engine: &Engine, before: &LengthSnapshot, after: &LengthSnapshot) -> f64 {
        ClauseReduction.score(engine, before, after)
            + newly_binary_product(engine, before, after)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{cnf::CnfFormula, heuristic::RandomDecide, store::AdjacencyStore},
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
    fn test_gamma_table() {
        assert_eq!(gamma(2), 1.0);
        assert_eq!(gamma(3), 0.2);
        assert_eq!(gamma(6), 0.003);
        assert!(gamma(7) < gamma(6));
    }

    #[test]
    fn test_clause_reduction_counts_shrunk_clauses() {
        let mut e = engine(vec![vec![1, 2, 3], vec![-1, 2, 4], vec![2, 3, 4]]);
        let before = e.length_snapshot();
        e.decide(Lit::from(-1i32));
        let after = e.length_snapshot();
        // only (x1 v x2 v x3) shrank to a binary clause; (-x1 ...) became
        // satisfied and the third clause is untouched
        let s = ClauseReduction.score(&e, &before, &after);
        assert_eq!(s, gamma(2));
        e.backtrack();
        assert_eq!(ClauseReduction.score(&e, &before, &e.length_snapshot()), 0.0);
    }

    #[test]
    fn test_backbone_scores_only_new_binaries() {
        let mut e = engine(vec![vec![1, 2, 3], vec![-2, 4], vec![-3, 4, 5]]);
        let before = e.length_snapshot();
        e.decide(Lit::from(-1i32));
        let after = e.length_snapshot();
        // (x1 v x2 v x3) became binary; its remaining literals' complements
        // occur in the other two clauses
        let s = BackboneSearch.score(&e, &before, &after);
        assert_eq!(s, 2.0);
        // a pre-existing binary clause contributes nothing
        let none = engine(vec![vec![2, 4]]);
        let snap = none.length_snapshot();
        assert_eq!(BackboneSearch.score(&none, &snap, &snap), 0.0);
    }

    #[test]
    fn test_weighted_binaries_combines_signals() {
        let mut e = engine(vec![vec![1, 2, 3], vec![-2, 4], vec![-3, 4, 5]]);
        let before = e.length_snapshot();
        e.decide(Lit::from(-1i32));
        let after = e.length_snapshot();
        let w = WeightedBinaries.score(&e, &before, &after);
        let c = ClauseReduction.score(&e, &before, &after);
        let b = BackboneSearch.score(&e, &before, &after);
        assert_eq!(w, c + b);
    }
}
