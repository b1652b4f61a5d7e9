//! Module `solver` provides the search strategies and the top-level API
//! as a SAT solver.

/// assumption-consuming wrapper strategy
mod assume;
/// conflict-driven clause learning with restarts
mod cdcl;
/// plain recursive backtracking
mod dpll;
/// backtracking with look-ahead and autarky detection
mod lookahead;

pub use self::{assume::WithAssumptions, cdcl::Cdcl, dpll::Dpll, lookahead::DpllLookAhead};

use crate::{
    cnf::CnfFormula,
    config::{Config, DecideKind, DiffKind, StoreKind, StrategyKind},
    engine::Engine,
    heuristic::{Assumptions, DecideIF, JeroslowWang, RandomDecide, Vsids},
    lookahead::{BackboneSearch, ClauseReduction, DiffIF, WeightedBinaries},
    state::Stats,
    store::{AdjacencyStore, EagerStore, ShortClauseStore, StoreIF, WatchedStore},
    types::*,
};

/// Normal results returned by Solver.
#[derive(Debug, Eq, PartialEq)]
pub enum Certificate {
    /// It is satisfiable; the vec maps every assigned variable to its
    /// polarity, in variable order. Undefined variables are excluded.
    SAT(Vec<i32>),
    /// It is unsatisfiable.
    UNSAT,
}

/// The return type of `Solver::solve`.
pub type SolverResult = Result<Certificate, SolverError>;

/// Capability contract of a search strategy: drive an engine through
/// decide/propagate/analyze/backtrack cycles to a verdict.
pub trait SolveIF {
    /// whether this strategy adds learned clauses; rejected at build time
    /// against a backend that cannot accept them.
    fn learns_clauses(&self) -> bool {
        false
    }
    fn solve(&mut self, engine: &mut Engine) -> bool;
}

/// The SAT solver object: one engine, one strategy.
pub struct Solver {
    pub engine: Engine,
    strategy: Box<dyn SolveIF>,
}

fn build_store(config: &Config, num_vars: usize) -> Box<dyn StoreIF> {
    let base: Box<dyn StoreIF> = match config.store {
        StoreKind::AdjacencyList => Box::new(AdjacencyStore::new(num_vars)),
        StoreKind::Watched => Box::new(WatchedStore::new(num_vars)),
        StoreKind::Eager => Box::new(EagerStore::new(num_vars)),
    };
    if config.short_clauses {
        Box::new(ShortClauseStore::new(num_vars, base))
    } else {
        base
    }
}

fn build_heuristic(config: &Config, num_vars: usize) -> Box<dyn DecideIF> {
    match config.decide {
        DecideKind::Random => Box::new(RandomDecide::default()),
        DecideKind::JeroslowWang => Box::new(JeroslowWang::new(num_vars)),
        DecideKind::Vsids => Box::new(Vsids::new(num_vars)),
    }
}

fn build_diff(config: &Config) -> Box<dyn DiffIF> {
    match config.diff {
        DiffKind::ClauseReduction => Box::new(ClauseReduction),
        DiffKind::BackboneSearch => Box::new(BackboneSearch),
        DiffKind::WeightedBinaries => Box::new(WeightedBinaries),
    }
}

fn build_strategy(config: &Config) -> Box<dyn SolveIF> {
    let inner: Box<dyn SolveIF> = match config.strategy {
        StrategyKind::Dpll => Box::new(Dpll),
        StrategyKind::DpllLookAhead => Box::new(DpllLookAhead::new(build_diff(config))),
        StrategyKind::Cdcl => Box::new(Cdcl::new(
            config.luby_reset_base,
            config.cache_run_coef,
            config.cache_variable_coef,
        )),
    };
    if config.assumptions.is_empty() {
        inner
    } else {
        Box::new(WithAssumptions::new(
            inner,
            config.assumptions.iter().map(|l| Lit::from(*l)).collect(),
        ))
    }
}

impl Solver {
    /// Construct a solver over `cnf` from the configuration. A strategy
    /// that learns clauses combined with a backend that cannot accept them
    /// is rejected here, before any search starts.
    pub fn build(config: &Config, cnf: &CnfFormula) -> Result<Solver, SolverError> {
        let strategy = build_strategy(config);
        let engine = Engine::build(
            cnf,
            build_store(config, cnf.num_vars()),
            build_heuristic(config, cnf.num_vars()),
        );
        if strategy.learns_clauses() && !engine.supports_learning() {
            return Err(SolverError::Unsupported(
                "the chosen backend cannot accept learned clauses, but the strategy requires them"
                    .to_string(),
            ));
        }
        Ok(Solver { engine, strategy })
    }

    pub fn solve(&mut self) -> SolverResult {
        if self.strategy.solve(&mut self.engine) {
            Ok(Certificate::SAT(self.engine.model()))
        } else {
            Ok(Certificate::UNSAT)
        }
    }

    pub fn stats(&self) -> Stats {
        self.engine.stats()
    }
}

/// Example
///```
/// use sabre::solver::Certificate;
///
/// let v: Vec<Vec<i32>> = vec![vec![1, 2], vec![-1]];
/// assert!(matches!(Certificate::try_from(v), Ok(Certificate::SAT(_))));
/// assert_eq!(
///     Certificate::try_from(vec![vec![1], vec![-1]]),
///     Ok(Certificate::UNSAT)
/// );
///```
impl TryFrom<Vec<Vec<i32>>> for Certificate {
    type Error = SolverError;
    fn try_from(clauses: Vec<Vec<i32>>) -> SolverResult {
        let cnf = CnfFormula::from_vec_i32(clauses)?;
        Solver::build(&Config::default(), &cnf)?.solve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! sat {
        ($vec: expr, $should_be: pat) => {
            let result = Certificate::try_from($vec);
            assert!(matches!(result, $should_be), "{result:?}");
        };
    }

    #[test]
    fn test_on_memory_solving() {
        let v0: Vec<Vec<i32>> = vec![];
        sat!(v0, Ok(Certificate::SAT(_)));
        let v1: Vec<Vec<i32>> = vec![vec![]];
        sat!(v1, Ok(Certificate::UNSAT));
        sat!(vec![vec![1i32]], Ok(Certificate::SAT(_)));
        sat!(vec![vec![1i32], vec![-1]], Ok(Certificate::UNSAT));
        sat!(
            vec![vec![1i32, 2], vec![-1, 3], vec![1, -3], vec![-1, 2]],
            Ok(Certificate::SAT(_))
        );
        sat!(
            vec![vec![1i32, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]],
            Ok(Certificate::UNSAT)
        );
    }

    #[test]
    fn test_learning_strategy_needs_learning_backend() {
        let cnf = CnfFormula::from_vec_i32(vec![vec![1, 2], vec![-1, 2]]).unwrap();
        let config = Config {
            strategy: crate::config::StrategyKind::Cdcl,
            store: crate::config::StoreKind::Eager,
            ..Config::default()
        };
        assert!(matches!(
            Solver::build(&config, &cnf),
            Err(SolverError::Unsupported(_))
        ));
        // the short-clause decorator cannot rescue a non-learning inner backend
        let config = Config {
            short_clauses: true,
            ..config
        };
        assert!(matches!(
            Solver::build(&config, &cnf),
            Err(SolverError::Unsupported(_))
        ));
    }
}
