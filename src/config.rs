//! Solver configuration and the command-line front end. All validation
//! happens here or at `Solver::build`, before any engine exists.

use {
    crate::types::SolverError,
    std::path::PathBuf,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StoreKind {
    AdjacencyList,
    Watched,
    Eager,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StrategyKind {
    Dpll,
    DpllLookAhead,
    Cdcl,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecideKind {
    Random,
    JeroslowWang,
    Vsids,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DiffKind {
    ClauseReduction,
    BackboneSearch,
    WeightedBinaries,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputFormat {
    Dimacs,
    Sexpr,
}

/// `Solver`'s parameters, with the command-line defaults.
#[derive(Clone, Debug)]
pub struct Config {
    pub store: StoreKind,
    /// wrap the chosen backend in the short-clause decorator
    pub short_clauses: bool,
    pub strategy: StrategyKind,
    pub decide: DecideKind,
    pub diff: DiffKind,
    /// restart budget multiplier for CDCL
    pub luby_reset_base: usize,
    /// learned-database cap growth per run
    pub cache_run_coef: f64,
    /// learned-database cap per variable
    pub cache_variable_coef: f64,
    /// literals forced, in order, before free search
    pub assumptions: Vec<i32>,
    /// input path; stdin when absent
    pub input: Option<PathBuf>,
    /// explicit input format; inferred from the extension when absent
    pub format: Option<InputFormat>,
    /// use the one-directional Tseitin encoder for S-expression input
    pub implication_encoding: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            store: StoreKind::AdjacencyList,
            short_clauses: false,
            strategy: StrategyKind::DpllLookAhead,
            decide: DecideKind::Random,
            diff: DiffKind::BackboneSearch,
            luby_reset_base: 100,
            cache_run_coef: 0.03,
            cache_variable_coef: 0.17,
            assumptions: Vec::new(),
            input: None,
            format: None,
            implication_encoding: false,
        }
    }
}

impl Config {
    /// parse command-line arguments (without the program name).
    pub fn from_args<I: Iterator<Item = String>>(args: I) -> Result<Config, SolverError> {
        let mut config = Config::default();
        let args: Vec<String> = args.collect();
        let mut i = 0;
        let bad = |what: &str| Err(SolverError::ParseError(format!("bad argument: {what}")));
        while i < args.len() {
            let arg = args[i].as_str();
            match arg {
                "--adjacency-list" => config.store = StoreKind::AdjacencyList,
                "--watched" => config.store = StoreKind::Watched,
                "--eager" => config.store = StoreKind::Eager,
                "--short-clauses" => config.short_clauses = true,
                "--dpll" => config.strategy = StrategyKind::Dpll,
                "--dpll-look-ahead" => config.strategy = StrategyKind::DpllLookAhead,
                "--cdcl" => config.strategy = StrategyKind::Cdcl,
                "--random-decisions" => config.decide = DecideKind::Random,
                "--static-jw" => config.decide = DecideKind::JeroslowWang,
                "--vsids" => config.decide = DecideKind::Vsids,
                "--crh" => config.diff = DiffKind::ClauseReduction,
                "--bsh" => config.diff = DiffKind::BackboneSearch,
                "--wbh" => config.diff = DiffKind::WeightedBinaries,
                "--dimacs" => config.format = Some(InputFormat::Dimacs),
                "--sexpr" => config.format = Some(InputFormat::Sexpr),
                "--implication" => config.implication_encoding = true,
                "--equivalence" => config.implication_encoding = false,
                "--luby-reset-base" | "--cache-run-coef" | "--cache-variable-coef" => {
                    i += 1;
                    let Some(value) = args.get(i) else {
                        return bad(arg);
                    };
                    match arg {
                        "--luby-reset-base" => match value.parse::<usize>() {
                            Ok(v) => config.luby_reset_base = v,
                            Err(_) => return bad(value),
                        },
                        "--cache-run-coef" => match value.parse::<f64>() {
                            Ok(v) => config.cache_run_coef = v,
                            Err(_) => return bad(value),
                        },
                        _ => match value.parse::<f64>() {
                            Ok(v) => config.cache_variable_coef = v,
                            Err(_) => return bad(value),
                        },
                    }
                }
                "--assumptions" => {
                    // the list may span arguments: --assumptions [1, -2, 3]
                    let mut text = String::new();
                    let mut closed = false;
                    i += 1;
                    if !args.get(i).is_some_and(|a| a.starts_with('[')) {
                        return bad("--assumptions expects [l1,l2,...]");
                    }
                    while i < args.len() {
                        text.push_str(&args[i]);
                        if args[i].ends_with(']') {
                            closed = true;
                            break;
                        }
                        i += 1;
                    }
                    if !closed {
                        return bad("--assumptions expects [l1,l2,...]");
                    }
                    let inner = text[1..text.len() - 1].replace(' ', "");
                    for part in inner.split(',').filter(|p| !p.is_empty()) {
                        match part.parse::<i32>() {
                            Ok(0) | Err(_) => return bad(part),
                            Ok(l) => config.assumptions.push(l),
                        }
                    }
                }
                _ if arg.starts_with('-') => return bad(arg),
                _ if config.input.is_none() => config.input = Some(PathBuf::from(arg)),
                _ => return bad(arg),
            }
            i += 1;
        }
        Ok(config)
    }

    /// the input format: explicit flag, or inferred from the extension
    /// (`.cnf` DIMACS, `.sat` S-expression). Mandatory for stdin input.
    pub fn input_format(&self) -> Result<InputFormat, SolverError> {
        if let Some(f) = self.format {
            return Ok(f);
        }
        match &self.input {
            None => Err(SolverError::Unsupported(
                "input format must be given for stdin (--dimacs or --sexpr)".to_string(),
            )),
            Some(path) => match path.extension().and_then(|e| e.to_str()) {
                Some("cnf") => Ok(InputFormat::Dimacs),
                Some("sat") => Ok(InputFormat::Sexpr),
                _ => Err(SolverError::Unsupported(format!(
                    "cannot infer input format of {}; use --dimacs or --sexpr",
                    path.display()
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, SolverError> {
        Config::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.store, StoreKind::AdjacencyList);
        assert_eq!(c.strategy, StrategyKind::DpllLookAhead);
        assert_eq!(c.decide, DecideKind::Random);
        assert_eq!(c.diff, DiffKind::BackboneSearch);
        assert_eq!(c.luby_reset_base, 100);
    }

    #[test]
    fn test_flag_parsing() {
        let c = parse(&[
            "--watched",
            "--cdcl",
            "--vsids",
            "--luby-reset-base",
            "64",
            "problem.cnf",
        ])
        .unwrap();
        assert_eq!(c.store, StoreKind::Watched);
        assert_eq!(c.strategy, StrategyKind::Cdcl);
        assert_eq!(c.decide, DecideKind::Vsids);
        assert_eq!(c.luby_reset_base, 64);
        assert_eq!(c.input_format().unwrap(), InputFormat::Dimacs);
    }

    #[test]
    fn test_assumption_list_spanning_args() {
        let c = parse(&["--assumptions", "[1,", "-2,", "3]"]).unwrap();
        assert_eq!(c.assumptions, vec![1, -2, 3]);
        assert!(parse(&["--assumptions", "1,2"]).is_err());
        assert!(parse(&["--assumptions", "[1,0]"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(parse(&["--no-such-flag"]).is_err());
    }

    #[test]
    fn test_format_inference() {
        assert_eq!(
            parse(&["f.sat"]).unwrap().input_format().unwrap(),
            InputFormat::Sexpr
        );
        assert!(parse(&["f.txt"]).unwrap().input_format().is_err());
        assert!(parse(&[]).unwrap().input_format().is_err());
        assert_eq!(
            parse(&["--dimacs"]).unwrap().input_format().unwrap(),
            InputFormat::Dimacs
        );
    }
}
