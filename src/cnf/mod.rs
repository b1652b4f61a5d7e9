//! Module `cnf` provides the CNF formula container consumed by the
//! engine, together with the DIMACS reader.

use {crate::types::SolverError, ahash::AHashMap};

/// A CNF formula: clauses as signed 1-based literals, the variable count,
/// and optional human-readable names/comments per variable (filled by the
/// S-expression pipeline, empty for DIMACS input).
#[derive(Clone, Debug, Default)]
pub struct CnfFormula {
    pub clauses: Vec<Vec<i32>>,
    pub num_vars: usize,
    pub var_names: AHashMap<usize, String>,
    pub var_comments: AHashMap<usize, String>,
}

impl CnfFormula {
    /// build a formula from clause vectors, validating literals.
    pub fn from_vec_i32(clauses: Vec<Vec<i32>>) -> Result<CnfFormula, SolverError> {
        let mut cnf = CnfFormula::default();
        for c in clauses {
            cnf.add_clause(c)?;
        }
        Ok(cnf)
    }
    pub fn add_clause(&mut self, lits: Vec<i32>) -> Result<(), SolverError> {
        for l in &lits {
            if *l == 0 {
                return Err(SolverError::InvalidLiteral);
            }
            self.num_vars = self.num_vars.max(l.unsigned_abs() as usize);
        }
        self.clauses.push(lits);
        Ok(())
    }
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }
    /// render in DIMACS format.
    pub fn dump_to_string(&self) -> String {
        let mut out = format!("p cnf {} {}\n", self.num_vars, self.clauses.len());
        for c in &self.clauses {
            for l in c {
                out.push_str(&format!("{l} "));
            }
            out.push_str("0\n");
        }
        out
    }
    /// Read a DIMACS CNF. The reader is lenient: `c` lines and the `p`
    /// header are skipped, a line starting with `%` terminates the file,
    /// and each clause line is read up to its closing `0`.
    pub fn parse_dimacs(input: &str) -> Result<CnfFormula, SolverError> {
        let mut cnf = CnfFormula::default();
        let mut header_vars = 0usize;
        for line in input.lines() {
            let line = line.trim();
            if line.starts_with('%') {
                break;
            }
            if line.is_empty() || line.starts_with('c') {
                continue;
            }
            if let Some(rest) = line.strip_prefix('p') {
                let fields = rest.split_whitespace().collect::<Vec<_>>();
                if let [_, nv, _] = fields.as_slice() {
                    header_vars = nv
                        .parse::<usize>()
                        .map_err(|_| SolverError::ParseError(format!("bad header: {line}")))?;
                }
                continue;
            }
            let mut lits = Vec::new();
            for part in line.split_whitespace() {
                if part == "0" {
                    break;
                }
                let l = part
                    .parse::<i32>()
                    .map_err(|_| SolverError::ParseError(format!("bad literal: {part}")))?;
                lits.push(l);
            }
            cnf.add_clause(lits)?;
        }
        cnf.num_vars = cnf.num_vars.max(header_vars);
        Ok(cnf)
    }
}
