//! Tseitin-style encoding of formula trees: every connective gets a gate
//! variable, every gate a handful of clauses, and the root gate is forced
//! true by a final unit clause. Two encoders: *equivalence* emits the full
//! biconditional clause set; *implication* emits only the gate ⇒ inputs
//! direction, which preserves satisfiability for the dialect's
//! negation-normal formulas with fewer clauses.

use {
    super::FormulaNode,
    crate::cnf::CnfFormula,
    ahash::AHashMap,
};

/// Gate-variable bookkeeping shared by both encoders.
#[derive(Debug, Default)]
struct GateTable {
    clauses: Vec<Vec<i32>>,
    names: AHashMap<String, usize>,
    comments: AHashMap<usize, String>,
    next_var: usize,
}

impl GateTable {
    fn fresh(&mut self) -> usize {
        self.next_var += 1;
        self.next_var
    }
    fn var(&mut self, name: &str) -> i32 {
        if let Some(idx) = self.names.get(name) {
            return *idx as i32;
        }
        let idx = self.fresh();
        self.names.insert(name.to_string(), idx);
        self.comments.insert(idx, format!("Original variable {name}"));
        idx as i32
    }
    fn into_cnf(mut self, root: i32) -> CnfFormula {
        self.clauses.push(vec![root]);
        let mut cnf = CnfFormula::from_vec_i32(self.clauses).expect("encoder produced a zero literal");
        cnf.num_vars = cnf.num_vars.max(self.next_var);
        for (name, idx) in self.names {
            cnf.var_names.insert(idx, name);
        }
        cnf.var_comments = self.comments;
        cnf
    }
}

/// Capability contract of a Tseitin encoder: return the gate literal of
/// each connective over the gate literals of its inputs.
pub trait EncodeIF {
    fn var(&mut self, name: &str) -> i32;
    fn not(&mut self, a: i32) -> i32;
    fn and(&mut self, a: i32, b: i32) -> i32;
    fn or(&mut self, a: i32, b: i32) -> i32;
    fn finish(self: Box<Self>, root: i32) -> CnfFormula;
}

#[derive(Debug, Default)]
pub struct ImplicationEncoder {
    table: GateTable,
}

impl EncodeIF for ImplicationEncoder {
    fn var(&mut self, name: &str) -> i32 {
        self.table.var(name)
    }
    fn not(&mut self, a: i32) -> i32 {
        let c = self.table.fresh() as i32;
        self.table.comments.insert(c as usize, format!("Gate variable: NOT {a}"));
        self.table.clauses.push(vec![-c, -a]);
        c
    }
    fn and(&mut self, a: i32, b: i32) -> i32 {
        let c = self.table.fresh() as i32;
        self.table
            .comments
            .insert(c as usize, format!("Gate variable: {a} AND {b}"));
        self.table.clauses.push(vec![-c, a]);
        self.table.clauses.push(vec![-c, b]);
        c
    }
    fn or(&mut self, a: i32, b: i32) -> i32 {
        let c = self.table.fresh() as i32;
        self.table
            .comments
            .insert(c as usize, format!("Gate variable: {a} OR {b}"));
        self.table.clauses.push(vec![-c, a, b]);
        c
    }
    fn finish(self: Box<Self>, root: i32) -> CnfFormula {
        self.table.into_cnf(root)
    }
}

#[derive(Debug, Default)]
pub struct EquivalenceEncoder {
    table: GateTable,
}

impl EncodeIF for EquivalenceEncoder {
    fn var(&mut self, name: &str) -> i32 {
        self.table.var(name)
    }
    fn not(&mut self, a: i32) -> i32 {
        let c = self.table.fresh() as i32;
        self.table.comments.insert(c as usize, format!("Gate variable: NOT {a}"));
        self.table.clauses.push(vec![-c, -a]);
        self.table.clauses.push(vec![c, a]);
        c
    }
    fn and(&mut self, a: i32, b: i32) -> i32 {
        let c = self.table.fresh() as i32;
        self.table
            .comments
            .insert(c as usize, format!("Gate variable: {a} AND {b}"));
        self.table.clauses.push(vec![-c, a]);
        self.table.clauses.push(vec![-c, b]);
        self.table.clauses.push(vec![c, -a, -b]);
        c
    }
    fn or(&mut self, a: i32, b: i32) -> i32 {
        let c = self.table.fresh() as i32;
        self.table
            .comments
            .insert(c as usize, format!("Gate variable: {a} OR {b}"));
        self.table.clauses.push(vec![-c, a, b]);
        self.table.clauses.push(vec![c, -a]);
        self.table.clauses.push(vec![c, -b]);
        c
    }
    fn finish(self: Box<Self>, root: i32) -> CnfFormula {
        self.table.into_cnf(root)
    }
}

fn walk(node: &FormulaNode, enc: &mut dyn EncodeIF) -> i32 {
    match node {
        FormulaNode::Var(name) => enc.var(name),
        FormulaNode::Not(x) => {
            let a = walk(x, enc);
            enc.not(a)
        }
        FormulaNode::And(l, r) => {
            let a = walk(l, enc);
            let b = walk(r, enc);
            enc.and(a, b)
        }
        FormulaNode::Or(l, r) => {
            let a = walk(l, enc);
            let b = walk(r, enc);
            enc.or(a, b)
        }
    }
}

/// Lower a formula tree to CNF with the chosen encoder, appending the
/// root-gate unit clause.
pub fn encode_to_cnf(node: &FormulaNode, use_implications: bool) -> CnfFormula {
    let mut enc: Box<dyn EncodeIF> = if use_implications {
        Box::new(ImplicationEncoder::default())
    } else {
        Box::new(EquivalenceEncoder::default())
    };
    let root = walk(node, enc.as_mut());
    enc.finish(root)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{sexpr, solver::Certificate},
    };

    fn cnf(input: &str, implications: bool) -> CnfFormula {
        sexpr::parse_to_cnf(input, implications).unwrap()
    }

    #[test]
    fn test_gate_numbering_and_names() {
        let f = cnf("(and x (or y x))", false);
        // x=1, y=2, or-gate=3, and-gate=4, root unit forces 4
        assert_eq!(f.num_vars, 4);
        assert_eq!(f.var_names.get(&1).map(String::as_str), Some("x"));
        assert_eq!(f.var_names.get(&2).map(String::as_str), Some("y"));
        assert_eq!(f.clauses.last(), Some(&vec![4]));
        assert!(f.var_comments[&3].contains("OR"));
        assert!(f.var_comments[&4].contains("AND"));
    }

    #[test]
    fn test_implication_encoder_is_leaner() {
        let eq = cnf("(and x (or y (not z)))", false);
        let im = cnf("(and x (or y (not z)))", true);
        assert!(im.num_clauses() < eq.num_clauses());
        assert_eq!(im.num_vars, eq.num_vars);
    }

    #[test]
    fn test_encodings_preserve_satisfiability() {
        for implications in [false, true] {
            let sat = cnf("(or x (not x))", implications);
            assert!(matches!(
                Certificate::try_from(sat.clauses),
                Ok(Certificate::SAT(_))
            ));
            let unsat = cnf("(and x (not x))", implications);
            assert!(matches!(
                Certificate::try_from(unsat.clauses),
                Ok(Certificate::UNSAT)
            ));
            let deeper = cnf("(and (or a b) (and (not a) (not b)))", implications);
            assert!(matches!(
                Certificate::try_from(deeper.clauses),
                Ok(Certificate::UNSAT)
            ));
        }
    }
}
