//! Module `sexpr` provides the parenthesized Boolean-formula dialect:
//! `(and f f)`, `(or f f)`, `(not v)` and named variables, lowered to CNF
//! through Tseitin-style encoding.

/// Tseitin-style encoders
pub mod tseitin;

pub use self::tseitin::{encode_to_cnf, EncodeIF, EquivalenceEncoder, ImplicationEncoder};

use crate::{cnf::CnfFormula, types::SolverError};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    LeftParen,
    RightParen,
    And,
    Or,
    Not,
    Variable(String),
}

/// Tokenize the dialect. Variable names are Latin letters optionally
/// followed by digits; anything else outside parentheses and whitespace is
/// an error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SolverError> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let finish_word = |word: &mut String, tokens: &mut Vec<Token>| {
        if word.is_empty() {
            return;
        }
        let w = std::mem::take(word);
        match w.as_str() {
            "and" => tokens.push(Token::And),
            "or" => tokens.push(Token::Or),
            "not" => tokens.push(Token::Not),
            _ => tokens.push(Token::Variable(w)),
        }
    };
    for c in input.chars() {
        match c {
            '(' => {
                finish_word(&mut word, &mut tokens);
                tokens.push(Token::LeftParen);
            }
            ')' => {
                finish_word(&mut word, &mut tokens);
                tokens.push(Token::RightParen);
            }
            'a'..='z' | 'A'..='Z' => word.push(c),
            '0'..='9' => {
                if word.is_empty() {
                    return Err(SolverError::ParseError(
                        "variable names cannot start with a digit".to_string(),
                    ));
                }
                word.push(c);
            }
            _ if c.is_whitespace() => finish_word(&mut word, &mut tokens),
            _ => {
                return Err(SolverError::ParseError(format!(
                    "unexpected character '{c}' in formula"
                )))
            }
        }
    }
    finish_word(&mut word, &mut tokens);
    Ok(tokens)
}

/// A Boolean formula tree. Negation is only admitted directly on
/// variables, as the dialect expects formulas in negation normal form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormulaNode {
    Var(String),
    Not(Box<FormulaNode>),
    And(Box<FormulaNode>, Box<FormulaNode>),
    Or(Box<FormulaNode>, Box<FormulaNode>),
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn next(&mut self) -> Result<Token, SolverError> {
        let t = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| SolverError::ParseError("unexpected end of formula".to_string()))?;
        self.pos += 1;
        Ok(t)
    }
    fn expect_right_paren(&mut self) -> Result<(), SolverError> {
        match self.next()? {
            Token::RightParen => Ok(()),
            t => Err(SolverError::ParseError(format!("expected ')', got {t:?}"))),
        }
    }
    fn formula(&mut self) -> Result<FormulaNode, SolverError> {
        match self.next()? {
            Token::Variable(name) => Ok(FormulaNode::Var(name)),
            Token::LeftParen => match self.next()? {
                Token::And => {
                    let left = self.formula()?;
                    let right = self.formula()?;
                    self.expect_right_paren()?;
                    Ok(FormulaNode::And(Box::new(left), Box::new(right)))
                }
                Token::Or => {
                    let left = self.formula()?;
                    let right = self.formula()?;
                    self.expect_right_paren()?;
                    Ok(FormulaNode::Or(Box::new(left), Box::new(right)))
                }
                Token::Not => match self.next()? {
                    Token::Variable(name) => {
                        self.expect_right_paren()?;
                        Ok(FormulaNode::Not(Box::new(FormulaNode::Var(name))))
                    }
                    t => Err(SolverError::ParseError(format!(
                        "'not' applies to a variable, got {t:?}"
                    ))),
                },
                t => Err(SolverError::ParseError(format!(
                    "expected and/or/not, got {t:?}"
                ))),
            },
            t => Err(SolverError::ParseError(format!("unexpected token {t:?}"))),
        }
    }
}

pub fn parse(tokens: Vec<Token>) -> Result<FormulaNode, SolverError> {
    let mut parser = Parser { tokens, pos: 0 };
    let node = parser.formula()?;
    if parser.pos != parser.tokens.len() {
        return Err(SolverError::ParseError(
            "trailing tokens after formula".to_string(),
        ));
    }
    Ok(node)
}

/// The whole pipeline: tokenize, parse, Tseitin-encode.
pub fn parse_to_cnf(input: &str, use_implications: bool) -> Result<CnfFormula, SolverError> {
    let node = parse(tokenize(input)?)?;
    Ok(encode_to_cnf(&node, use_implications))
}
