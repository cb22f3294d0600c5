//! # Introduction
//!
//! intcalc reads an integer arithmetic expression from a character stream
//! and computes its value.
//!
//! ## Execution pipeline
//!
//! ```text
//! Characters → Scanner → Parser → AST → Evaluator → i64
//! ```
//!
//! 1. [`parser::scanner`]: classifies characters into tokens, pulled one at a
//!    time by the parser.
//! 2. [`parser::parse`]: recursive descent over `+ - * /` with the usual
//!    precedence, producing an [`parser::ast::Expr`].
//! 3. [`interpreter::engine`]: post-order evaluation with checked arithmetic.
//!
//! Every stage returns a `Result`; nothing in the library exits the process.
//!
//! ```
//! let expr = intcalc::parse_str("2+3*4").unwrap();
//! assert_eq!(expr.to_string(), "(2 + (3 * 4))");
//! assert_eq!(intcalc::interpreter::engine::evaluate(&expr), Ok(14));
//! assert!(intcalc::evaluate_str("5/0").is_err());
//! ```

pub mod interpreter;
pub mod parser;

use interpreter::engine::evaluate;
use interpreter::errors::ArithmeticError;
use parser::ast::{Expr, Position};
use parser::parse::{ParseError, Parser};
use thiserror::Error;

/// Any error the full pipeline can produce
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

impl Error {
    pub fn position(&self) -> Position {
        match self {
            Error::Parse(err) => err.position(),
            Error::Arithmetic(err) => err.position(),
        }
    }
}

/// Parse `source` as one complete expression.
pub fn parse_str(source: &str) -> Result<Expr, ParseError> {
    Parser::from_reader(source.as_bytes()).parse()
}

/// Parse and evaluate `source`.
pub fn evaluate_str(source: &str) -> Result<i64, Error> {
    let expr = parse_str(source)?;
    Ok(evaluate(&expr)?)
}
