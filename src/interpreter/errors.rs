//! Evaluation error types
//!
//! This module defines [`ArithmeticError`], which covers every way evaluating
//! a well-formed tree can fail (as opposed to parse errors or read errors).
//! The first error met during the walk halts evaluation and is returned as is.

use crate::parser::ast::Position;
use thiserror::Error;

/// Errors that can occur during evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// Right operand of `/` evaluated to zero
    #[error("Division by zero at {position}")]
    DivisionByZero { position: Position },

    /// Result does not fit in a 64-bit signed integer
    #[error("Integer overflow in operation: {operation} at {position}")]
    Overflow {
        operation: String,
        position: Position,
    },
}

impl ArithmeticError {
    pub fn position(&self) -> Position {
        match self {
            ArithmeticError::DivisionByZero { position } => *position,
            ArithmeticError::Overflow { position, .. } => *position,
        }
    }
}
