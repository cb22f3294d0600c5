//! Recursive descent parser
//!
//! This module provides the [`Parser`] struct, the parse error type, and one
//! method per grammar rule:
//!
//! ```text
//! expression     := additive
//! additive       := multiplicative ( ('+' | '-') multiplicative )*
//! multiplicative := primary ( ('*' | '/') primary )*
//! primary        := INTEGER
//! ```
//!
//! # Implementation
//!
//! Each binary level parses its left operand with the next-tighter rule, then
//! loops: it reads one token, and if the token belongs to the level's operator
//! set it parses a right operand and folds the pair into a new
//! [`Expr::Binary`] whose left side is everything parsed so far. Any other
//! token is handed back with [`Scanner::backup`] and the level returns. The
//! fold makes every level left-associative, and the nesting of levels gives
//! `*` and `/` tighter binding than `+` and `-`.

use crate::parser::ast::*;
use crate::parser::scanner::{ScanError, Scanner, Token, TokenKind};
use std::io::BufRead;
use thiserror::Error;
use tracing::debug;

/// Parser error type
#[derive(Debug, Error)]
pub enum ParseError {
    /// A token that no grammar rule accepts at this point
    #[error("Syntax error at {position}: {message}")]
    Syntax { message: String, position: Position },

    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Syntax { position, .. } => *position,
            ParseError::Scan(err) => err.position(),
        }
    }

    fn unexpected(expected: &str, found: &Token) -> Self {
        ParseError::Syntax {
            message: format!("Expected {}, found {}", expected, found),
            position: found.position,
        }
    }
}

/// Recursive descent parser for integer expressions
pub struct Parser<R> {
    scanner: Scanner<R>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(scanner: Scanner<R>) -> Self {
        Self { scanner }
    }

    pub fn from_reader(reader: R) -> Self {
        Self::new(Scanner::new(reader))
    }

    /// Parse a single expression spanning the whole input.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;

        let token = self.scanner.next_token()?;
        if token.kind != TokenKind::EndOfInput {
            return Err(ParseError::unexpected("operator or end of input", &token));
        }

        debug!(%expr, "parsed expression");
        Ok(expr)
    }

    /// Parse expression (top-level entry point)
    ///
    /// Stops at the first token that cannot continue the expression and leaves
    /// it unread.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_additive()
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let token = self.scanner.next_token()?;
            let op = match token.kind {
                TokenKind::Add => BinaryOp::Add,
                TokenKind::Subtract => BinaryOp::Subtract,
                _ => {
                    self.scanner.backup();
                    return Ok(left);
                }
            };

            let right = self.parse_multiplicative()?;
            left = Expr::binary(left, op, right);
        }
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_primary()?;

        loop {
            let token = self.scanner.next_token()?;
            let op = match token.kind {
                TokenKind::Multiply => BinaryOp::Multiply,
                TokenKind::Divide => BinaryOp::Divide,
                _ => {
                    self.scanner.backup();
                    return Ok(left);
                }
            };

            let right = self.parse_primary()?;
            left = Expr::binary(left, op, right);
        }
    }

    /// Parse primary: an integer literal
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.scanner.next_token()?;
        if token.kind != TokenKind::IntegerLiteral {
            return Err(ParseError::unexpected("integer literal", &token));
        }

        // Digit runs wider than i64 are rejected rather than wrapped.
        let value = token.lexeme.parse::<i64>().map_err(|_| ParseError::Syntax {
            message: format!("Integer literal out of range: {}", token.lexeme),
            position: token.position,
        })?;

        Ok(Expr::literal(value, token.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Expr, ParseError> {
        Parser::from_reader(source.as_bytes()).parse()
    }

    fn syntax_message(source: &str) -> String {
        match parse(source) {
            Err(ParseError::Syntax { message, .. }) => message,
            other => panic!("Expected syntax error for {:?}, got {:?}", source, other),
        }
    }

    #[test]
    fn test_parse_single_literal() {
        let expr = parse("42").unwrap();
        assert_eq!(expr, Expr::literal(42, Position::new(1, 1)));
    }

    #[test]
    fn test_parse_precedence() {
        let expr = parse("2+3*4").unwrap();
        assert_eq!(expr.to_string(), "(2 + (3 * 4))");

        let expr = parse("2*3+4").unwrap();
        assert_eq!(expr.to_string(), "((2 * 3) + 4)");
    }

    #[test]
    fn test_parse_left_associative() {
        assert_eq!(parse("10-2-3").unwrap().to_string(), "((10 - 2) - 3)");
        assert_eq!(parse("64/4/2").unwrap().to_string(), "((64 / 4) / 2)");
        assert_eq!(
            parse("1+2*3*4-5/6").unwrap().to_string(),
            "((1 + ((2 * 3) * 4)) - (5 / 6))"
        );
    }

    #[test]
    fn test_parse_tree_shape() {
        match &parse("7 - 1 * 2").unwrap() {
            Expr::Binary {
                left, op, right, ..
            } => {
                assert_eq!(*op, BinaryOp::Subtract);
                assert!(matches!(**left, Expr::Literal { value: 7, .. }));
                assert!(matches!(
                    **right,
                    Expr::Binary {
                        op: BinaryOp::Multiply,
                        ..
                    }
                ));
            }
            other => panic!("Expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_position_is_leftmost() {
        let expr = parse("  8 /\n2 + 1").unwrap();
        assert_eq!(expr.position(), Position::new(1, 3));
    }

    #[test]
    fn test_empty_input_is_syntax_error() {
        let message = syntax_message("");
        assert_eq!(message, "Expected integer literal, found end of input");
        syntax_message("   \n  ");
    }

    #[test]
    fn test_leading_operator_is_syntax_error() {
        let err = parse("+5").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert_eq!(err.position(), Position::new(1, 1));
    }

    #[test]
    fn test_trailing_operator_is_syntax_error() {
        let err = parse("5+").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert_eq!(err.position(), Position::new(1, 3));

        syntax_message("5 * 3 /");
    }

    #[test]
    fn test_illegal_character_is_syntax_error() {
        assert_eq!(
            syntax_message("1 $ 2"),
            "Expected operator or end of input, found illegal character '$'"
        );
        assert_eq!(
            syntax_message("1 + x"),
            "Expected integer literal, found illegal character 'x'"
        );
    }

    #[test]
    fn test_trailing_literal_is_syntax_error() {
        let err = parse("2 3").unwrap_err();
        assert_eq!(err.position(), Position::new(1, 3));
    }

    #[test]
    fn test_literal_out_of_range() {
        assert_eq!(
            syntax_message("1 + 9223372036854775808"),
            "Integer literal out of range: 9223372036854775808"
        );
        assert_eq!(
            parse("9223372036854775807").unwrap(),
            Expr::literal(i64::MAX, Position::new(1, 1))
        );
    }

    #[test]
    fn test_parse_expression_leaves_trailing_token() {
        let mut parser = Parser::from_reader("1 + 2 $ 3".as_bytes());
        let expr = parser.parse_expression().unwrap();
        assert_eq!(expr.to_string(), "(1 + 2)");

        let next = parser.scanner.next_token().unwrap();
        assert_eq!(next.kind, TokenKind::Illegal);
        assert_eq!(next.lexeme, "$");
    }
}
