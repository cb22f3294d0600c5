//! Expression parser
//!
//! This module transforms expression text into an Abstract Syntax Tree (AST):
//! - [`scanner`]: Tokenization (characters → tokens), pulled on demand
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported Grammar
//!
//! Non-negative integer literals combined with `+`, `-`, `*` and `/`.
//! `*` and `/` bind tighter than `+` and `-`; all four are left-associative.
//! There are no parentheses, unary operators, identifiers or statements.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
pub mod parse;
pub mod scanner;
