//! Expression evaluation
//!
//! - [`engine`]: Tree-walking evaluator
//! - [`errors`]: Evaluation error types

pub mod engine;
pub mod errors;
