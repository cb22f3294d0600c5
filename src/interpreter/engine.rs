//! Expression evaluation
//!
//! Post-order walk over [`Expr`]: both operands are evaluated before the
//! operator is applied, and an error from either operand is returned without
//! evaluating anything further. The walk keeps its own work stack, so a
//! left-deep chain of any length evaluates without deep recursion.
//!
//! # Safety
//!
//! All arithmetic uses checked math, so overflow (including `i64::MIN / -1`)
//! surfaces as [`ArithmeticError::Overflow`] rather than panicking or wrapping.

use crate::interpreter::errors::ArithmeticError;
use crate::parser::ast::{BinaryOp, Expr, Position};
use tracing::debug;

/// Evaluate an expression tree to its integer value
pub fn evaluate(expr: &Expr) -> Result<i64, ArithmeticError> {
    let value = evaluate_expr(expr)?;
    debug!(value, "evaluated expression");
    Ok(value)
}

/// One pending step of the post-order walk
enum Step<'a> {
    Eval(&'a Expr),
    Apply(BinaryOp, Position),
}

fn evaluate_expr(expr: &Expr) -> Result<i64, ArithmeticError> {
    let mut steps = vec![Step::Eval(expr)];
    let mut values: Vec<i64> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Eval(Expr::Literal { value, .. }) => values.push(*value),

            Step::Eval(Expr::Binary {
                left,
                op,
                right,
                position,
            }) => {
                // Pushed in reverse: left runs first, the operator last.
                steps.push(Step::Apply(*op, *position));
                steps.push(Step::Eval(right));
                steps.push(Step::Eval(left));
            }

            Step::Apply(op, position) => {
                let (Some(right), Some(left)) = (values.pop(), values.pop()) else {
                    unreachable!("both operands are evaluated before their operator");
                };
                values.push(apply_binary_op(op, left, right, position)?);
            }
        }
    }

    match values.as_slice() {
        [value] => Ok(*value),
        _ => unreachable!("a finished walk leaves exactly one value"),
    }
}

#[inline]
fn apply_binary_op(
    op: BinaryOp,
    left: i64,
    right: i64,
    position: Position,
) -> Result<i64, ArithmeticError> {
    let result = match op {
        BinaryOp::Add => left.checked_add(right),
        BinaryOp::Subtract => left.checked_sub(right),
        BinaryOp::Multiply => left.checked_mul(right),
        BinaryOp::Divide => {
            if right == 0 {
                return Err(ArithmeticError::DivisionByZero { position });
            }
            // Truncates toward zero.
            left.checked_div(right)
        }
    };

    result.ok_or_else(|| ArithmeticError::Overflow {
        operation: format!("{} {} {}", left, op, right),
        position,
    })
}
