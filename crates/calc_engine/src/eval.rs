//! Safe expression evaluation.
//!
//! The match below is the entire operator table: addition, subtraction,
//! multiplication, true division and unary negation. Because [`Expr`] is a
//! closed sum type there is no path by which player text can reach any other
//! operation, which is the safety property this module exists for.

use calc_ast::{BinOp, Expr};
use num_rational::BigRational;
use num_traits::Zero;

use crate::error::EvalError;

/// Evaluate a parsed equation to an exact rational value.
///
/// Division is exact (non-truncating); the only failure is a divisor that
/// evaluates to exactly zero.
pub fn evaluate(expr: &Expr) -> Result<BigRational, EvalError> {
    match expr {
        Expr::Number(n) => Ok(n.clone()),
        Expr::Neg(e) => Ok(-evaluate(e)?),
        Expr::Binary(op, l, r) => {
            let lhs = evaluate(l)?;
            let rhs = evaluate(r)?;
            match op {
                BinOp::Add => Ok(lhs + rhs),
                BinOp::Sub => Ok(lhs - rhs),
                BinOp::Mul => Ok(lhs * rhs),
                BinOp::Div => {
                    if rhs.is_zero() {
                        Err(EvalError::DivisionByZero)
                    } else {
                        Ok(lhs / rhs)
                    }
                }
            }
        }
    }
}
