use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Evaluation failures. The evaluator's operator set is closed, so the only
/// runtime failure is division by zero.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    #[error("Division by zero")]
    DivisionByZero,
}

/// Everything [`crate::validate`] can report. All of these are data handed
/// back to the host, never an abort; `ValueMismatch` is the one non-error
/// outcome (the equation computes fine, it just misses the target).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Equation is empty")]
    EmptyEquation,
    #[error("Invalid character '{0}' in equation")]
    IllegalCharacter(char),
    #[error("Unary plus is not allowed")]
    UnaryPlusNotAllowed,
    #[error("Syntax error: {0}")]
    SyntaxError(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid equation: {0}")]
    InvalidEquation(String),
    #[error("Result is {value:.2}, not {target}")]
    ValueMismatch { value: f64, target: i64 },
}

impl From<EvalError> for ValidationError {
    fn from(e: EvalError) -> Self {
        match e {
            EvalError::DivisionByZero => ValidationError::DivisionByZero,
        }
    }
}
