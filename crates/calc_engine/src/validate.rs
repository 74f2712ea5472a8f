//! Equation validation against a round target.
//!
//! Checks run in a fixed order: empty text, illegal characters, the textual
//! unary-plus guard, parse, evaluate, target comparison. Each stage rejects
//! with its own [`ValidationError`], so the host can tell the player exactly
//! what went wrong.

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, ValidationError};
use crate::eval::evaluate;

/// Relative tolerance of the target comparison, matching `math.isclose`.
/// Absorbs float rounding introduced by the final `f64` conversion.
const REL_TOL: f64 = 1e-9;
const ABS_TOL: f64 = 0.0;

/// What the host renders after a submit.
///
/// Exactly one of (`valid` with a value) or (`!valid` with an error) holds;
/// `value` is also populated on a mismatch, since the equation did compute.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl ValidationResult {
    fn rejected(error: ValidationError) -> Self {
        ValidationResult {
            valid: false,
            error: Some(error),
            value: None,
        }
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.') || c.is_whitespace()
}

// A '+' is unary iff the nearest preceding non-whitespace character is
// nothing (start of text) or '('. Those are the only positions the guard
// covers; '2 + 3' is fine.
fn has_unary_plus(text: &str) -> bool {
    let mut prev = None;
    for c in text.chars() {
        if c == '+' && matches!(prev, None | Some('(')) {
            return true;
        }
        if !c.is_whitespace() {
            prev = Some(c);
        }
    }
    false
}

// math.isclose: |a - b| <= max(rel * max(|a|, |b|), abs)
fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::max(REL_TOL * f64::max(a.abs(), b.abs()), ABS_TOL)
}

/// Validate a player-submitted equation against the round target.
pub fn validate(equation: &str, target: i64) -> ValidationResult {
    let equation = equation.trim();
    if equation.is_empty() {
        return ValidationResult::rejected(ValidationError::EmptyEquation);
    }
    if let Some(c) = equation.chars().find(|c| !is_allowed_char(*c)) {
        return ValidationResult::rejected(ValidationError::IllegalCharacter(c));
    }
    if has_unary_plus(equation) {
        return ValidationResult::rejected(ValidationError::UnaryPlusNotAllowed);
    }

    let expr = match calc_parser::parse(equation) {
        Ok(expr) => expr,
        Err(e) => return ValidationResult::rejected(ValidationError::SyntaxError(e.to_string())),
    };

    match evaluate(&expr) {
        Ok(exact) => {
            let value = exact.to_f64().unwrap_or(f64::NAN);
            if approx_eq(value, target as f64) {
                tracing::debug!(equation, target_number = target, value, "equation accepted");
                ValidationResult {
                    valid: true,
                    error: None,
                    value: Some(value),
                }
            } else {
                tracing::debug!(equation, target_number = target, value, "value mismatch");
                ValidationResult {
                    valid: false,
                    error: Some(ValidationError::ValueMismatch { value, target }),
                    value: Some(value),
                }
            }
        }
        Err(EvalError::DivisionByZero) => {
            ValidationResult::rejected(ValidationError::DivisionByZero)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_equation() {
        let r = validate("2+3*4", 14);
        assert!(r.valid);
        assert_eq!(r.error, None);
        assert_eq!(r.value, Some(14.0));
    }

    #[test]
    fn test_parenthesized_equation() {
        let r = validate("(2+3)*4", 20);
        assert!(r.valid);
        assert_eq!(r.value, Some(20.0));
    }

    #[test]
    fn test_empty() {
        let r = validate("   ", 10);
        assert_eq!(r.error, Some(ValidationError::EmptyEquation));
        assert!(!r.valid);
        assert_eq!(r.value, None);
    }

    #[test]
    fn test_illegal_character() {
        let r = validate("2@3", 5);
        assert_eq!(r.error, Some(ValidationError::IllegalCharacter('@')));
    }

    #[test]
    fn test_unary_plus_positions() {
        assert_eq!(
            validate("+2+3", 5).error,
            Some(ValidationError::UnaryPlusNotAllowed)
        );
        assert_eq!(
            validate("(+2)+3", 5).error,
            Some(ValidationError::UnaryPlusNotAllowed)
        );
        assert_eq!(
            validate("( +2)+3", 5).error,
            Some(ValidationError::UnaryPlusNotAllowed)
        );
        // an infix plus with spaces around it is not unary
        assert!(validate("2 + 3", 5).valid);
    }

    #[test]
    fn test_syntax_error() {
        let r = validate("2++3", 5);
        assert!(matches!(r.error, Some(ValidationError::SyntaxError(_))));

        let r = validate("2(3)", 6);
        assert!(matches!(r.error, Some(ValidationError::SyntaxError(_))));
    }

    #[test]
    fn test_division_by_zero() {
        let r = validate("5/0", 5);
        assert_eq!(r.error, Some(ValidationError::DivisionByZero));
        assert_eq!(r.value, None);
    }

    #[test]
    fn test_value_mismatch_keeps_value() {
        let r = validate("2+3*4", 15);
        assert!(!r.valid);
        assert_eq!(r.value, Some(14.0));
        assert_eq!(
            r.error.unwrap().to_string(),
            "Result is 14.00, not 15"
        );
    }

    #[test]
    fn test_exact_division() {
        let r = validate("10/4*2", 5);
        assert!(r.valid);
        assert_eq!(r.value, Some(5.0));
    }

    #[test]
    fn test_negative_result() {
        let r = validate("-5+8", 3);
        assert!(r.valid);

        let r = validate("2-10", -8);
        assert!(r.valid);
    }

    #[test]
    fn test_serde_round_trip() {
        let r = validate("2+3*4", 15);
        let json = serde_json::to_string(&r).unwrap();
        let back: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);

        // accepted results serialize without an error field
        let ok = validate("2+3", 5);
        let json = serde_json::to_string(&ok).unwrap();
        assert!(!json.contains("error"));
    }
}
