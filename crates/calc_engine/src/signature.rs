//! Equation signatures: the triple of operand multiset, operator multiset
//! and canonical form that drives the equivalence check.

use calc_ast::{decimal_string, BinOp, Expr};
use num_rational::BigRational;
use num_traits::ToPrimitive;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::canonical::canonicalize;
use crate::eval::evaluate;

/// Operator kinds counted in a signature. Unary negation is a distinct kind
/// so that `-5*8` and `5*8` never share an operator multiset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
}

impl OpKind {
    pub fn name(self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Sub => "sub",
            OpKind::Mul => "mul",
            OpKind::Div => "div",
            OpKind::Neg => "neg",
        }
    }
}

impl From<BinOp> for OpKind {
    fn from(op: BinOp) -> Self {
        match op {
            BinOp::Add => OpKind::Add,
            BinOp::Sub => OpKind::Sub,
            BinOp::Mul => OpKind::Mul,
            BinOp::Div => OpKind::Div,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural fingerprint of one equation. Two signatures compare equal iff
/// all three fields do; the multiset checks are an independent cross-check on
/// canonical-form equality and must never disagree with it for well-formed
/// input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationSignature {
    /// Operand values with multiplicity (exact rationals, so `1.50` ≡ `1.5`)
    pub operands: FxHashMap<BigRational, usize>,
    /// Operator kinds with multiplicity, unary negation included
    pub operators: FxHashMap<OpKind, usize>,
    pub canonical_form: String,
}

impl EquationSignature {
    /// Extract the signature of an equation, or `None` when it doesn't parse.
    pub fn extract(equation: &str) -> Option<Self> {
        let expr = calc_parser::parse(equation).ok()?;
        let mut operands = FxHashMap::default();
        let mut operators = FxHashMap::default();
        collect(&expr, &mut operands, &mut operators);
        Some(EquationSignature {
            operands,
            operators,
            canonical_form: canonicalize(&expr),
        })
    }
}

fn collect(
    expr: &Expr,
    operands: &mut FxHashMap<BigRational, usize>,
    operators: &mut FxHashMap<OpKind, usize>,
) {
    match expr {
        Expr::Number(n) => *operands.entry(n.clone()).or_insert(0) += 1,
        Expr::Neg(e) => {
            *operators.entry(OpKind::Neg).or_insert(0) += 1;
            collect(e, operands, operators);
        }
        Expr::Binary(op, l, r) => {
            *operators.entry(OpKind::from(*op)).or_insert(0) += 1;
            collect(l, operands, operators);
            collect(r, operands, operators);
        }
    }
}

/// Serializable signature dump for debugging and host-side analysis.
///
/// Maps are keyed by decimal operand text / operator name and sorted, so the
/// JSON output is stable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SignatureReport {
    pub equation: String,
    pub operands: BTreeMap<String, usize>,
    pub operators: BTreeMap<String, usize>,
    pub canonical_form: String,
    /// Numeric value when the equation parses and evaluates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Build a [`SignatureReport`] for an equation. Unparseable input yields an
/// empty report (empty maps, empty canonical form, no value).
pub fn signature_report(equation: &str) -> SignatureReport {
    let Ok(expr) = calc_parser::parse(equation) else {
        return SignatureReport {
            equation: equation.to_string(),
            operands: BTreeMap::new(),
            operators: BTreeMap::new(),
            canonical_form: String::new(),
            value: None,
        };
    };

    let mut operands = FxHashMap::default();
    let mut operators = FxHashMap::default();
    collect(&expr, &mut operands, &mut operators);
    let sig = EquationSignature {
        operands,
        operators,
        canonical_form: canonicalize(&expr),
    };
    let value = evaluate(&expr).ok().and_then(|v| v.to_f64());

    SignatureReport {
        equation: equation.to_string(),
        operands: sig
            .operands
            .iter()
            .map(|(k, v)| (decimal_string(k), *v))
            .collect(),
        operators: sig
            .operators
            .iter()
            .map(|(k, v)| (k.name().to_string(), *v))
            .collect(),
        canonical_form: sig.canonical_form,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn rat(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    #[test]
    fn test_extract_counts_operands_and_operators() {
        let sig = EquationSignature::extract("9+1+9").unwrap();
        assert_eq!(sig.operands.get(&rat(9)), Some(&2));
        assert_eq!(sig.operands.get(&rat(1)), Some(&1));
        assert_eq!(sig.operators.get(&OpKind::Add), Some(&2));
        assert_eq!(sig.canonical_form, "(1+9+9)");
    }

    #[test]
    fn test_negation_is_a_distinct_operator() {
        let sig = EquationSignature::extract("--5").unwrap();
        assert_eq!(sig.operators.get(&OpKind::Neg), Some(&2));
        assert_eq!(sig.operands.get(&rat(5)), Some(&1));
    }

    #[test]
    fn test_fractional_operands_unify() {
        let a = EquationSignature::extract("1.50+2").unwrap();
        let b = EquationSignature::extract("1.5+2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_extract_fails_on_bad_input() {
        assert!(EquationSignature::extract("2++3").is_none());
        assert!(EquationSignature::extract("").is_none());
    }

    #[test]
    fn test_report_roundtrips_through_json() {
        let report = signature_report("3+2*4");
        assert_eq!(report.canonical_form, "((2*4)+3)");
        assert_eq!(report.value, Some(11.0));
        assert_eq!(report.operators.get("add"), Some(&1));
        assert_eq!(report.operators.get("mul"), Some(&1));

        let json = serde_json::to_string(&report).unwrap();
        let back: SignatureReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_report_for_unparseable_input_is_empty() {
        let report = signature_report("2@3");
        assert!(report.operands.is_empty());
        assert!(report.operators.is_empty());
        assert_eq!(report.canonical_form, "");
        assert_eq!(report.value, None);
    }
}
