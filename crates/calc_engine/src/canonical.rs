//! Canonical string forms for structural equation comparison.
//!
//! Two equations get the same canonical form iff they are the same equation
//! up to commutative reordering of `+` and `*`. Examples:
//!
//! - `"9+1+9"` → `"(1+9+9)"`
//! - `"9+9+1"` → `"(1+9+9)"` (same as above)
//! - `"5*2+3"` → `"((2*5)+3)"`
//! - `"3+2*5"` → `"((2*5)+3)"` (same as above)
//! - `"10-5"`  → `"(10-5)"` but `"5-10"` → `"(5-10)"` (order kept)

use calc_ast::{decimal_string, BinOp, Expr};

/// Canonicalize an equation string.
///
/// Text that does not parse gets a degenerate canonical form: the input with
/// all whitespace stripped. Equivalence checks therefore never fail, they
/// just compare unequal.
pub fn canonical_form(equation: &str) -> String {
    match calc_parser::parse(equation) {
        Ok(expr) => canonicalize(&expr),
        Err(_) => equation.chars().filter(|c| !c.is_whitespace()).collect(),
    }
}

/// Canonicalize a parsed equation, bottom-up.
pub(crate) fn canonicalize(expr: &Expr) -> String {
    match expr {
        Expr::Number(n) => decimal_string(n),
        Expr::Neg(e) => format!("(-{})", canonicalize(e)),
        Expr::Binary(op, _, _) if op.is_commutative() => {
            // Flatten the maximal same-operator run, then sort the operand
            // strings: sorting encodes commutativity, flattening makes
            // 3-or-more-way sums compare equal however the parser nested them.
            let mut operands = Vec::new();
            collect_operands(*op, expr, &mut operands);
            operands.sort();
            format!("({})", operands.join(&op.symbol().to_string()))
        }
        Expr::Binary(op, l, r) => {
            format!("({}{}{})", canonicalize(l), op.symbol(), canonicalize(r))
        }
    }
}

// Collect every operand reachable through a chain of the same operator,
// stopping at a different operator or a leaf.
fn collect_operands(op: BinOp, expr: &Expr, out: &mut Vec<String>) {
    match expr {
        Expr::Binary(inner, l, r) if *inner == op => {
            collect_operands(op, l, out);
            collect_operands(op, r, out);
        }
        other => out.push(canonicalize(other)),
    }
}
