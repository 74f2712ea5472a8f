//! Structural equation equivalence.
//!
//! The "five distinct equations" rule must not be gameable by trivial
//! reordering: `9+1` and `1+9` are the same solution, `10-5` and `5-10` are
//! not, and `6/2` is not the same solution as `2*3` even though both equal 6.

use crate::signature::EquationSignature;

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Decide whether two equation texts represent the same solution.
///
/// Fast path: identical after whitespace stripping. Otherwise both must
/// parse, and their operand multisets, operator multisets and canonical
/// forms must all match. Unparseable text is never equivalent to anything.
pub fn are_equations_equivalent(eq1: &str, eq2: &str) -> bool {
    if strip_whitespace(eq1) == strip_whitespace(eq2) {
        return true;
    }

    let (Some(sig1), Some(sig2)) = (
        EquationSignature::extract(eq1),
        EquationSignature::extract(eq2),
    ) else {
        return false;
    };

    // The multiset comparisons are an independent cross-check; for
    // well-formed input they never disagree with canonical-form equality.
    if sig1.operands != sig2.operands || sig1.operators != sig2.operators {
        return false;
    }

    sig1.canonical_form == sig2.canonical_form
}

/// True when the equations count as two distinct solutions.
pub fn are_equations_unique(eq1: &str, eq2: &str) -> bool {
    !are_equations_equivalent(eq1, eq2)
}
