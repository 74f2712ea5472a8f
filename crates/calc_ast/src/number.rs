//! Decimal text rendering for exact rational values.
//!
//! Calculator literals only ever carry power-of-ten denominators, so their
//! decimal expansion terminates and the minimal expansion is a faithful,
//! re-parseable spelling. This is the inverse of the parser's
//! `decimal_to_rational`.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Render a rational as its minimal terminating decimal expansion.
///
/// `1/2` → `"0.5"`, `41/5` → `"8.2"`, `-5/4` → `"-1.25"`, `8/1` → `"8"`.
/// A reduced denominator with a prime factor other than 2 or 5 has no
/// terminating expansion; those fall back to the exact `numer/denom` text.
pub fn decimal_string(n: &BigRational) -> String {
    if n.is_integer() {
        return n.to_integer().to_string();
    }

    // Strip factors of 2 and 5 from the reduced denominator
    let two = BigInt::from(2);
    let five = BigInt::from(5);
    let mut den = n.denom().clone();
    let mut twos = 0usize;
    let mut fives = 0usize;
    while (&den % &two).is_zero() {
        den /= &two;
        twos += 1;
    }
    while (&den % &five).is_zero() {
        den /= &five;
        fives += 1;
    }
    if !den.is_one() {
        return n.to_string();
    }

    // Scale to an integer over 10^k; k is minimal, so no trailing zeros
    let k = twos.max(fives);
    let ten = BigInt::from(10);
    let mut scale = BigInt::one();
    for _ in 0..k {
        scale *= &ten;
    }
    let scaled: BigInt = n.numer() * &scale / n.denom();

    let sign = if scaled.is_negative() { "-" } else { "" };
    let digits = scaled.abs().to_string();
    if digits.len() > k {
        let split = digits.len() - k;
        format!("{}{}.{}", sign, &digits[..split], &digits[split..])
    } else {
        format!("{}0.{:0>width$}", sign, digits, width = k)
    }
}
