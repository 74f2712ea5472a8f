//! Broken-key selection for a round.
//!
//! The generator disables a random subset of calculator keys while a coarse
//! reachability heuristic certifies that the target is still attainable with
//! what remains. The heuristic is a deliberate over-approximation inherited
//! from the game's original tuning: it filters out obviously hopeless rounds
//! but does not prove an equation exists. The estimate formulas and the
//! required-working policy are preserved as-is.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One of the 16 calculator keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Digit(u8),
    Plus,
    Minus,
    Times,
    Divide,
    OpenParen,
    CloseParen,
}

/// Every key on the calculator, digits first.
pub const ALL_KEYS: [Key; 16] = [
    Key::Digit(0),
    Key::Digit(1),
    Key::Digit(2),
    Key::Digit(3),
    Key::Digit(4),
    Key::Digit(5),
    Key::Digit(6),
    Key::Digit(7),
    Key::Digit(8),
    Key::Digit(9),
    Key::Plus,
    Key::Minus,
    Key::Times,
    Key::Divide,
    Key::OpenParen,
    Key::CloseParen,
];

impl Key {
    pub fn symbol(self) -> char {
        match self {
            Key::Digit(d) => (b'0' + d) as char,
            Key::Plus => '+',
            Key::Minus => '-',
            Key::Times => '*',
            Key::Divide => '/',
            Key::OpenParen => '(',
            Key::CloseParen => ')',
        }
    }

    pub fn digit_value(self) -> Option<u8> {
        match self {
            Key::Digit(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_operator(self) -> bool {
        matches!(self, Key::Plus | Key::Minus | Key::Times | Key::Divide)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Targets at or below this keep the basic additive pair working.
const SMALL_TARGET_THRESHOLD: i64 = 50;
/// Retry budget; the loop terminates within this many attempts regardless of
/// random outcomes.
const MAX_ATTEMPTS: u32 = 10;

/// Keys that must never be disabled for this target. A coarse policy keyed
/// on target magnitude, not a solvability proof.
pub fn required_working_keys(target: i64) -> BTreeSet<Key> {
    if target <= SMALL_TARGET_THRESHOLD {
        BTreeSet::from([Key::Digit(1), Key::Plus])
    } else {
        BTreeSet::from([Key::Digit(2), Key::Times, Key::Plus])
    }
}

// Rough upper bound on values reachable with the given digits and operators:
// the max digit scaled up, the digit sum scaled up when '+' works, the max
// digit squared when '*' works with at least two digits.
fn estimate_max_reachable(digits: &[i64], operators: &[Key]) -> i64 {
    let max_digit = digits.iter().copied().max().unwrap_or(0);
    let mut estimate = max_digit * 10;

    if operators.contains(&Key::Plus) {
        estimate = estimate.max(digits.iter().sum::<i64>() * 5);
    }
    if operators.contains(&Key::Times) && digits.len() >= 2 {
        estimate = estimate.max(max_digit * max_digit);
    }

    estimate
}

/// Check whether the target can reasonably be reached with the keys that
/// stay enabled. Fails outright when no digit or no operator survives;
/// otherwise accepts iff the reachability estimate covers the target.
pub fn is_heuristically_solvable(target: i64, broken: &BTreeSet<Key>) -> bool {
    let digits: Vec<i64> = ALL_KEYS
        .iter()
        .filter(|k| !broken.contains(k))
        .filter_map(|k| k.digit_value().map(i64::from))
        .collect();
    let operators: Vec<Key> = ALL_KEYS
        .iter()
        .copied()
        .filter(|k| !broken.contains(k) && k.is_operator())
        .collect();

    if digits.is_empty() || operators.is_empty() {
        return false;
    }

    estimate_max_reachable(&digits, &operators) >= target
}

/// Pick up to `count` keys to disable for a round, keeping the target
/// heuristically reachable.
///
/// Bounded retry: each rejected sample shrinks `count` by one and burns one
/// attempt; when `count` reaches zero or the budget runs out, the round
/// degrades gracefully to a fully-enabled calculator (empty set). There is
/// no error path.
pub fn generate_broken_keys_with<R: Rng + ?Sized>(
    rng: &mut R,
    target: i64,
    count: usize,
) -> BTreeSet<Key> {
    let required = required_working_keys(target);
    let breakable: Vec<Key> = ALL_KEYS
        .iter()
        .copied()
        .filter(|k| !required.contains(k))
        .collect();

    let mut count = count;
    let mut attempts = 0;
    while count > 0 && attempts < MAX_ATTEMPTS {
        let take = count.min(breakable.len());
        let broken: BTreeSet<Key> = breakable.choose_multiple(rng, take).copied().collect();

        if is_heuristically_solvable(target, &broken) {
            tracing::debug!(target_number = target, ?broken, attempts, "broken keys chosen");
            return broken;
        }

        tracing::trace!(
            target_number = target,
            count,
            attempts,
            "heuristic rejected sample, retrying with one fewer key"
        );
        count -= 1;
        attempts += 1;
    }

    BTreeSet::new()
}

/// [`generate_broken_keys_with`] using the thread-local RNG.
pub fn generate_broken_keys(target: i64, count: usize) -> BTreeSet<Key> {
    generate_broken_keys_with(&mut rand::thread_rng(), target, count)
}
