//! Core logic for the broken-calculator puzzle.
//!
//! Three services, all pure synchronous functions over their inputs:
//!
//! - **Validation**: turn untrusted player text into a verified numeric
//!   result ([`validate`]), with a precise failure taxonomy
//!   ([`ValidationError`]).
//! - **Equivalence**: decide whether two equations are the same solution up
//!   to commutative reordering ([`are_equations_equivalent`]).
//! - **Key generation**: pick which calculator keys to disable for a round
//!   while a reachability heuristic certifies the target stays attainable
//!   ([`generate_broken_keys`]).
//!
//! The host application owns the target number, the accepted-equation list
//! and the broken-key set; this crate only computes.

pub mod broken_keys;
pub mod canonical;
pub mod equivalence;
pub mod error;
pub mod eval;
pub mod signature;
pub mod validate;

pub use broken_keys::{
    generate_broken_keys, generate_broken_keys_with, is_heuristically_solvable,
    required_working_keys, Key, ALL_KEYS,
};
pub use canonical::canonical_form;
pub use equivalence::{are_equations_equivalent, are_equations_unique};
pub use error::{EvalError, ValidationError};
pub use eval::evaluate;
pub use signature::{signature_report, EquationSignature, OpKind, SignatureReport};
pub use validate::{validate, ValidationResult};
