pub mod expression;
pub mod number;

pub use expression::{BinOp, Expr};
pub use number::decimal_string;
