use crate::number::decimal_string;
use num_bigint::BigInt;
use num_rational::BigRational;
use std::fmt;

/// The four binary operators a calculator equation may use.
///
/// The set is closed: the evaluator matches on it exhaustively, so no
/// operation outside these four (plus unary negation) can ever be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
        }
    }

    /// `+` and `*` commute; `-` and `/` are order-sensitive.
    pub fn is_commutative(self) -> bool {
        matches!(self, BinOp::Add | BinOp::Mul)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An equation AST: a tagged sum over numeric literals, unary negation and
/// the four binary operators. Owned tree, no sharing, no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Number(BigRational),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    // Helper constructors for cleaner code
    pub fn num(n: BigRational) -> Self {
        Expr::Number(n)
    }

    pub fn int(n: i64) -> Self {
        Expr::Number(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn neg(expr: Expr) -> Self {
        Expr::Neg(Box::new(expr))
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Expr::binary(BinOp::Add, lhs, rhs)
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Expr::binary(BinOp::Sub, lhs, rhs)
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Expr::binary(BinOp::Mul, lhs, rhs)
    }

    pub fn div(lhs: Expr, rhs: Expr) -> Self {
        Expr::binary(BinOp::Div, lhs, rhs)
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary(BinOp::Add | BinOp::Sub, _, _) => 1,
            Expr::Binary(BinOp::Mul | BinOp::Div, _, _) => 2,
            Expr::Neg(_) => 3,
            Expr::Number(_) => 4,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", decimal_string(n)),
            Expr::Neg(e) => {
                write!(f, "-")?;
                if e.precedence() < self.precedence() {
                    write!(f, "({})", e)
                } else {
                    write!(f, "{}", e)
                }
            }
            Expr::Binary(op, l, r) => {
                let my_prec = self.precedence();
                if l.precedence() < my_prec {
                    write!(f, "({})", l)?;
                } else {
                    write!(f, "{}", l)?;
                }
                write!(f, " {} ", op)?;
                // Non-commutative operators are left-associative, so the RHS
                // needs parens already at equal precedence: a - (b - c).
                let needs_parens = if op.is_commutative() {
                    r.precedence() < my_prec
                } else {
                    r.precedence() <= my_prec
                };
                if needs_parens {
                    write!(f, "({})", r)
                } else {
                    write!(f, "{}", r)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_precedence() {
        let e = Expr::add(Expr::int(1), Expr::mul(Expr::int(2), Expr::int(3)));
        assert_eq!(format!("{}", e), "1 + 2 * 3");

        let e = Expr::mul(Expr::add(Expr::int(1), Expr::int(2)), Expr::int(3));
        assert_eq!(format!("{}", e), "(1 + 2) * 3");
    }

    #[test]
    fn test_display_right_assoc_parens() {
        // a - (b - c) must keep its parens; (a - b) - c must not gain any
        let e = Expr::sub(Expr::int(9), Expr::sub(Expr::int(5), Expr::int(2)));
        assert_eq!(format!("{}", e), "9 - (5 - 2)");

        let e = Expr::sub(Expr::sub(Expr::int(9), Expr::int(5)), Expr::int(2));
        assert_eq!(format!("{}", e), "9 - 5 - 2");
    }

    #[test]
    fn test_display_neg() {
        let e = Expr::neg(Expr::add(Expr::int(1), Expr::int(2)));
        assert_eq!(format!("{}", e), "-(1 + 2)");

        let e = Expr::neg(Expr::int(5));
        assert_eq!(format!("{}", e), "-5");
    }

    #[test]
    fn test_display_decimal() {
        let e = Expr::num(BigRational::new(BigInt::from(1), BigInt::from(2)));
        assert_eq!(format!("{}", e), "0.5");
    }
}
