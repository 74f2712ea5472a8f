use calc_ast::{BinOp, Expr};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::multispace0,
    combinator::{map, opt},
    multi::fold_many0,
    sequence::{delimited, pair, preceded},
    IResult,
};
use num_bigint::BigInt;
use num_rational::BigRational;

use crate::error::ParseError;

/// Convert a decimal string to BigRational.
/// Supports: "8.2" → 41/5, ".5" → 1/2, "8." → 8, "123" → 123
/// Algorithm: For "A.B", num = A*10^k + B, den = 10^k (where k = len(B))
fn decimal_to_rational(integer_part: &str, fractional_part: &str) -> BigRational {
    let k = fractional_part.len();

    if k == 0 {
        let n: BigInt = integer_part.parse().unwrap_or_else(|_| BigInt::from(0));
        return BigRational::from_integer(n);
    }

    let ten = BigInt::from(10);
    let mut denominator = BigInt::from(1);
    for _ in 0..k {
        denominator *= &ten;
    }

    // Integer part may be empty for ".5"
    let int_val: BigInt = if integer_part.is_empty() {
        BigInt::from(0)
    } else {
        integer_part.parse().unwrap_or_else(|_| BigInt::from(0))
    };

    let frac_val: BigInt = fractional_part.parse().unwrap_or_else(|_| BigInt::from(0));

    // numerator = integer_part * 10^k + fractional_part
    let numerator = int_val * &denominator + frac_val;

    // BigRational::new automatically reduces the fraction (gcd)
    BigRational::new(numerator, denominator)
}

// Parser for numeric literals (integers and decimals)
// Supports: 123, 8.2, .5, 8.
fn parse_number(input: &str) -> IResult<&str, Expr> {
    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    // Optional integer part, then optional (dot + fractional part)
    let (remaining, (int_part, maybe_frac)) = pair(
        take_while(is_digit),
        opt(pair(tag("."), take_while(is_digit))),
    )(input)?;

    let (int_str, frac_str) = match maybe_frac {
        Some((_, frac)) => (int_part, frac),
        None => (int_part, ""),
    };

    // Must have at least some digits somewhere; a lone "." is not a number
    if int_str.is_empty() && frac_str.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        )));
    }

    let rational = decimal_to_rational(int_str, frac_str);
    Ok((remaining, Expr::Number(rational)))
}

// Parser for parentheses
fn parse_parens(input: &str) -> IResult<&str, Expr> {
    delimited(
        preceded(multispace0, tag("(")),
        parse_expr,
        preceded(multispace0, tag(")")),
    )(input)
}

// Atom: a literal or a parenthesized sub-expression. There are no
// identifiers, functions or implicit products in the calculator grammar.
fn parse_atom(input: &str) -> IResult<&str, Expr> {
    preceded(multispace0, alt((parse_number, parse_parens)))(input)
}

// Unary minus, chainable: --5 parses as Neg(Neg(5)).
// There is deliberately no '+' branch here: unary plus is not part of the
// grammar, so "+2" never parses.
fn parse_unary(input: &str) -> IResult<&str, Expr> {
    alt((
        map(
            pair(preceded(multispace0, tag("-")), parse_unary),
            |(_, expr)| Expr::neg(expr),
        ),
        parse_atom,
    ))(input)
}

// Term - handles * and /, left-associative
fn parse_term(input: &str) -> IResult<&str, Expr> {
    let (input, init) = parse_unary(input)?;
    fold_many0(
        pair(
            preceded(multispace0, alt((tag("*"), tag("/")))),
            parse_unary,
        ),
        move || init.clone(),
        |acc, (op, val)| match op {
            "*" => Expr::binary(BinOp::Mul, acc, val),
            "/" => Expr::binary(BinOp::Div, acc, val),
            _ => unreachable!(),
        },
    )(input)
}

// Expr - handles + and -, left-associative
fn parse_expr(input: &str) -> IResult<&str, Expr> {
    let (input, init) = parse_term(input)?;
    fold_many0(
        pair(preceded(multispace0, alt((tag("+"), tag("-")))), parse_term),
        move || init.clone(),
        |acc, (op, val)| match op {
            "+" => Expr::binary(BinOp::Add, acc, val),
            "-" => Expr::binary(BinOp::Sub, acc, val),
            _ => unreachable!(),
        },
    )(input)
}

/// Parse an equation string into an AST.
///
/// Trailing input that the grammar cannot consume is an error, which is what
/// rejects implicit multiplication (`2(3)`) and stray operators (`2++3`).
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let (remaining, expr) =
        parse_expr(input).map_err(|e| ParseError::NomError(format!("{}", e)))?;

    let remaining = remaining.trim();
    if !remaining.is_empty() {
        return Err(ParseError::UnconsumedInput(remaining.to_string()));
    }

    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse("123").unwrap(), Expr::int(123));
    }

    #[test]
    fn test_parse_decimal_literals() {
        let cases = [
            ("8.2", (41, 5)),
            ("0.5", (1, 2)),
            (".5", (1, 2)),
            ("8.", (8, 1)),
            ("0.125", (1, 8)),
            ("1.25", (5, 4)),
            ("100.001", (100001, 1000)),
            ("1.50", (3, 2)),
        ];

        for (input, (n, d)) in cases {
            let expected = Expr::Number(BigRational::new(BigInt::from(n), BigInt::from(d)));
            let got = parse(input).unwrap_or_else(|e| panic!("failed to parse {}: {}", input, e));
            assert_eq!(got, expected, "input {}", input);
        }
    }

    #[test]
    fn test_parse_precedence() {
        // 2+3*4 is 2 + (3*4)
        assert_eq!(
            parse("2+3*4").unwrap(),
            Expr::add(Expr::int(2), Expr::mul(Expr::int(3), Expr::int(4)))
        );
    }

    #[test]
    fn test_parse_parens() {
        // (2+3)*4
        assert_eq!(
            parse("(2+3)*4").unwrap(),
            Expr::mul(Expr::add(Expr::int(2), Expr::int(3)), Expr::int(4))
        );
    }

    #[test]
    fn test_left_associativity() {
        // 10-3-2 is (10-3)-2
        assert_eq!(
            parse("10-3-2").unwrap(),
            Expr::sub(Expr::sub(Expr::int(10), Expr::int(3)), Expr::int(2))
        );
        // 24/4/2 is (24/4)/2
        assert_eq!(
            parse("24/4/2").unwrap(),
            Expr::div(Expr::div(Expr::int(24), Expr::int(4)), Expr::int(2))
        );
    }

    #[test]
    fn test_parse_unary_minus() {
        assert_eq!(parse("-5").unwrap(), Expr::neg(Expr::int(5)));
        assert_eq!(
            parse("--5").unwrap(),
            Expr::neg(Expr::neg(Expr::int(5)))
        );
        // unary minus binds inside a product: 3*-2
        assert_eq!(
            parse("3*-2").unwrap(),
            Expr::mul(Expr::int(3), Expr::neg(Expr::int(2)))
        );
        // negated group: -(5+2)
        assert_eq!(
            parse("-(5+2)").unwrap(),
            Expr::neg(Expr::add(Expr::int(5), Expr::int(2)))
        );
    }

    #[test]
    fn test_whitespace_tolerated() {
        assert_eq!(
            parse("  ( 2 + 3 ) * 4 ").unwrap(),
            Expr::mul(Expr::add(Expr::int(2), Expr::int(3)), Expr::int(4))
        );
    }

    #[test]
    fn test_no_implicit_multiplication() {
        assert!(matches!(
            parse("2(3)"),
            Err(ParseError::UnconsumedInput(_))
        ));
    }

    #[test]
    fn test_unary_plus_rejected() {
        assert!(parse("+2").is_err());
        assert!(parse("(+2)+3").is_err());
        assert!(parse("2++3").is_err());
    }

    #[test]
    fn test_unbalanced_parens_rejected() {
        assert!(parse("(2+3").is_err());
        assert!(parse("2+3)").is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn test_lone_dot_rejected() {
        assert!(parse(".").is_err());
        assert!(parse("1+.").is_err());
    }
}
