//! Exact truth test for equations like `6-3=3` or `11=2+9`.
//!
//! Both sides are parsed with `nom` (`x` and `/` bind tighter than `+` and `-`, a number may
//! carry one unary sign) and evaluated as reduced `i128` fractions, so `1/3x3=1` holds and
//! `7/2=3` does not. Anything that cannot be evaluated exactly is not a true equation.

use nom::{
    character::complete::{digit1, one_of},
    combinator::opt,
    IResult, Parser,
};

use crate::board::normalize_equation;
use crate::errors::EquationError;

type PResult<'a, O> = IResult<&'a str, O, Box<EquationError>>;

/// A reduced fraction with a positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ratio {
    num: i128,
    den: i128,
}

impl Ratio {
    const fn integer(num: i128) -> Ratio {
        Ratio { num, den: 1 }
    }

    fn new(num: i128, den: i128) -> Result<Ratio, EquationError> {
        if den == 0 {
            return Err(EquationError::DivisionByZero);
        }
        let g = i128::try_from(gcd(num.unsigned_abs(), den.unsigned_abs())).map_err(|_| EquationError::Overflow)?;
        let (num, den) = (num / g, den / g);
        if den < 0 {
            Ok(Ratio { num: checked(num.checked_neg())?, den: checked(den.checked_neg())? })
        } else {
            Ok(Ratio { num, den })
        }
    }

    fn checked_add(self, rhs: Ratio) -> Result<Ratio, EquationError> {
        let left = checked(self.num.checked_mul(rhs.den))?;
        let right = checked(rhs.num.checked_mul(self.den))?;
        Ratio::new(checked(left.checked_add(right))?, checked(self.den.checked_mul(rhs.den))?)
    }

    fn checked_sub(self, rhs: Ratio) -> Result<Ratio, EquationError> {
        self.checked_add(rhs.checked_neg()?)
    }

    fn checked_mul(self, rhs: Ratio) -> Result<Ratio, EquationError> {
        Ratio::new(checked(self.num.checked_mul(rhs.num))?, checked(self.den.checked_mul(rhs.den))?)
    }

    fn checked_div(self, rhs: Ratio) -> Result<Ratio, EquationError> {
        if rhs.num == 0 {
            return Err(EquationError::DivisionByZero);
        }
        Ratio::new(checked(self.num.checked_mul(rhs.den))?, checked(self.den.checked_mul(rhs.num))?)
    }

    fn checked_neg(self) -> Result<Ratio, EquationError> {
        Ok(Ratio { num: checked(self.num.checked_neg())?, den: self.den })
    }
}

fn checked(value: Option<i128>) -> Result<i128, EquationError> {
    value.ok_or(EquationError::Overflow)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn fail<T>(err: EquationError) -> Result<T, nom::Err<Box<EquationError>>> {
    Err(nom::Err::Failure(Box::new(err)))
}

// === Grammar ===

fn number(input: &str) -> PResult<'_, Ratio> {
    let (rest, digits) = digit1.parse(input)?;
    if digits.len() > 1 && digits.starts_with('0') {
        return fail(EquationError::LeadingZero { number: digits.to_string() });
    }
    match digits.parse::<i128>() {
        Ok(n) => Ok((rest, Ratio::integer(n))),
        Err(_) => fail(EquationError::Overflow),
    }
}

fn factor(input: &str) -> PResult<'_, Ratio> {
    let (rest, sign) = opt(one_of("+-")).parse(input)?;
    let (rest, value) = number(rest)?;
    match sign {
        Some('-') => value.checked_neg().map(|v| (rest, v)).or_else(fail),
        _ => Ok((rest, value)),
    }
}

/// A left-associative chain `operand (op operand)*`. Once an operator has been read the
/// operand after it is mandatory.
fn chain<'a>(
    input: &'a str,
    ops: &'static str,
    operand: fn(&'a str) -> PResult<'a, Ratio>,
    apply: fn(char, Ratio, Ratio) -> Result<Ratio, EquationError>,
) -> PResult<'a, Ratio> {
    let (mut input, mut acc) = operand(input)?;
    loop {
        let next: PResult<'a, char> = one_of(ops).parse(input);
        let (rest, op) = match next {
            Ok(found) => found,
            Err(nom::Err::Error(_)) => return Ok((input, acc)),
            Err(e) => return Err(e),
        };
        if (op == '+' || op == '-') && rest.starts_with(op) {
            return fail(EquationError::DoubledSign { sign: op });
        }
        let (rest, rhs) = match operand(rest) {
            Ok(found) => found,
            Err(nom::Err::Error(_)) => return fail(EquationError::Syntax { rest: input.to_string() }),
            Err(e) => return Err(e),
        };
        acc = match apply(op, acc, rhs) {
            Ok(value) => value,
            Err(e) => return fail(e),
        };
        input = rest;
    }
}

fn term(input: &str) -> PResult<'_, Ratio> {
    chain(input, "x/", factor, |op, a, b| if op == 'x' { a.checked_mul(b) } else { a.checked_div(b) })
}

fn expr(input: &str) -> PResult<'_, Ratio> {
    chain(input, "+-", term, |op, a, b| if op == '+' { a.checked_add(b) } else { a.checked_sub(b) })
}

fn evaluate_side(side: &str) -> Result<Ratio, EquationError> {
    match expr(side) {
        Ok(("", value)) => Ok(value),
        Ok((rest, _)) => Err(EquationError::Syntax { rest: rest.to_string() }),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(*e),
        Err(nom::Err::Incomplete(_)) => Err(EquationError::Syntax { rest: side.to_string() }),
    }
}

/// Evaluate both sides of `equation` and compare them.
///
/// Whitespace is ignored and `*`/`×` read as `x`.
///
/// # Errors
/// Returns an [`EquationError`] when the text is not a single `=` between two well-formed
/// expressions, or when a side cannot be evaluated exactly.
pub fn evaluate_equation(equation: &str) -> Result<bool, EquationError> {
    let compact = normalize_equation(equation);
    let mut sides = compact.split('=');
    let (Some(lhs), Some(rhs)) = (sides.next(), sides.next()) else {
        return Err(EquationError::MissingEquals);
    };
    if sides.next().is_some() {
        return Err(EquationError::ExtraEquals);
    }
    Ok(evaluate_side(lhs)? == evaluate_side(rhs)?)
}

/// Whether `equation` is a true equation. Malformed input is simply not true.
pub fn is_true_equation(equation: &str) -> bool {
    evaluate_equation(equation).unwrap_or(false)
}
