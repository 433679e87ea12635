//! Binary evaluation over text operands.
//!
//! Operands travel through the calculator as the strings the user typed, so
//! nothing is rounded until both sides of an operation are known. Parsing to
//! `f64` happens here and nowhere else in the state machine.

use super::Operator;
use thiserror::Error;

/// Why a binary operation could not produce a displayable number.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// An operand was not a finite number.
    #[error("operand `{0}` is not a finite number")]
    InvalidOperand(String),
    /// The right operand of a division was zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The operation overflowed to infinity.
    #[error("result is not a finite number")]
    Overflow,
}

/// Evaluate `lhs op rhs` and return the result as plain decimal text.
///
/// No rounding is applied; the result carries the full precision of the
/// `f64` computation and is only shortened by the display formatter.
pub fn evaluate(lhs: &str, op: Operator, rhs: &str) -> Result<String, EvaluationError> {
    let x = parse_operand(lhs)?;
    let y = parse_operand(rhs)?;

    if op == Operator::Divide && y == 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }

    let value = op.apply(x, y);
    if !value.is_finite() {
        return Err(EvaluationError::Overflow);
    }

    Ok(plain_decimal(value))
}

/// Parse an operand, rejecting anything that is not a finite number.
///
/// Partial entries such as `"0."` or `"-0."` are valid operands.
pub(crate) fn parse_operand(text: &str) -> Result<f64, EvaluationError> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| EvaluationError::InvalidOperand(text.to_string()))
}

/// Render a number as the shortest decimal text that parses back to it.
///
/// Never uses exponent notation. Negative zero renders as `"0"`.
pub fn plain_decimal(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}
