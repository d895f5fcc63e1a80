#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use super::parsers::{BinOp, Expr, parser};
use crate::error::{GradingError, Result};

/// Intermediate value while evaluating an expression. Integer arithmetic
/// stays exact until a decimal operand shows up.
#[derive(Debug, Clone, Copy)]
enum Number {
    /// An exact integer
    Int(i64),
    /// A floating point value
    Float(f64),
}

impl Number {
    /// Widens to floating point.
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

/// Clamps an interpreted score into `[0, max]`.
pub fn clamp(value: i64, max: u32) -> u32 {
    value.clamp(0, i64::from(max)) as u32
}

/// Whether `input` is entered relative to the maximum or as an expression,
/// in which case the evaluated number is worth echoing back.
pub fn is_derived(input: &str) -> bool {
    let input = input.trim();
    input.starts_with('%') || input.starts_with('-')
}

/// Turns a line typed at a score prompt into a raw score.
///
/// * blank: the maximum
/// * `%expr`: arithmetic over integers, decimals and `max`, truncated toward
///   zero
/// * negative integer: that many points below the maximum
/// * anything else: an absolute integer score
///
/// The result is not clamped; see [`clamp`].
pub fn interpret_score(input: &str, max: u32) -> Result<i64> {
    let input = input.trim();

    if input.is_empty() {
        return Ok(i64::from(max));
    }

    if let Some(expression) = input.strip_prefix('%') {
        return evaluate_expression(expression, max);
    }

    let value: i64 = input
        .parse()
        .map_err(|_| GradingError::Format(input.to_string()))?;

    if value < 0 {
        value
            .checked_add(i64::from(max))
            .ok_or_else(|| GradingError::Format(input.to_string()))
    } else {
        Ok(value)
    }
}

/// Parses and evaluates the text after a leading `%`.
pub fn evaluate_expression(expression: &str, max: u32) -> Result<i64> {
    let expression_error = |reason: String| GradingError::Expression {
        input: expression.to_string(),
        reason,
    };

    let tree = parser::expression(expression).map_err(|e| expression_error(e.to_string()))?;
    match evaluate(&tree, max).map_err(|reason| expression_error(reason.to_string()))? {
        Number::Int(i) => Ok(i),
        Number::Float(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
        Number::Float(f) => Err(expression_error(format!("{f} is not a usable score"))),
    }
}

/// Evaluates an expression tree with `max` bound to the item's maximum.
fn evaluate(expr: &Expr, max: u32) -> Result<Number, &'static str> {
    Ok(match expr {
        Expr::Int(i) => Number::Int(*i),
        Expr::Decimal(f) => Number::Float(*f),
        Expr::Max => Number::Int(i64::from(max)),
        Expr::Neg(inner) => match evaluate(inner, max)? {
            Number::Int(i) => Number::Int(i.checked_neg().ok_or("integer overflow")?),
            Number::Float(f) => Number::Float(-f),
        },
        Expr::Binary(lhs, op, rhs) => {
            apply(evaluate(lhs, max)?, *op, evaluate(rhs, max)?)?
        }
    })
}

/// Applies a binary operator. Integer division rounds toward negative
/// infinity.
fn apply(lhs: Number, op: BinOp, rhs: Number) -> Result<Number, &'static str> {
    if let (Number::Int(a), Number::Int(b)) = (lhs, rhs) {
        let result = match op {
            BinOp::Add => a.checked_add(b),
            BinOp::Sub => a.checked_sub(b),
            BinOp::Mul => a.checked_mul(b),
            BinOp::Div => {
                if b == 0 {
                    return Err("division by zero");
                }
                a.checked_div(b).map(|q| {
                    if a % b != 0 && ((a < 0) != (b < 0)) {
                        q - 1
                    } else {
                        q
                    }
                })
            }
        };
        return result.map(Number::Int).ok_or("integer overflow");
    }

    let (a, b) = (lhs.as_f64(), rhs.as_f64());
    Ok(Number::Float(match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if b == 0.0 {
                return Err("division by zero");
            }
            a / b
        }
    }))
}
