use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
    util::num::{div_floor_checked, mod_floor_checked},
};

/// Applies a binary operator to two already-evaluated values.
///
/// Mixed arithmetic follows the language rule: if either operand is REAL
/// the result is REAL, otherwise INTEGER. `/` always produces REAL,
/// `DIV`/`MOD` demand two integers. Integer arithmetic is checked —
/// overflow is a runtime error, never a wrap.
///
/// `ΚΑΙ`/`Η` here are the strict forms; the expression evaluator
/// short-circuits before reaching this function, so these paths only run
/// for operands that were both evaluated anyway.
///
/// # Errors
/// `IncompatibleOperands` for combinations outside the rules above,
/// `DivisionByZero` and `Overflow` from the arithmetic itself.
pub fn apply(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    match op {
        BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul => {
            arithmetic(op, left, right, line)
        },
        BinaryOperator::Div => divide(left, right, line),
        BinaryOperator::IntDiv => {
            let (a, b) = both_integers(op, left, right, line)?;
            Ok(Value::Integer(div_floor_checked(a, b, line)?))
        },
        BinaryOperator::Mod => {
            let (a, b) = both_integers(op, left, right, line)?;
            Ok(Value::Integer(mod_floor_checked(a, b, line)?))
        },
        BinaryOperator::Eq => Ok(Value::Bool(equals(op, left, right, line)?)),
        BinaryOperator::NotEq => Ok(Value::Bool(!equals(op, left, right, line)?)),
        BinaryOperator::Less => {
            Ok(Value::Bool(compare(op, left, right, line)? == Ordering::Less))
        },
        BinaryOperator::LessEq => {
            Ok(Value::Bool(compare(op, left, right, line)? != Ordering::Greater))
        },
        BinaryOperator::Greater => {
            Ok(Value::Bool(compare(op, left, right, line)? == Ordering::Greater))
        },
        BinaryOperator::GreaterEq => {
            Ok(Value::Bool(compare(op, left, right, line)? != Ordering::Less))
        },
        BinaryOperator::And => {
            Ok(Value::Bool(left.as_bool(line)? && right.as_bool(line)?))
        },
        BinaryOperator::Or => {
            Ok(Value::Bool(left.as_bool(line)? || right.as_bool(line)?))
        },
    }
}

/// `+`, `-`, `*` with integer/real promotion and checked integer math.
fn arithmetic(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            let result = match op {
                BinaryOperator::Add => a.checked_add(*b),
                BinaryOperator::Sub => a.checked_sub(*b),
                _ => a.checked_mul(*b),
            };
            result.map(Value::Integer)
                  .ok_or(RuntimeError::Overflow { line })
        },
        (a, b) if a.is_numeric() && b.is_numeric() => {
            let (x, y) = (a.as_real(line)?, b.as_real(line)?);
            let result = match op {
                BinaryOperator::Add => x + y,
                BinaryOperator::Sub => x - y,
                _ => x * y,
            };
            Ok(Value::Real(result))
        },
        _ => Err(incompatible(op, line)),
    }
}

/// `/` — always real, and the divisor must not be zero.
fn divide(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    if !left.is_numeric() || !right.is_numeric() {
        return Err(incompatible(BinaryOperator::Div, line));
    }
    let divisor = right.as_real(line)?;
    if divisor == 0.0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    Ok(Value::Real(left.as_real(line)? / divisor))
}

/// `DIV` and `MOD` accept nothing but two integers.
fn both_integers(op: BinaryOperator, left: &Value, right: &Value, line: usize)
                 -> EvalResult<(i64, i64)> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok((*a, *b)),
        _ => Err(incompatible(op, line)),
    }
}

/// Equality over matching kinds: exact for integers, promoted for mixed
/// numerics, plain for strings and booleans.
fn equals(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<bool> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a == b),
        (Value::Text(a), Value::Text(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (a, b) if a.is_numeric() && b.is_numeric() => {
            Ok(a.as_real(line)? == b.as_real(line)?)
        },
        _ => Err(incompatible(op, line)),
    }
}

/// Ordering over numbers (promoted when mixed) and strings
/// (lexicographic). Booleans and cross-kind pairs do not order.
fn compare(op: BinaryOperator, left: &Value, right: &Value, line: usize)
           -> EvalResult<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
        (a, b) if a.is_numeric() && b.is_numeric() => {
            let (x, y) = (a.as_real(line)?, b.as_real(line)?);
            x.partial_cmp(&y).ok_or_else(|| incompatible(op, line))
        },
        _ => Err(incompatible(op, line)),
    }
}

fn incompatible(op: BinaryOperator, line: usize) -> RuntimeError {
    RuntimeError::IncompatibleOperands { op: op.to_string(),
                                         line }
}
