use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// Widening an INTEGER to a REAL must not silently lose digits, so values
/// beyond `2^53` in magnitude are rejected.
///
/// # Errors
/// Returns `RuntimeError::Overflow` if the value is too large.
///
/// # Example
/// ```
/// use glossa::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, 1).unwrap(), 42.0);
/// assert!(i64_to_f64_checked(MAX_SAFE_I64_INT + 1, 1).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64_checked(value: i64, line: usize) -> EvalResult<f64> {
    if value.unsigned_abs() > MAX_SAFE_I64_INT as u64 {
        return Err(RuntimeError::Overflow { line });
    }
    Ok(value as f64)
}

/// Safely converts an `f64` to `i64` by truncation toward zero.
///
/// Used by `Α_Μ`, which is defined as the integer part of its argument.
/// Non-finite and out-of-range values are rejected; the fractional part is
/// discarded.
///
/// # Errors
/// Returns `RuntimeError::Overflow` for non-finite or out-of-range values.
///
/// # Example
/// ```
/// use glossa::util::num::f64_trunc_to_i64;
///
/// assert_eq!(f64_trunc_to_i64(3.9, 1).unwrap(), 3);
/// assert_eq!(f64_trunc_to_i64(-3.9, 1).unwrap(), -3);
/// assert!(f64_trunc_to_i64(1e300, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_trunc_to_i64(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::Overflow { line });
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return Err(RuntimeError::Overflow { line });
    }
    Ok(truncated as i64)
}

/// Floor division of two integers, matching the reference interpreter's
/// `DIV`: the quotient is rounded toward negative infinity.
///
/// # Errors
/// Returns `RuntimeError::DivisionByZero` for a zero divisor and
/// `RuntimeError::Overflow` for `i64::MIN DIV -1`.
///
/// # Example
/// ```
/// use glossa::util::num::div_floor_checked;
///
/// assert_eq!(div_floor_checked(7, 2, 1).unwrap(), 3);
/// assert_eq!(div_floor_checked(-7, 2, 1).unwrap(), -4);
/// assert!(div_floor_checked(1, 0, 1).is_err());
/// ```
pub const fn div_floor_checked(lhs: i64, rhs: i64, line: usize) -> EvalResult<i64> {
    if rhs == 0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    let Some(quotient) = lhs.checked_div(rhs) else {
        return Err(RuntimeError::Overflow { line });
    };
    if lhs % rhs != 0 && (lhs < 0) != (rhs < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Floor modulo of two integers, matching the reference interpreter's
/// `MOD`: the result carries the sign of the divisor.
///
/// # Errors
/// Returns `RuntimeError::DivisionByZero` for a zero divisor.
///
/// # Example
/// ```
/// use glossa::util::num::mod_floor_checked;
///
/// assert_eq!(mod_floor_checked(7, 3, 1).unwrap(), 1);
/// assert_eq!(mod_floor_checked(-7, 3, 1).unwrap(), 2);
/// ```
pub const fn mod_floor_checked(lhs: i64, rhs: i64, line: usize) -> EvalResult<i64> {
    if rhs == 0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    let Some(remainder) = lhs.checked_rem(rhs) else {
        return Err(RuntimeError::Overflow { line });
    };
    if remainder != 0 && (remainder < 0) != (rhs < 0) {
        Ok(remainder + rhs)
    } else {
        Ok(remainder)
    }
}
