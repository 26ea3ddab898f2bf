use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
    util::num::f64_trunc_to_i64,
};

/// Type alias for builtin function handlers.
///
/// Every builtin of the language is unary and numeric: it receives the
/// single evaluated argument and the call's line number.
pub type BuiltinFn = fn(&Value, usize) -> EvalResult<Value>;

struct BuiltinDef {
    name: &'static str,
    func: BuiltinFn,
}

/// The fixed built-in library. These names shadow user subprograms: a
/// declared function called `ΗΜ` is simply unreachable.
static BUILTIN_TABLE: &[BuiltinDef] = &[
    BuiltinDef { name: "Α_Μ", func: trunc },
    BuiltinDef { name: "Α_Τ", func: abs_value },
    BuiltinDef { name: "Ε", func: exp_e },
    BuiltinDef { name: "ΗΜ", func: sin_degrees },
    BuiltinDef { name: "ΣΥΝ", func: cos_degrees },
    BuiltinDef { name: "ΕΦ", func: tan_degrees },
    BuiltinDef { name: "ΛΟΓ", func: natural_log },
    BuiltinDef { name: "Τ_Ρ", func: square_root },
];

/// Finds the handler for a built-in name, if the name is one.
#[must_use]
pub fn lookup(name: &str) -> Option<BuiltinFn> {
    BUILTIN_TABLE.iter()
                 .find(|def| def.name == name)
                 .map(|def| def.func)
}

/// `Α_Μ` — integer part toward zero; the result is INTEGER.
fn trunc(value: &Value, line: usize) -> EvalResult<Value> {
    match value {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::Real(r) => Ok(Value::Integer(f64_trunc_to_i64(*r, line)?)),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// `Α_Τ` — absolute value, preserving INTEGER/REAL.
fn abs_value(value: &Value, line: usize) -> EvalResult<Value> {
    match value {
        Value::Integer(n) => n.checked_abs()
                              .map(Value::Integer)
                              .ok_or(RuntimeError::Overflow { line }),
        Value::Real(r) => Ok(Value::Real(r.abs())),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// `Ε` — the exponential `e^x`; the result is REAL.
fn exp_e(value: &Value, line: usize) -> EvalResult<Value> {
    Ok(Value::Real(value.as_real(line)?.exp()))
}

/// `ΗΜ` — sine of an angle given in degrees.
fn sin_degrees(value: &Value, line: usize) -> EvalResult<Value> {
    Ok(Value::Real(value.as_real(line)?.to_radians().sin()))
}

/// `ΣΥΝ` — cosine of an angle given in degrees.
fn cos_degrees(value: &Value, line: usize) -> EvalResult<Value> {
    Ok(Value::Real(value.as_real(line)?.to_radians().cos()))
}

/// `ΕΦ` — tangent of an angle given in degrees.
fn tan_degrees(value: &Value, line: usize) -> EvalResult<Value> {
    Ok(Value::Real(value.as_real(line)?.to_radians().tan()))
}

/// `ΛΟΓ` — natural logarithm; arguments at or below zero are outside the
/// domain.
fn natural_log(value: &Value, line: usize) -> EvalResult<Value> {
    let x = value.as_real(line)?;
    if x <= 0.0 {
        return Err(RuntimeError::DomainError { function: "ΛΟΓ".to_string(),
                                               line });
    }
    Ok(Value::Real(x.ln()))
}

/// `Τ_Ρ` — square root; negative arguments are outside the domain.
fn square_root(value: &Value, line: usize) -> EvalResult<Value> {
    let x = value.as_real(line)?;
    if x < 0.0 {
        return Err(RuntimeError::DomainError { function: "Τ_Ρ".to_string(),
                                               line });
    }
    Ok(Value::Real(x.sqrt()))
}
