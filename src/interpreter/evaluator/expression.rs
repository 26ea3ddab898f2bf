use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::{binary, core::{EvalResult, Interpreter}},
        value::Value,
    },
};

impl Interpreter<'_, '_> {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// Variable references to whole arrays yield a copy of the array —
    /// arrays are values here, which is what makes pass-by-value argument
    /// binding and `ΓΡΑΨΕ` of an entire array fall out naturally.
    ///
    /// `ΚΑΙ` and `Η` short-circuit: the right operand is not evaluated
    /// when the left one already decides the result.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::IntegerLit { value, .. } => Ok(Value::Integer(*value)),
            Expr::RealLit { value, .. } => Ok(Value::Real(*value)),
            Expr::TextLit { value, .. } => Ok(Value::Text(value.clone())),
            Expr::BoolLit { value, .. } => Ok(Value::Bool(*value)),
            Expr::Variable { name, line } => self.env.read(name, *line),
            Expr::Indexed { name, indices, line } => {
                let indices = self.eval_indices(indices)?;
                self.env.read_indexed(name, &indices, *line)
            },
            Expr::Unary { op, operand, line } => {
                let value = self.eval_expr(operand)?;
                eval_unary(*op, &value, *line)
            },
            Expr::Binary { left, op: BinaryOperator::And, right, line } => {
                if !self.eval_expr(left)?.as_bool(*line)? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval_expr(right)?.as_bool(*line)?))
            },
            Expr::Binary { left, op: BinaryOperator::Or, right, line } => {
                if self.eval_expr(left)?.as_bool(*line)? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval_expr(right)?.as_bool(*line)?))
            },
            Expr::Binary { left, op, right, line } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                binary::apply(*op, &left, &right, *line)
            },
            Expr::Call { name, args, line } => self.call_function(name, args, *line),
        }
    }

    /// Evaluates index expressions into 1-based integer indices. Anything
    /// non-integer — including an integral REAL — is rejected.
    pub(crate) fn eval_indices(&mut self, indices: &[Expr]) -> EvalResult<Vec<i64>> {
        let mut resolved = Vec::with_capacity(indices.len());
        for expr in indices {
            match self.eval_expr(expr)? {
                Value::Integer(index) => resolved.push(index),
                _ => {
                    return Err(RuntimeError::NonIntegerIndex { line: expr.line_number() });
                },
            }
        }
        Ok(resolved)
    }
}

/// Applies a unary operator to an evaluated operand.
fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
    match op {
        UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),
        UnaryOperator::Negate => match value {
            Value::Integer(n) => n.checked_neg()
                                  .map(Value::Integer)
                                  .ok_or(RuntimeError::Overflow { line }),
            Value::Real(r) => Ok(Value::Real(-r)),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        },
        UnaryOperator::Plus => match value {
            Value::Integer(n) => Ok(Value::Integer(*n)),
            Value::Real(r) => Ok(Value::Real(*r)),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        },
    }
}
