use crate::{
    ast::{BinaryOperator, CaseValue, Expr, Statement, Target, VarType},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary,
            core::{EvalResult, Flow, Interpreter},
        },
        value::Value,
    },
};

impl Interpreter<'_, '_> {
    /// Executes a statement list sequentially.
    ///
    /// When a debugger hook is attached, it wraps every statement: one
    /// call before, one after. A `Flow::Return` stops the walk and
    /// travels upward; the after-hook still runs for the statement that
    /// raised it.
    pub(crate) fn exec_block(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        for statement in statements {
            self.hook_before(statement)?;
            let flow = self.exec_statement(statement)?;
            self.hook_after(statement)?;
            if let Flow::Return(..) = flow {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a single statement node.
    fn exec_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Assign { target, value, line } => {
                let value = self.eval_expr(value)?;
                self.store(target, value, *line)?;
                Ok(Flow::Normal)
            },
            Statement::If { arms, else_body, .. } => {
                for arm in arms {
                    let line = arm.condition.line_number();
                    if self.eval_expr(&arm.condition)?.as_bool(line)? {
                        return self.exec_block(&arm.body);
                    }
                }
                match else_body {
                    Some(body) => self.exec_block(body),
                    None => Ok(Flow::Normal),
                }
            },
            Statement::While { condition, body, .. } => {
                let line = condition.line_number();
                loop {
                    if !self.eval_expr(condition)?.as_bool(line)? {
                        return Ok(Flow::Normal);
                    }
                    match self.exec_block(body)? {
                        Flow::Normal => {},
                        flow => return Ok(flow),
                    }
                }
            },
            Statement::RepeatUntil { body, condition, .. } => {
                let line = condition.line_number();
                loop {
                    match self.exec_block(body)? {
                        Flow::Normal => {},
                        flow => return Ok(flow),
                    }
                    if self.eval_expr(condition)?.as_bool(line)? {
                        return Ok(Flow::Normal);
                    }
                }
            },
            Statement::For { var, start, end, step, body, line } => {
                self.exec_for(var, start, end, step.as_ref(), body, *line)
            },
            Statement::Select { subject, arms, default, line } => {
                let subject = self.eval_expr(subject)?;
                for arm in arms {
                    for case in &arm.values {
                        if self.case_matches(&subject, case, *line)? {
                            return self.exec_block(&arm.body);
                        }
                    }
                }
                match default {
                    Some(body) => self.exec_block(body),
                    None => Ok(Flow::Normal),
                }
            },
            Statement::Read { targets, line } => {
                self.exec_read(targets, *line)?;
                Ok(Flow::Normal)
            },
            Statement::Write { values, .. } => {
                self.exec_write(values)?;
                Ok(Flow::Normal)
            },
            Statement::Call { name, args, line } => {
                self.exec_call(name, args, *line)?;
                Ok(Flow::Normal)
            },
            Statement::Return { value, line } => {
                let value = self.eval_expr(value)?;
                Ok(Flow::Return(value, *line))
            },
        }
    }

    /// `ΓΙΑ`: start, end, and step are evaluated exactly once at entry.
    /// The iteration variable is a declared slot, is assigned the start
    /// value, and keeps whatever it holds when the loop exits. The body
    /// may modify it; the loop reads it back before every step.
    fn exec_for(&mut self,
                var: &str,
                start: &Expr,
                end: &Expr,
                step: Option<&Expr>,
                body: &[Statement],
                line: usize)
                -> EvalResult<Flow> {
        let start = self.eval_expr(start)?;
        let end = self.eval_expr(end)?;
        let step = match step {
            Some(expr) => self.eval_expr(expr)?,
            None => Value::Integer(1),
        };
        let ascending = match &step {
            Value::Integer(0) => return Err(RuntimeError::InvalidLoopStep { line }),
            Value::Real(r) if *r == 0.0 => return Err(RuntimeError::InvalidLoopStep { line }),
            Value::Integer(n) => *n > 0,
            Value::Real(r) => *r > 0.0,
            _ => return Err(RuntimeError::ExpectedNumber { line }),
        };
        let exit_op = if ascending { BinaryOperator::Greater } else { BinaryOperator::Less };

        self.env.assign(var, start, line)?;
        loop {
            let current = self.env.read(var, line)?;
            if binary::apply(exit_op, &current, &end, line)?.as_bool(line)? {
                return Ok(Flow::Normal);
            }
            match self.exec_block(body)? {
                Flow::Normal => {},
                flow => return Ok(flow),
            }
            let current = self.env.read(var, line)?;
            let next = binary::apply(BinaryOperator::Add, &current, &step, line)?;
            self.env.assign(var, next, line)?;
        }
    }

    /// Whether the once-evaluated subject matches one `ΠΕΡΙΠΤΩΣΗ` value:
    /// equality for single values, inclusive containment for ranges.
    fn case_matches(&mut self, subject: &Value, case: &CaseValue, line: usize)
                    -> EvalResult<bool> {
        match case {
            CaseValue::Single(expr) => {
                let value = self.eval_expr(expr)?;
                binary::apply(BinaryOperator::Eq, subject, &value, line)?.as_bool(line)
            },
            CaseValue::Range(low, high) => {
                let low = self.eval_expr(low)?;
                if !binary::apply(BinaryOperator::GreaterEq, subject, &low, line)?
                        .as_bool(line)?
                {
                    return Ok(false);
                }
                let high = self.eval_expr(high)?;
                binary::apply(BinaryOperator::LessEq, subject, &high, line)?.as_bool(line)
            },
        }
    }

    /// `ΔΙΑΒΑΣΕ`: one input line per target, parsed by the target's
    /// declared type, then coerce-stored like an assignment.
    fn exec_read(&mut self, targets: &[Target], line: usize) -> EvalResult<()> {
        for target in targets {
            let (var_type, is_array) = self.env.slot_info(&target.name, target.line)?;
            if is_array && target.indices.is_none() {
                return Err(RuntimeError::ArrayRequiresIndices { name: target.name.clone(),
                                                                line: target.line, });
            }
            let raw = self.input
                          .read_line()
                          .ok_or(RuntimeError::InputExhausted { line })?;
            let value = parse_input(&raw, var_type, line)?;
            self.store(target, value, line)?;
        }
        Ok(())
    }

    /// `ΓΡΑΨΕ`: every argument formatted, joined with single spaces,
    /// emitted as one line.
    fn exec_write(&mut self, values: &[Expr]) -> EvalResult<()> {
        let mut parts = Vec::with_capacity(values.len());
        for expr in values {
            parts.push(self.eval_expr(expr)?.to_string());
        }
        self.output.write_line(&parts.join(" "));
        Ok(())
    }

    /// Coerce-stores a value into an assignment or `ΔΙΑΒΑΣΕ` target.
    fn store(&mut self, target: &Target, value: Value, line: usize) -> EvalResult<()> {
        match &target.indices {
            None => self.env.assign(&target.name, value, line),
            Some(indices) => {
                let indices = self.eval_indices(indices)?;
                self.env.assign_indexed(&target.name, &indices, value, line)
            },
        }
    }
}

/// Parses one input line according to the declared type of its target.
///
/// Numeric and boolean targets see the line with surrounding whitespace
/// trimmed; CHARACTER targets take it verbatim. Booleans accept exactly
/// the two keywords, case-sensitively.
fn parse_input(raw: &str, var_type: VarType, line: usize) -> EvalResult<Value> {
    let invalid = || RuntimeError::InvalidInput { text: raw.to_string(),
                                                  expected: var_type,
                                                  line };
    let trimmed = raw.trim();
    match var_type {
        VarType::Character => Ok(Value::Text(raw.to_string())),
        VarType::Integer => trimmed.parse::<i64>()
                                   .map(Value::Integer)
                                   .map_err(|_| invalid()),
        VarType::Real => {
            if !is_real_literal(trimmed) {
                return Err(invalid());
            }
            trimmed.parse::<f64>().map(Value::Real).map_err(|_| invalid())
        },
        VarType::Boolean => match trimmed {
            "ΑΛΗΘΗΣ" => Ok(Value::Bool(true)),
            "ΨΕΥΔΗΣ" => Ok(Value::Bool(false)),
            _ => Err(invalid()),
        },
    }
}

/// Whether a trimmed line has the shape `sign? digits ("." digits)?` — the
/// only real form `ΔΙΑΒΑΣΕ` accepts. Exponents, `inf`, and bare dots are
/// not input syntax.
fn is_real_literal(text: &str) -> bool {
    let rest = text.strip_prefix(['+', '-']).unwrap_or(text);
    match rest.split_once('.') {
        None => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()),
        Some((whole, fraction)) => {
            !whole.is_empty()
            && !fraction.is_empty()
            && whole.bytes().all(|b| b.is_ascii_digit())
            && fraction.bytes().all(|b| b.is_ascii_digit())
        },
    }
}
