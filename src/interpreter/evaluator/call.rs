use crate::{
    ast::{Expr, Parameter, VarDecl},
    error::RuntimeError,
    interpreter::{
        environment::{Frame, Slot},
        evaluator::{
            builtin,
            core::{EvalResult, Flow, Interpreter, MAX_CALL_DEPTH},
        },
        value::{ArrayValue, Value},
    },
};

impl Interpreter<'_, '_> {
    /// Evaluates a function call expression.
    ///
    /// Built-in names are tried first — they shadow user callables of the
    /// same name. A user function runs in a fresh frame pushed over the
    /// globals; its `ΕΠΙΣΤΡΕΨΕ` value is caught here and coerced to the
    /// declared return type. Falling off the end of a function body
    /// without returning is an error.
    pub(crate) fn call_function(&mut self, name: &str, args: &[Expr], line: usize)
                                -> EvalResult<Value> {
        if let Some(builtin_fn) = builtin::lookup(name) {
            if args.len() != 1 {
                return Err(RuntimeError::ArityMismatch { name:     name.to_string(),
                                                         expected: 1,
                                                         found:    args.len(),
                                                         line, });
            }
            let value = self.eval_expr(&args[0])?;
            return builtin_fn(&value, line);
        }

        let Some(def) = self.functions.get(name).copied() else {
            return Err(RuntimeError::UnknownFunction { name: name.to_string(),
                                                       line });
        };
        if args.len() != def.params.len() {
            return Err(RuntimeError::ArityMismatch { name:     name.to_string(),
                                                     expected: def.params.len(),
                                                     found:    args.len(),
                                                     line, });
        }

        let frame = self.bind_frame(&def.params, args, &def.locals, line)?;
        self.enter_frame(frame, line)?;
        let result = self.exec_block(&def.body);
        self.env.pop_frame();

        match result? {
            Flow::Return(value, ret_line) => value.coerce_to(def.return_type, ret_line),
            Flow::Normal => Err(RuntimeError::FunctionWithoutReturn { name: name.to_string(),
                                                                      line }),
        }
    }

    /// Executes a `ΚΑΛΕΣΕ` statement.
    ///
    /// The name must resolve to a procedure — functions and built-ins are
    /// rejected, not silently invoked. `ΕΠΙΣΤΡΕΨΕ` escaping a procedure
    /// body is an error.
    pub(crate) fn exec_call(&mut self, name: &str, args: &[Expr], line: usize)
                            -> EvalResult<()> {
        if builtin::lookup(name).is_some() || self.functions.contains_key(name) {
            return Err(RuntimeError::NotAProcedure { name: name.to_string(),
                                                     line });
        }
        let Some(def) = self.procedures.get(name).copied() else {
            return Err(RuntimeError::UnknownProcedure { name: name.to_string(),
                                                        line });
        };
        if args.len() != def.params.len() {
            return Err(RuntimeError::ArityMismatch { name:     name.to_string(),
                                                     expected: def.params.len(),
                                                     found:    args.len(),
                                                     line, });
        }

        let frame = self.bind_frame(&def.params, args, &def.locals, line)?;
        self.enter_frame(frame, line)?;
        let result = self.exec_block(&def.body);
        self.env.pop_frame();

        match result? {
            Flow::Normal => Ok(()),
            Flow::Return(_, ret_line) => {
                Err(RuntimeError::ReturnOutsideFunction { line: ret_line })
            },
        }
    }

    /// Builds a call frame: arguments evaluated in the caller's scope,
    /// coerced to their parameter types, bound strictly by value — an
    /// array argument is deep-copied into an array slot of the
    /// parameter's element type. Locals follow at their defaults.
    fn bind_frame(&mut self,
                  params: &[Parameter],
                  args: &[Expr],
                  locals: &[VarDecl],
                  line: usize)
                  -> EvalResult<Frame> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }

        let mut frame = Frame::default();
        for (param, value) in params.iter().zip(values) {
            let bound = match value {
                Value::Array(array) => {
                    let mut data = Vec::with_capacity(array.data.len());
                    for cell in array.data {
                        data.push(cell.coerce_to(param.var_type, line)?);
                    }
                    Value::Array(ArrayValue { elem_type: param.var_type,
                                              dims: array.dims,
                                              data })
                },
                scalar => scalar.coerce_to(param.var_type, line)?,
            };
            frame.declare(&param.name,
                          Slot { var_type: param.var_type,
                                 value:    bound,
                                 constant: false, });
        }
        for decl in locals {
            let slot = match &decl.dims {
                Some(dims) => Slot::array(decl.var_type, dims.clone()),
                None => Slot::scalar(decl.var_type),
            };
            frame.declare(&decl.name, slot);
        }
        Ok(frame)
    }

    /// Pushes a bound frame, enforcing the recursion limit.
    fn enter_frame(&mut self, frame: Frame, line: usize) -> EvalResult<()> {
        if self.env.depth() >= MAX_CALL_DEPTH {
            return Err(RuntimeError::CallDepthExceeded { line });
        }
        self.env.push_frame(frame);
        Ok(())
    }
}
