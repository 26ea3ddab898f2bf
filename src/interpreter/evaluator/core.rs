use std::collections::HashMap;

use crate::{
    ast::{FunctionDef, ProcedureDef, Program, Statement},
    error::RuntimeError,
    interpreter::{
        debug::DebugHook,
        environment::{Environment, Slot},
        io::{InputSource, OutputSink},
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Active subprogram calls allowed at once. Hitting the limit raises a
/// Greek runtime error instead of blowing the host's stack on unbounded
/// recursion. Each language-level call costs several native frames, so
/// the limit stays well under any thread's stack size.
pub const MAX_CALL_DEPTH: usize = 256;

/// The non-local control signal a statement can produce.
///
/// `ΕΠΙΣΤΡΕΨΕ` does not unwind through the error channel — it travels as
/// a `Flow` value through every enclosing loop and branch until the
/// nearest function call site consumes it. Anywhere else it surfaces as a
/// runtime error.
#[derive(Debug)]
pub(crate) enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// `ΕΠΙΣΤΡΕΨΕ` fired: the value and the line it fired on.
    Return(Value, usize),
}

/// A tree-walking interpreter over a parsed program.
///
/// The interpreter owns the variable environment and borrows everything
/// else: the immutable program tree, the two IO capabilities, and an
/// optional debugger hook that is called around every statement.
pub struct Interpreter<'p, 'io> {
    pub(crate) program:    &'p Program,
    pub(crate) env:        Environment,
    pub(crate) procedures: HashMap<&'p str, &'p ProcedureDef>,
    pub(crate) functions:  HashMap<&'p str, &'p FunctionDef>,
    pub(crate) input:      &'io mut dyn InputSource,
    pub(crate) output:     &'io mut dyn OutputSink,
    pub(crate) hook:       Option<&'io mut dyn DebugHook>,
}

impl<'p, 'io> Interpreter<'p, 'io> {
    /// Prepares an interpreter over `program` with the given IO
    /// capabilities and no debugger attached.
    pub fn new(program: &'p Program,
               input: &'io mut dyn InputSource,
               output: &'io mut dyn OutputSink)
               -> Self {
        let procedures = program.procedures
                                .iter()
                                .map(|def| (def.name.as_str(), def))
                                .collect();
        let functions = program.functions
                               .iter()
                               .map(|def| (def.name.as_str(), def))
                               .collect();
        Self { program,
               env: Environment::new(),
               procedures,
               functions,
               input,
               output,
               hook: None }
    }

    /// Prepares an interpreter with a debugger hook attached.
    pub fn with_hook(program: &'p Program,
                     input: &'io mut dyn InputSource,
                     output: &'io mut dyn OutputSink,
                     hook: &'io mut dyn DebugHook)
                     -> Self {
        let mut interpreter = Self::new(program, input, output);
        interpreter.hook = Some(hook);
        interpreter
    }

    /// Runs the program to completion.
    ///
    /// Builds the global frame from the constant and variable
    /// declarations, executes the main body, and returns once the body
    /// ends. The environment is discarded with the interpreter; nothing
    /// persists across runs.
    ///
    /// # Errors
    /// The first runtime error (including a debugger stop) unwinds every
    /// active frame and is returned as-is. `ΕΠΙΣΤΡΕΨΕ` escaping the main
    /// body is reported as a runtime error too.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        self.init_globals()?;
        let program = self.program;
        match self.exec_block(&program.body)? {
            Flow::Normal => Ok(()),
            Flow::Return(_, line) => Err(RuntimeError::ReturnOutsideFunction { line }),
        }
    }

    /// Creates the global frame: constants first (evaluated in
    /// declaration order, so later ones may use earlier ones), then
    /// variables at their default values.
    fn init_globals(&mut self) -> EvalResult<()> {
        let program = self.program;
        for decl in &program.constants {
            let value = self.eval_expr(&decl.value)?;
            let Some(var_type) = value.scalar_type() else {
                return Err(RuntimeError::ArrayRequiresIndices { name: decl.name.clone(),
                                                                line: decl.line, });
            };
            self.env.declare_global(&decl.name, Slot::constant(var_type, value));
        }
        for decl in &program.variables {
            let slot = match &decl.dims {
                Some(dims) => Slot::array(decl.var_type, dims.clone()),
                None => Slot::scalar(decl.var_type),
            };
            self.env.declare_global(&decl.name, slot);
        }
        Ok(())
    }

    /// Invokes the debugger hook before a statement, translating its stop
    /// signal into the fatal runtime error.
    pub(crate) fn hook_before(&mut self, statement: &Statement) -> EvalResult<()> {
        if let Some(hook) = self.hook.as_deref_mut() {
            let snapshot = self.env.snapshot();
            hook.before_statement(statement, &snapshot)
                .map_err(|_| RuntimeError::Stopped { line: statement.line() })?;
        }
        Ok(())
    }

    /// Invokes the debugger hook after a statement, translating its stop
    /// signal into the fatal runtime error.
    pub(crate) fn hook_after(&mut self, statement: &Statement) -> EvalResult<()> {
        if let Some(hook) = self.hook.as_deref_mut() {
            let snapshot = self.env.snapshot();
            hook.after_statement(statement, &snapshot)
                .map_err(|_| RuntimeError::Stopped { line: statement.line() })?;
        }
        Ok(())
    }
}
