use crate::{
    ast::{Statement, VarType},
    interpreter::value::Value,
};

/// Where a visible binding lives relative to the statement being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeTag {
    /// The innermost frame: a subprogram's parameters and locals, or the
    /// globals while the main body runs.
    Local,
    /// A global binding seen from inside a subprogram call.
    Outer,
}

/// One visible binding as exposed to the debugger: declared type, current
/// value, and where it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingView {
    /// The binding's name.
    pub name:     String,
    /// The declared element type.
    pub var_type: VarType,
    /// Array bounds when the binding is an array, `None` for scalars.
    pub dims:     Option<Vec<usize>>,
    /// A copy of the current value; mutating it does not touch the
    /// program.
    pub value:    Value,
    /// Local or outer scope.
    pub scope:    ScopeTag,
}

/// A read-only snapshot of every name visible at a suspension point, in
/// declaration order, innermost scope first. Shadowed globals are not
/// listed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeSnapshot {
    /// The visible bindings.
    pub bindings: Vec<BindingView>,
}

/// The stop signal a hook may raise instead of letting execution continue.
///
/// On receipt the interpreter unwinds every active call frame and reports
/// «Η εκτέλεση διακόπηκε» through its single error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopRequested;

/// A cooperative debugger attached to a run.
///
/// The interpreter calls `before_statement` and `after_statement` around
/// every executed statement, on the interpreter's own thread. A hook may
/// block inside either call for as long as it likes — that is how stepping
/// is implemented — and resumes execution simply by returning. Returning
/// `Err(StopRequested)` aborts the run cleanly.
pub trait DebugHook {
    /// Called before a statement executes.
    ///
    /// # Errors
    /// `Err(StopRequested)` stops the run before the statement.
    fn before_statement(&mut self, statement: &Statement, scope: &ScopeSnapshot)
                        -> Result<(), StopRequested> {
        let _ = (statement, scope);
        Ok(())
    }

    /// Called after a statement has executed.
    ///
    /// # Errors
    /// `Err(StopRequested)` stops the run after the statement.
    fn after_statement(&mut self, statement: &Statement, scope: &ScopeSnapshot)
                       -> Result<(), StopRequested> {
        let _ = (statement, scope);
        Ok(())
    }
}

/// A hook that logs every executed statement line to stderr. Installed by
/// the CLI's `--trace` flag.
#[derive(Default)]
pub struct TraceHook;

impl DebugHook for TraceHook {
    fn before_statement(&mut self, statement: &Statement, _scope: &ScopeSnapshot)
                        -> Result<(), StopRequested> {
        eprintln!("γραμμή {:>4}  {}", statement.line(), statement.keyword());
        Ok(())
    }
}
