/// Binary operator semantics on runtime values: promotion, checked
/// arithmetic, comparison.
pub mod binary;
/// The fixed numeric built-in library.
pub mod builtin;
/// Subprogram invocation: argument binding, call frames, the recursion
/// limit.
pub mod call;
/// The interpreter itself: global-frame setup, the run entry point, and
/// the debugger hook plumbing.
pub mod core;
/// Expression evaluation, including short-circuit `ΚΑΙ`/`Η`.
pub mod expression;
/// Statement execution.
pub mod statement;
