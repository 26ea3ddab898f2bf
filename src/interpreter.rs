/// The debugger hook contract: before/after statement calls, scope
/// snapshots, and the stop signal.
pub mod debug;
/// Lexical scopes and typed slots: the global frame plus the call-frame
/// stack.
pub mod environment;
/// The tree-walking evaluator.
pub mod evaluator;
/// The IO contract the core consumes: an output sink and an input source.
pub mod io;
/// Tokenization of Greek-keyword source text.
pub mod lexer;
/// Recursive-descent parsing of the token stream into the AST.
pub mod parser;
/// Runtime values, arrays, and the coercion rules.
pub mod value;
