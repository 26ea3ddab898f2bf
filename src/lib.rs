//! # glossa
//!
//! glossa is an interpreter for ΓΛΩΣΣΑ, the Greek pedagogical programming
//! language of the high-school informatics curriculum. It tokenizes
//! Greek-keyword source, parses it into a typed abstract syntax tree, and
//! walks the tree with lexical scopes, typed variables, one- and
//! two-dimensional arrays, procedures, functions, recursion, a numeric
//! built-in library, and a pluggable debugger/IO contract.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::{GlossaError, ParseError},
    interpreter::{
        debug::DebugHook,
        evaluator::core::Interpreter,
        io::{CapturedOutput, InputSource, OutputSink, QueuedInput},
        lexer::tokenize,
        parser::program::parse_program,
    },
};
pub use crate::ast::Program;

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expr` enums and related
/// types that represent the syntactic structure of a program as a tree.
/// The AST is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source line numbers to AST nodes for error reporting.
/// - Keeps the sums closed so the interpreter matches exhaustively.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing,
/// parsing, or executing a program. Messages are the Greek text the host
/// shows to the user, and carry the source line where available.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, runtime).
/// - Provides `GlossaError` as the single reporting channel out of a run.
pub mod error;
/// Orchestrates the entire process of program execution.
///
/// This module ties together lexing, parsing, evaluation, values, the
/// environment, the IO contract, and the debugger hook to provide a
/// complete runtime for ΓΛΩΣΣΑ programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator.
/// - Exposes the IO and debugger capabilities the host implements.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Convert between `i64` and `f64` without silent data loss.
/// - Provide the floor-division semantics of `DIV` and `MOD`.
pub mod util;

/// Parses source text into a program tree without executing it.
///
/// # Errors
/// Returns the first lexical or syntactic error.
///
/// # Example
/// ```
/// let program = glossa::parse("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ 1 ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ").unwrap();
/// assert_eq!(program.name, "Τ");
/// ```
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    parse_program(&tokens)
}

/// Parses and runs a program end-to-end against the given IO
/// capabilities.
///
/// # Errors
/// Returns the first parse or runtime error through the single
/// `GlossaError` channel.
pub fn run_source(source: &str,
                  input: &mut dyn InputSource,
                  output: &mut dyn OutputSink)
                  -> Result<(), GlossaError> {
    let program = parse(source)?;
    Interpreter::new(&program, input, output).run()?;
    Ok(())
}

/// Parses and runs a program with a debugger hook attached.
///
/// The hook is called before and after every executed statement and may
/// block (to implement stepping) or request a stop.
///
/// # Errors
/// As [`run_source`]; a stop request surfaces as a runtime error.
pub fn run_source_with_hook(source: &str,
                            input: &mut dyn InputSource,
                            output: &mut dyn OutputSink,
                            hook: &mut dyn DebugHook)
                            -> Result<(), GlossaError> {
    let program = parse(source)?;
    Interpreter::with_hook(&program, input, output, hook).run()?;
    Ok(())
}

/// Runs a program with scripted input lines and returns the lines it
/// wrote.
///
/// This is the convenience surface for tests and embedding; the CLI uses
/// the streaming variants instead.
///
/// # Errors
/// As [`run_source`].
///
/// # Example
/// ```
/// let source = "ΠΡΟΓΡΑΜΜΑ Τ ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: α ΑΡΧΗ α <- 42 ΓΡΑΨΕ α ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
/// let lines = glossa::run_captured(source, &[]).unwrap();
/// assert_eq!(lines, vec!["42"]);
/// ```
pub fn run_captured(source: &str, inputs: &[&str]) -> Result<Vec<String>, GlossaError> {
    let mut input = QueuedInput::new(inputs.iter().copied());
    let mut output = CapturedOutput::default();
    run_source(source, &mut input, &mut output)?;
    Ok(output.lines)
}
