use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{lexer::Token, parser::binary::parse_logical_or},
};

/// Result type used by every parsing function.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical `Η`, and recursively descends through
/// the precedence hierarchy:
///
/// `Η` → `ΚΑΙ` → `ΟΧΙ` → relational → additive → multiplicative → unary
/// sign → primary.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_logical_or(tokens)
}
