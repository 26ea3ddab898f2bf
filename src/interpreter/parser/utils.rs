use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// The line of the token under the cursor, or 0 at end of input.
pub(in crate::interpreter::parser) fn current_line<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().map_or(0, |(_, line)| *line)
}

/// Consumes the next token, which must equal `expected`, and returns its
/// line.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` naming both sides, or
/// `ParseError::UnexpectedEndOfInput` when the stream is exhausted.
pub(in crate::interpreter::parser) fn expect_token<'a, I>(tokens: &mut Peekable<I>,
                                                          expected: &Token)
                                                          -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) if tok == expected => Ok(*line),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: expected.to_string(),
                                              found:    tok.to_string(),
                                              line:     *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Consumes the next token when it equals `wanted`; leaves the stream
/// untouched otherwise. Returns whether the token was consumed.
pub(in crate::interpreter::parser) fn accept_token<'a, I>(tokens: &mut Peekable<I>,
                                                          wanted: &Token)
                                                          -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    if let Some((tok, _)) = tokens.peek()
       && tok == wanted
    {
        tokens.next();
        return true;
    }
    false
}

/// Parses a plain identifier and returns its name with its line.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` if the next token is not an
/// identifier, or `ParseError::UnexpectedEndOfInput` at end of stream.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(name), line)) => Ok((name.clone(), *line)),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: "όνομα".to_string(),
                                              found:    tok.to_string(),
                                              line:     *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a comma-separated list of items terminated by `closing`, which
/// is consumed. An immediately encountered closing token produces an empty
/// list.
///
/// Shared by argument lists and anywhere else the grammar writes
/// `item ("," item)*`.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, a separator is
/// missing, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { expected: format!("',' ή {closing}"),
                                                         found:    tok.to_string(),
                                                         line:     *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
    Ok(items)
}
