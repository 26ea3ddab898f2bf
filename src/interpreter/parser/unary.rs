use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_relational,
            core::{ParseResult, parse_expression},
            utils::parse_comma_separated,
        },
    },
};

/// Parses `ΟΧΙ` prefixes.
///
/// The rule is: `logical_not := "ΟΧΙ" logical_not | relational`
///
/// `ΟΧΙ` is right-associative: `ΟΧΙ ΟΧΙ α` negates twice.
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A unary node or the underlying relational expression.
pub fn parse_not<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Not, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let operand = parse_not(tokens)?;
        return Ok(Expr::Unary { op: UnaryOperator::Not,
                                operand: Box::new(operand),
                                line });
    }
    parse_relational(tokens)
}

/// Parses unary sign prefixes.
///
/// The rule is: `unary := ("-" | "+") unary | primary`
///
/// The unary minus binds tighter than every binary arithmetic operator,
/// so `-α * β` negates `α` first.
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A unary node or the underlying primary expression.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Plus, _)) => UnaryOperator::Plus,
        _ => return parse_primary(tokens),
    };
    let (_, line) = tokens.next().expect("sign just peeked");
    let operand = parse_unary(tokens)?;
    Ok(Expr::Unary { op,
                     operand: Box::new(operand),
                     line: *line })
}

/// Parses literals, names, indexed references, calls, and parenthesized
/// expressions.
///
/// A name followed by `(` becomes a function call; followed by `[` it
/// becomes an indexed array reference; otherwise it is a plain variable
/// reference.
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// The parsed primary expression.
///
/// # Errors
/// `UnexpectedToken` when the token cannot start an expression,
/// `UnexpectedEndOfInput` at end of stream.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Integer(value), line)) => Ok(Expr::IntegerLit { value: *value,
                                                                     line:  *line, }),
        Some((Token::Real(value), line)) => Ok(Expr::RealLit { value: *value,
                                                               line:  *line, }),
        Some((Token::Text(value), line)) => Ok(Expr::TextLit { value: value.clone(),
                                                               line:  *line, }),
        Some((Token::Bool(value), line)) => Ok(Expr::BoolLit { value: *value,
                                                               line:  *line, }),
        Some((Token::Identifier(name), line)) => {
            let name = name.clone();
            let line = *line;
            if let Some((Token::LParen, _)) = tokens.peek() {
                tokens.next();
                let args = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                return Ok(Expr::Call { name, args, line });
            }
            if let Some((Token::LBracket, _)) = tokens.peek() {
                tokens.next();
                let indices = parse_index_list(tokens)?;
                return Ok(Expr::Indexed { name, indices, line });
            }
            Ok(Expr::Variable { name, line })
        },
        Some((Token::LParen, _)) => {
            let inner = parse_expression(tokens)?;
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(inner),
                Some((tok, line)) => {
                    Err(ParseError::UnexpectedToken { expected: ")".to_string(),
                                                      found:    tok.to_string(),
                                                      line:     *line, })
                },
                None => Err(ParseError::UnexpectedEndOfInput { line: inner.line_number() }),
            }
        },
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: "έκφραση".to_string(),
                                              found:    tok.to_string(),
                                              line:     *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses one or more comma-separated index expressions and the closing
/// `]`. The index count is validated against the array's rank at runtime,
/// not here.
pub(in crate::interpreter::parser) fn parse_index_list<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut indices = vec![parse_expression(tokens)?];
    loop {
        match tokens.next() {
            Some((Token::Comma, _)) => indices.push(parse_expression(tokens)?),
            Some((Token::RBracket, _)) => break,
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { expected: "',' ή ]".to_string(),
                                                         found:    tok.to_string(),
                                                         line:     *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
    Ok(indices)
}
