use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            unary::{parse_not, parse_unary},
        },
    },
};

/// Parses `Η` chains, the lowest-precedence level.
///
/// The rule is: `logical_or := logical_and ("Η" logical_and)*`
///
/// Left-associative; evaluation later short-circuits on a true left
/// operand.
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::Binary` tree representing the parsed expression.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_and(tokens)?;
    while let Some((Token::Or, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let right = parse_logical_and(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op: BinaryOperator::Or,
                              right: Box::new(right),
                              line };
    }
    Ok(left)
}

/// Parses `ΚΑΙ` chains.
///
/// The rule is: `logical_and := logical_not ("ΚΑΙ" logical_not)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::Binary` tree representing the parsed expression.
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_not(tokens)?;
    while let Some((Token::And, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let right = parse_not(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op: BinaryOperator::And,
                              right: Box::new(right),
                              line };
    }
    Ok(left)
}

/// Parses the single relational level.
///
/// The rule is: `relational := additive (("=" | "<>" | "<" | "<=" | ">" |
/// ">=") additive)?`
///
/// Comparisons do not chain — `α < β < γ` parses the first comparison and
/// leaves the rest, which the caller then rejects.
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// The left operand, or a single comparison node.
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_additive(tokens)?;

    if let Some((token, line)) = tokens.peek()
       && let Some(op) = relational_operator(token)
    {
        let line = *line;
        tokens.next();
        let right = parse_additive(tokens)?;
        return Ok(Expr::Binary { left: Box::new(left),
                                 op,
                                 right: Box::new(right),
                                 line });
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::Binary` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        let op = match tokens.peek() {
            Some((Token::Plus, _)) => BinaryOperator::Add,
            Some((Token::Minus, _)) => BinaryOperator::Sub,
            _ => break,
        };
        let (_, line) = tokens.next().expect("operator just peeked");
        let right = parse_multiplicative(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              line: *line };
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "DIV" | "MOD")
/// unary)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A binary expression tree combining unary-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens)?;
    loop {
        let op = match tokens.peek() {
            Some((Token::Star, _)) => BinaryOperator::Mul,
            Some((Token::Slash, _)) => BinaryOperator::Div,
            Some((Token::IntDiv, _)) => BinaryOperator::IntDiv,
            Some((Token::Mod, _)) => BinaryOperator::Mod,
            _ => break,
        };
        let (_, line) = tokens.next().expect("operator just peeked");
        let right = parse_unary(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              line: *line };
    }
    Ok(left)
}

/// Maps a token to its relational operator, if it is one.
const fn relational_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Equals => Some(BinaryOperator::Eq),
        Token::NotEq => Some(BinaryOperator::NotEq),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEq => Some(BinaryOperator::LessEq),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEq => Some(BinaryOperator::GreaterEq),
        _ => None,
    }
}
