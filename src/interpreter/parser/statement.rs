use std::iter::Peekable;

use crate::{
    ast::{CaseArm, CaseValue, Expr, IfArm, Statement, Target},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            unary::parse_index_list,
            utils::{accept_token, current_line, expect_token, parse_comma_separated,
                    parse_identifier},
        },
    },
};

/// Collects statements until one of the closing keywords in `until` is
/// under the cursor. The closing keyword itself is left for the caller.
///
/// # Errors
/// `UnexpectedEndOfInput` when the stream runs out before any closing
/// keyword, plus whatever the statements themselves raise.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, until: &[Token])
                          -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();
    loop {
        match tokens.peek() {
            Some((tok, _)) if until.contains(tok) => break,
            Some(_) => statements.push(parse_statement(tokens)?),
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
    Ok(statements)
}

/// Parses a single statement based on the token under the cursor.
///
/// # Errors
/// `UnexpectedToken` when the token cannot start a statement.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Write, _)) => parse_write(tokens),
        Some((Token::Read, _)) => parse_read(tokens),
        Some((Token::Call, _)) => parse_call(tokens),
        Some((Token::Return, _)) => parse_return(tokens),
        Some((Token::If, _)) => parse_if(tokens),
        Some((Token::While, _)) => parse_while(tokens),
        Some((Token::Repeat, _)) => parse_repeat(tokens),
        Some((Token::For, _)) => parse_for(tokens),
        Some((Token::Select, _)) => parse_select(tokens),
        Some((Token::Identifier(_), _)) => parse_assignment(tokens),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: "εντολή".to_string(),
                                              found:    tok.to_string(),
                                              line:     *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses an assignment `target <- expression`, where the target is a
/// name or an indexed reference.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let target = parse_target(tokens)?;
    let line = target.line;
    expect_token(tokens, &Token::Assign)?;
    let value = parse_expression(tokens)?;
    Ok(Statement::Assign { target, value, line })
}

/// Parses a name or indexed reference used as an assignment or `ΔΙΑΒΑΣΕ`
/// target.
fn parse_target<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Target>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens)?;
    let indices = if accept_token(tokens, &Token::LBracket) {
        Some(parse_index_list(tokens)?)
    } else {
        None
    };
    Ok(Target { name, indices, line })
}

/// `ΓΡΑΨΕ expr (, expr)*`
fn parse_write<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::Write)?;
    let mut values = vec![parse_expression(tokens)?];
    while accept_token(tokens, &Token::Comma) {
        values.push(parse_expression(tokens)?);
    }
    Ok(Statement::Write { values, line })
}

/// `ΔΙΑΒΑΣΕ target (, target)*`
fn parse_read<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::Read)?;
    let mut targets = vec![parse_target(tokens)?];
    while accept_token(tokens, &Token::Comma) {
        targets.push(parse_target(tokens)?);
    }
    Ok(Statement::Read { targets, line })
}

/// `ΚΑΛΕΣΕ name(args)` — the parenthesis pair is optional when there are
/// no arguments.
fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::Call)?;
    let (name, _) = parse_identifier(tokens)?;
    let args = if accept_token(tokens, &Token::LParen) {
        parse_comma_separated(tokens, parse_expression, &Token::RParen)?
    } else {
        Vec::new()
    };
    Ok(Statement::Call { name, args, line })
}

/// `ΕΠΙΣΤΡΕΨΕ expression`
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::Return)?;
    let value = parse_expression(tokens)?;
    Ok(Statement::Return { value, line })
}

/// `ΑΝ … ΤΟΤΕ … (ΑΛΛΙΩΣ_ΑΝ … ΤΟΤΕ …)* (ΑΛΛΙΩΣ …)? ΤΕΛΟΣ_ΑΝ`
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    const ARM_ENDS: &[Token] = &[Token::ElseIf, Token::Else, Token::EndIf];

    let line = expect_token(tokens, &Token::If)?;
    let condition = parse_expression(tokens)?;
    expect_token(tokens, &Token::Then)?;
    let body = parse_block(tokens, ARM_ENDS)?;
    let mut arms = vec![IfArm { condition, body }];

    while accept_token(tokens, &Token::ElseIf) {
        let condition = parse_expression(tokens)?;
        expect_token(tokens, &Token::Then)?;
        let body = parse_block(tokens, ARM_ENDS)?;
        arms.push(IfArm { condition, body });
    }

    let else_body = if accept_token(tokens, &Token::Else) {
        Some(parse_block(tokens, &[Token::EndIf])?)
    } else {
        None
    };
    expect_token(tokens, &Token::EndIf)?;

    Ok(Statement::If { arms, else_body, line })
}

/// `ΟΣΟ … ΕΠΑΝΑΛΑΒΕ … ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ`
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::While)?;
    let condition = parse_expression(tokens)?;
    expect_token(tokens, &Token::Do)?;
    let body = parse_block(tokens, &[Token::EndLoop])?;
    expect_token(tokens, &Token::EndLoop)?;
    Ok(Statement::While { condition, body, line })
}

/// `ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ … ΜΕΧΡΙΣ_ΟΤΟΥ expression`
fn parse_repeat<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::Repeat)?;
    let body = parse_block(tokens, &[Token::Until])?;
    expect_token(tokens, &Token::Until)?;
    let condition = parse_expression(tokens)?;
    Ok(Statement::RepeatUntil { body, condition, line })
}

/// `ΓΙΑ v ΑΠΟ a ΜΕΧΡΙ b (ΜΕ_ΒΗΜΑ k)? … ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ`
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::For)?;
    let (var, _) = parse_identifier(tokens)?;
    expect_token(tokens, &Token::From)?;
    let start = parse_expression(tokens)?;
    expect_token(tokens, &Token::To)?;
    let end = parse_expression(tokens)?;
    let step = if accept_token(tokens, &Token::Step) {
        Some(parse_expression(tokens)?)
    } else {
        None
    };
    let body = parse_block(tokens, &[Token::EndLoop])?;
    expect_token(tokens, &Token::EndLoop)?;
    Ok(Statement::For { var, start, end, step, body, line })
}

/// `ΕΠΙΛΕΞΕ … (ΠΕΡΙΠΤΩΣΗ value (, value)* …)* (ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ …)?
/// ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ`
///
/// A colon after the value list is accepted and ignored. Each value is a
/// single expression or a closed range `a..b`.
fn parse_select<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    const ARM_ENDS: &[Token] = &[Token::Case, Token::EndSelect];

    let line = expect_token(tokens, &Token::Select)?;
    let subject = parse_expression(tokens)?;
    let mut arms = Vec::new();
    let mut default = None;

    loop {
        match tokens.peek() {
            Some((Token::EndSelect, _)) => break,
            Some((Token::Case, _)) => {
                tokens.next();
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { expected: Token::Case.to_string(),
                                                         found:    tok.to_string(),
                                                         line:     *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: current_line(tokens) }),
        }

        if accept_token(tokens, &Token::Else) {
            accept_token(tokens, &Token::Colon);
            default = Some(parse_block(tokens, ARM_ENDS)?);
            continue;
        }

        let mut values = vec![parse_case_value(tokens)?];
        while accept_token(tokens, &Token::Comma) {
            values.push(parse_case_value(tokens)?);
        }
        accept_token(tokens, &Token::Colon);
        let body = parse_block(tokens, ARM_ENDS)?;
        arms.push(CaseArm { values, body });
    }
    expect_token(tokens, &Token::EndSelect)?;

    Ok(Statement::Select { subject, arms, default, line })
}

/// One `ΠΕΡΙΠΤΩΣΗ` value: an expression, optionally extended to a closed
/// range by `..`.
fn parse_case_value<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<CaseValue>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let low: Expr = parse_expression(tokens)?;
    if accept_token(tokens, &Token::DotDot) {
        let high = parse_expression(tokens)?;
        return Ok(CaseValue::Range(low, high));
    }
    Ok(CaseValue::Single(low))
}
