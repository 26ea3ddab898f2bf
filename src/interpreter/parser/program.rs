use std::collections::HashSet;
use std::iter::Peekable;

use crate::{
    ast::{ConstDecl, FunctionDef, Parameter, ProcedureDef, Program, VarDecl, VarType},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            statement::parse_block,
            utils::{accept_token, expect_token, parse_identifier},
        },
    },
};

/// Parses an entire program from a token stream.
///
/// Grammar:
///
/// ```text
/// subprogram* ΠΡΟΓΡΑΜΜΑ name declarations ΑΡΧΗ statements
/// ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ subprogram*
/// ```
///
/// Subprograms are accepted both before the program header and after its
/// closing keyword. Names must be unique across the global frame:
/// constants, variables, procedures, and functions all share it.
///
/// # Errors
/// The first syntactic problem is returned as a `ParseError`; there is no
/// recovery.
///
/// # Example
/// ```
/// use glossa::interpreter::{lexer::tokenize, parser::program::parse_program};
///
/// let source = "ΠΡΟΓΡΑΜΜΑ Δοκιμή\nΑΡΧΗ\nΓΡΑΨΕ 1\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
/// let tokens = tokenize(source).unwrap();
/// let program = parse_program(&tokens).unwrap();
/// assert_eq!(program.name, "Δοκιμή");
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let mut procedures = Vec::new();
    let mut functions = Vec::new();

    parse_subprograms(&mut iter, &mut procedures, &mut functions)?;

    let line = expect_token(&mut iter, &Token::Program)?;
    let (name, _) = parse_identifier(&mut iter)?;
    let (constants, variables) = parse_declarations(&mut iter)?;
    expect_token(&mut iter, &Token::Begin)?;
    let body = parse_block(&mut iter, &[Token::EndProgram])?;
    expect_token(&mut iter, &Token::EndProgram)?;

    parse_subprograms(&mut iter, &mut procedures, &mut functions)?;
    if let Some((tok, line)) = iter.peek() {
        return Err(ParseError::TrailingInput { found: tok.to_string(),
                                               line:  *line, });
    }

    check_global_names(&constants, &variables, &procedures, &functions)?;

    Ok(Program { name,
                 constants,
                 variables,
                 body,
                 procedures,
                 functions,
                 line })
}

/// Collects consecutive subprogram definitions into the given vectors.
fn parse_subprograms<'a, I>(tokens: &mut Peekable<I>,
                            procedures: &mut Vec<ProcedureDef>,
                            functions: &mut Vec<FunctionDef>)
                            -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    loop {
        match tokens.peek() {
            Some((Token::Procedure, _)) => procedures.push(parse_procedure_def(tokens)?),
            Some((Token::Function, _)) => functions.push(parse_function_def(tokens)?),
            _ => return Ok(()),
        }
    }
}

/// Parses the optional `ΣΤΑΘΕΡΕΣ`, `ΜΕΤΑΒΛΗΤΕΣ`, and `ΠΙΝΑΚΕΣ` sections,
/// in any order and repetition, until a token that belongs to none of
/// them.
fn parse_declarations<'a, I>(tokens: &mut Peekable<I>)
                             -> ParseResult<(Vec<ConstDecl>, Vec<VarDecl>)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut constants = Vec::new();
    let mut variables = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::Constants, _)) => {
                tokens.next();
                while let Some((Token::Identifier(_), _)) = tokens.peek() {
                    let (name, line) = parse_identifier(tokens)?;
                    expect_token(tokens, &Token::Equals)?;
                    let value = parse_expression(tokens)?;
                    constants.push(ConstDecl { name, value, line });
                }
            },
            Some((Token::Variables | Token::Arrays, _)) => {
                tokens.next();
                parse_typed_declarations(tokens, &mut variables)?;
            },
            _ => return Ok((constants, variables)),
        }
    }
}

/// Parses `type : name (, name)*` lines for as long as a type keyword is
/// under the cursor. Each name may carry `[upper]` or `[upper, upper]`
/// bounds.
fn parse_typed_declarations<'a, I>(tokens: &mut Peekable<I>, declarations: &mut Vec<VarDecl>)
                                   -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    while let Some((Token::Type(var_type), _)) = tokens.peek() {
        let var_type = *var_type;
        tokens.next();
        expect_token(tokens, &Token::Colon)?;
        loop {
            let (name, line) = parse_identifier(tokens)?;
            let dims = if accept_token(tokens, &Token::LBracket) {
                Some(parse_array_bounds(tokens)?)
            } else {
                None
            };
            declarations.push(VarDecl { name, var_type, dims, line });
            if !accept_token(tokens, &Token::Comma) {
                break;
            }
        }
    }
    Ok(())
}

/// Parses the bracketed bounds of an array declaration. Bounds are
/// integer literals ≥ 1, and only one- and two-dimensional arrays exist.
fn parse_array_bounds<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<usize>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut bounds = vec![parse_one_bound(tokens)?];
    while accept_token(tokens, &Token::Comma) {
        bounds.push(parse_one_bound(tokens)?);
    }
    let line = expect_token(tokens, &Token::RBracket)?;
    if bounds.len() > 2 {
        return Err(ParseError::IllegalDeclaration { details:
                       "υποστηρίζονται μόνο μονοδιάστατοι ή διδιάστατοι πίνακες".to_string(),
                   line });
    }
    Ok(bounds)
}

fn parse_one_bound<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Integer(bound), line)) => {
            if *bound < 1 {
                return Err(ParseError::IllegalDeclaration { details:
                               "το μέγεθος πίνακα πρέπει να είναι θετικό".to_string(),
                           line: *line, });
            }
            Ok(*bound as usize)
        },
        Some((Token::Real(_), line)) => {
            Err(ParseError::IllegalDeclaration { details:
                    "το μέγεθος πίνακα πρέπει να είναι ακέραιο".to_string(),
                line: *line, })
        },
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: "μέγεθος πίνακα".to_string(),
                                              found:    tok.to_string(),
                                              line:     *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a `ΔΙΑΔΙΚΑΣΙΑ` definition through its closing keyword.
fn parse_procedure_def<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ProcedureDef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::Procedure)?;
    let (name, _) = parse_identifier(tokens)?;
    let params = parse_parameter_list(tokens)?;
    let locals = parse_subprogram_locals(tokens, &params)?;
    expect_token(tokens, &Token::Begin)?;
    let body = parse_block(tokens, &[Token::EndProcedure])?;
    expect_token(tokens, &Token::EndProcedure)?;
    Ok(ProcedureDef { name, params, locals, body, line })
}

/// Parses a `ΣΥΝΑΡΤΗΣΗ` definition through its closing keyword. The
/// return type follows the parameter list after a colon, in the singular
/// form (`ΑΚΕΡΑΙΑ`, `ΠΡΑΓΜΑΤΙΚΗ`, …).
fn parse_function_def<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<FunctionDef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::Function)?;
    let (name, _) = parse_identifier(tokens)?;
    let params = parse_parameter_list(tokens)?;
    expect_token(tokens, &Token::Colon)?;
    let return_type = parse_type_keyword(tokens)?;
    let locals = parse_subprogram_locals(tokens, &params)?;
    expect_token(tokens, &Token::Begin)?;
    let body = parse_block(tokens, &[Token::EndFunction])?;
    expect_token(tokens, &Token::EndFunction)?;
    Ok(FunctionDef { name, params, locals, body, return_type, line })
}

/// Parses a parenthesized `name : type` parameter list. The parenthesis
/// pair is optional for parameterless subprograms.
fn parse_parameter_list<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Parameter>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut params = Vec::new();
    if !accept_token(tokens, &Token::LParen) {
        return Ok(params);
    }
    if accept_token(tokens, &Token::RParen) {
        return Ok(params);
    }
    loop {
        let (name, line) = parse_identifier(tokens)?;
        expect_token(tokens, &Token::Colon)?;
        let var_type = parse_type_keyword(tokens)?;
        if params.iter().any(|p: &Parameter| p.name == name) {
            return Err(ParseError::DuplicateDeclaration { name, line });
        }
        params.push(Parameter { name, var_type });
        if accept_token(tokens, &Token::Comma) {
            continue;
        }
        expect_token(tokens, &Token::RParen)?;
        break;
    }
    Ok(params)
}

/// Parses a subprogram's local declarations and rejects names that
/// collide with its parameters or each other. Subprogram bodies declare
/// no constants of their own.
fn parse_subprogram_locals<'a, I>(tokens: &mut Peekable<I>, params: &[Parameter])
                                  -> ParseResult<Vec<VarDecl>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut locals = Vec::new();
    while let Some((Token::Variables | Token::Arrays, _)) = tokens.peek() {
        tokens.next();
        parse_typed_declarations(tokens, &mut locals)?;
    }

    let mut seen: HashSet<&str> = params.iter().map(|p| p.name.as_str()).collect();
    for decl in &locals {
        if !seen.insert(&decl.name) {
            return Err(ParseError::DuplicateDeclaration { name: decl.name.clone(),
                                                          line: decl.line, });
        }
    }
    Ok(locals)
}

fn parse_type_keyword<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<VarType>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Type(var_type), _)) => Ok(*var_type),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: "τύπος".to_string(),
                                              found:    tok.to_string(),
                                              line:     *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Enforces the global-frame uniqueness invariant: constants, variables,
/// procedures, and functions all live in one namespace.
fn check_global_names(constants: &[ConstDecl],
                      variables: &[VarDecl],
                      procedures: &[ProcedureDef],
                      functions: &[FunctionDef])
                      -> ParseResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    let names = constants.iter()
                         .map(|decl| (decl.name.as_str(), decl.line))
                         .chain(variables.iter().map(|decl| (decl.name.as_str(), decl.line)))
                         .chain(procedures.iter().map(|def| (def.name.as_str(), def.line)))
                         .chain(functions.iter().map(|def| (def.name.as_str(), def.line)));

    for (name, line) in names {
        if !seen.insert(name) {
            return Err(ParseError::DuplicateDeclaration { name: name.to_string(),
                                                          line });
        }
    }
    Ok(())
}
