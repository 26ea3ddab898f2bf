use logos::Logos;

use crate::{ast::VarType, error::ParseError};

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Keywords are matched case-sensitively against the Greek keyword table;
/// anything alphabetic that is not a keyword becomes an identifier. The
/// identifier alphabet covers Latin letters, the underscore, and the Greek
/// ranges U+0370–03FF and U+1F00–1FFF, so accented and polytonic names
/// lex like any other letter (input is assumed NFC-normalized).
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexingError)]
pub enum Token {
    /// `ΠΡΟΓΡΑΜΜΑ`
    #[token("ΠΡΟΓΡΑΜΜΑ")]
    Program,
    /// `ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ`
    #[token("ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ")]
    EndProgram,
    /// `ΣΤΑΘΕΡΕΣ`
    #[token("ΣΤΑΘΕΡΕΣ")]
    Constants,
    /// `ΜΕΤΑΒΛΗΤΕΣ`
    #[token("ΜΕΤΑΒΛΗΤΕΣ")]
    Variables,
    /// `ΠΙΝΑΚΕΣ`
    #[token("ΠΙΝΑΚΕΣ")]
    Arrays,
    /// `ΑΡΧΗ`
    #[token("ΑΡΧΗ")]
    Begin,
    /// `ΑΝ`
    #[token("ΑΝ")]
    If,
    /// `ΤΟΤΕ`
    #[token("ΤΟΤΕ")]
    Then,
    /// `ΑΛΛΙΩΣ_ΑΝ`
    #[token("ΑΛΛΙΩΣ_ΑΝ")]
    ElseIf,
    /// `ΑΛΛΙΩΣ`
    #[token("ΑΛΛΙΩΣ")]
    Else,
    /// `ΤΕΛΟΣ_ΑΝ`
    #[token("ΤΕΛΟΣ_ΑΝ")]
    EndIf,
    /// `ΟΣΟ`
    #[token("ΟΣΟ")]
    While,
    /// `ΕΠΑΝΑΛΑΒΕ`
    #[token("ΕΠΑΝΑΛΑΒΕ")]
    Do,
    /// `ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ`
    #[token("ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ")]
    EndLoop,
    /// `ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ`
    #[token("ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ")]
    Repeat,
    /// `ΜΕΧΡΙΣ_ΟΤΟΥ`
    #[token("ΜΕΧΡΙΣ_ΟΤΟΥ")]
    Until,
    /// `ΓΙΑ`
    #[token("ΓΙΑ")]
    For,
    /// `ΑΠΟ`
    #[token("ΑΠΟ")]
    From,
    /// `ΜΕΧΡΙ`
    #[token("ΜΕΧΡΙ")]
    To,
    /// `ΜΕ_ΒΗΜΑ`
    #[token("ΜΕ_ΒΗΜΑ")]
    Step,
    /// `ΕΠΙΛΕΞΕ`
    #[token("ΕΠΙΛΕΞΕ")]
    Select,
    /// `ΠΕΡΙΠΤΩΣΗ`
    #[token("ΠΕΡΙΠΤΩΣΗ")]
    Case,
    /// `ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ`
    #[token("ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ")]
    EndSelect,
    /// `ΔΙΑΔΙΚΑΣΙΑ`
    #[token("ΔΙΑΔΙΚΑΣΙΑ")]
    Procedure,
    /// `ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ`
    #[token("ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ")]
    EndProcedure,
    /// `ΣΥΝΑΡΤΗΣΗ`
    #[token("ΣΥΝΑΡΤΗΣΗ")]
    Function,
    /// `ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ`
    #[token("ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ")]
    EndFunction,
    /// `ΚΑΛΕΣΕ`
    #[token("ΚΑΛΕΣΕ")]
    Call,
    /// `ΕΠΙΣΤΡΕΨΕ`
    #[token("ΕΠΙΣΤΡΕΨΕ")]
    Return,
    /// `ΔΙΑΒΑΣΕ`
    #[token("ΔΙΑΒΑΣΕ")]
    Read,
    /// `ΓΡΑΨΕ`
    #[token("ΓΡΑΨΕ")]
    Write,
    /// `ΚΑΙ`
    #[token("ΚΑΙ")]
    And,
    /// `Η`
    #[token("Η")]
    Or,
    /// `ΟΧΙ`
    #[token("ΟΧΙ")]
    Not,
    /// `DIV`
    #[token("DIV")]
    IntDiv,
    /// `MOD`
    #[token("MOD")]
    Mod,
    /// Boolean literal tokens: `ΑΛΗΘΗΣ` or `ΨΕΥΔΗΣ`.
    #[token("ΑΛΗΘΗΣ", |_| true)]
    #[token("ΨΕΥΔΗΣ", |_| false)]
    Bool(bool),
    /// Type keywords; the plural forms declare variables, the singular
    /// forms type parameters and function results.
    #[token("ΑΚΕΡΑΙΕΣ", |_| VarType::Integer)]
    #[token("ΑΚΕΡΑΙΑ", |_| VarType::Integer)]
    #[token("ΠΡΑΓΜΑΤΙΚΕΣ", |_| VarType::Real)]
    #[token("ΠΡΑΓΜΑΤΙΚΗ", |_| VarType::Real)]
    #[token("ΧΑΡΑΚΤΗΡΕΣ", |_| VarType::Character)]
    #[token("ΧΑΡΑΚΤΗΡΑΣ", |_| VarType::Character)]
    #[token("ΛΟΓΙΚΕΣ", |_| VarType::Boolean)]
    #[token("ΛΟΓΙΚΗ", |_| VarType::Boolean)]
    Type(VarType),
    /// Real literal tokens, such as `3.14`.
    #[regex(r"[0-9]+\.[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens, delimited by `"…"` or by guillemets `«…»`.
    /// No escape sequences; the closing delimiter must match the opening
    /// kind and appear before the end of the line.
    #[regex(r#""[^"\n\r]*"?"#, parse_quoted)]
    #[regex(r"«[^»\n\r]*»?", parse_guillemets)]
    Text(String),
    /// Identifier tokens; variable or subprogram names such as `α` or
    /// `Εμβαδόν`.
    #[regex(r"[A-Za-z_\u{0370}-\u{03ff}\u{1f00}-\u{1fff}][A-Za-z0-9_\u{0370}-\u{03ff}\u{1f00}-\u{1fff}]*",
            |lex| lex.slice().to_string())]
    Identifier(String),
    /// `<-`
    #[token("<-")]
    Assign,
    /// `<=`
    #[token("<=")]
    LessEq,
    /// `>=`
    #[token(">=")]
    GreaterEq,
    /// `<>`
    #[token("<>")]
    NotEq,
    /// `=`
    #[token("=")]
    Equals,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `..` — closed case ranges in `ΠΕΡΙΠΤΩΣΗ` arms.
    #[token("..")]
    DotDot,

    /// Newlines separate nothing by themselves; they only advance the line
    /// counter carried in the lexer extras.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// `! Comments run to the end of the line.`
    #[regex(r"![^\n]*", logos::skip)]
    Comment,
    /// Spaces, tabs, carriage returns, and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// The two ways lexing can fail. `UnexpectedCharacter` is the default
/// error logos produces when no pattern matches; `UnterminatedString` is
/// raised by the string callbacks when the closing delimiter is missing.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LexingError {
    /// No token pattern matched at the current position.
    #[default]
    UnexpectedCharacter,
    /// A string literal ran to the end of its line without closing.
    UnterminatedString,
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a real literal from the current token slice.
fn parse_real(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the delimiters from a `"…"` literal, rejecting it when the
/// closing quote is missing.
fn parse_quoted(lex: &logos::Lexer<Token>) -> Result<String, LexingError> {
    let slice = lex.slice();
    if slice.len() >= 2 && slice.ends_with('"') {
        Ok(slice[1..slice.len() - 1].to_string())
    } else {
        Err(LexingError::UnterminatedString)
    }
}

/// Strips the delimiters from a `«…»` literal, rejecting it when the
/// closing guillemet is missing.
fn parse_guillemets(lex: &logos::Lexer<Token>) -> Result<String, LexingError> {
    let slice = lex.slice();
    if slice.chars().count() >= 2 && slice.ends_with('»') {
        Ok(slice['«'.len_utf8()..slice.len() - '»'.len_utf8()].to_string())
    } else {
        Err(LexingError::UnterminatedString)
    }
}

/// Tokenizes an entire source text into `(token, line)` pairs.
///
/// Whitespace and comments are discarded; every surviving token is tagged
/// with the 1-based line it started on.
///
/// # Errors
/// Returns `ParseError::UnterminatedString` or
/// `ParseError::UnexpectedCharacter` for input the lexer cannot accept.
///
/// # Example
/// ```
/// use glossa::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("α <- 42").unwrap();
/// assert_eq!(tokens[0].0, Token::Identifier("α".to_string()));
/// assert_eq!(tokens[1].0, Token::Assign);
/// assert_eq!(tokens[2].0, Token::Integer(42));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(LexingError::UnterminatedString) => {
                return Err(ParseError::UnterminatedString { line: lexer.extras.line });
            },
            Err(LexingError::UnexpectedCharacter) => {
                return Err(ParseError::UnexpectedCharacter { lexeme: lexer.slice().to_string(),
                                                             line:   lexer.extras.line, });
            },
        }
    }

    Ok(tokens)
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Program => "ΠΡΟΓΡΑΜΜΑ",
            Self::EndProgram => "ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
            Self::Constants => "ΣΤΑΘΕΡΕΣ",
            Self::Variables => "ΜΕΤΑΒΛΗΤΕΣ",
            Self::Arrays => "ΠΙΝΑΚΕΣ",
            Self::Begin => "ΑΡΧΗ",
            Self::If => "ΑΝ",
            Self::Then => "ΤΟΤΕ",
            Self::ElseIf => "ΑΛΛΙΩΣ_ΑΝ",
            Self::Else => "ΑΛΛΙΩΣ",
            Self::EndIf => "ΤΕΛΟΣ_ΑΝ",
            Self::While => "ΟΣΟ",
            Self::Do => "ΕΠΑΝΑΛΑΒΕ",
            Self::EndLoop => "ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ",
            Self::Repeat => "ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ",
            Self::Until => "ΜΕΧΡΙΣ_ΟΤΟΥ",
            Self::For => "ΓΙΑ",
            Self::From => "ΑΠΟ",
            Self::To => "ΜΕΧΡΙ",
            Self::Step => "ΜΕ_ΒΗΜΑ",
            Self::Select => "ΕΠΙΛΕΞΕ",
            Self::Case => "ΠΕΡΙΠΤΩΣΗ",
            Self::EndSelect => "ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ",
            Self::Procedure => "ΔΙΑΔΙΚΑΣΙΑ",
            Self::EndProcedure => "ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ",
            Self::Function => "ΣΥΝΑΡΤΗΣΗ",
            Self::EndFunction => "ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ",
            Self::Call => "ΚΑΛΕΣΕ",
            Self::Return => "ΕΠΙΣΤΡΕΨΕ",
            Self::Read => "ΔΙΑΒΑΣΕ",
            Self::Write => "ΓΡΑΨΕ",
            Self::And => "ΚΑΙ",
            Self::Or => "Η",
            Self::Not => "ΟΧΙ",
            Self::IntDiv => "DIV",
            Self::Mod => "MOD",
            Self::Bool(true) => "ΑΛΗΘΗΣ",
            Self::Bool(false) => "ΨΕΥΔΗΣ",
            Self::Type(var_type) => return write!(f, "{var_type}"),
            Self::Real(value) => return write!(f, "{value}"),
            Self::Integer(value) => return write!(f, "{value}"),
            Self::Text(value) => return write!(f, "\"{value}\""),
            Self::Identifier(name) => return write!(f, "'{name}'"),
            Self::Assign => "<-",
            Self::LessEq => "<=",
            Self::GreaterEq => ">=",
            Self::NotEq => "<>",
            Self::Equals => "=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::DotDot => "..",
            Self::NewLine | Self::Comment | Self::Ignored => "",
        };
        write!(f, "{text}")
    }
}
