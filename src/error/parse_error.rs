#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
///
/// The `Display` implementation produces the Greek message shown to the
/// user, with the 1-based source line where the problem was detected.
pub enum ParseError {
    /// A string literal was opened but its closing delimiter never appeared
    /// before the end of the line.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The lexer hit a character sequence that belongs to no token.
    UnexpectedCharacter {
        /// The offending lexeme.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// What the parser was expecting at this point.
        expected: String,
        /// The token actually encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A declaration was malformed (bad array bounds, too many dimensions,
    /// and similar).
    IllegalDeclaration {
        /// Details describing what is wrong with the declaration.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A variable, parameter, or subprogram name was declared twice in the
    /// same frame.
    DuplicateDeclaration {
        /// The name that was redeclared.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found source text after `ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ` that is not a
    /// subprogram definition.
    TrailingInput {
        /// The token that should not be there.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedString { line } => {
                write!(f, "Μη τερματισμένο αλφαριθμητικό στη γραμμή {line}.")
            },
            Self::UnexpectedCharacter { lexeme, line } => {
                write!(f, "Μη αναγνωρίσιμο σύμβολο '{lexeme}' στη γραμμή {line}.")
            },
            Self::UnexpectedToken { expected, found, line } => write!(f,
                "Συντακτικό λάθος στη γραμμή {line}: αναμενόταν {expected}, βρέθηκε {found}."),
            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Συντακτικό λάθος στη γραμμή {line}: απροσδόκητο τέλος προγράμματος.")
            },
            Self::IllegalDeclaration { details, line } => {
                write!(f, "Μη έγκυρη δήλωση στη γραμμή {line}: {details}.")
            },
            Self::DuplicateDeclaration { name, line } => {
                write!(f, "Το όνομα '{name}' στη γραμμή {line} έχει ήδη δηλωθεί.")
            },
            Self::TrailingInput { found, line } => write!(f,
                "Απροσδόκητο περιεχόμενο μετά το ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ στη γραμμή {line}: {found}."),
        }
    }
}

impl std::error::Error for ParseError {}
