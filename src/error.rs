/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of
/// source code: unterminated strings, unrecognized characters, unexpected
/// tokens, and malformed or duplicate declarations.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during execution: unknown
/// identifiers, type mismatches, arithmetic and bounds violations, invalid
/// input, and the debugger's stop signal.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

#[derive(Debug)]
/// The single error channel out of a full run: either the program never
/// parsed, or it failed while executing.
pub enum GlossaError {
    /// The source failed to lex or parse.
    Parse(ParseError),
    /// The program raised a runtime error (or was stopped).
    Runtime(RuntimeError),
}

impl From<ParseError> for GlossaError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for GlossaError {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for GlossaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(error) => write!(f, "{error}"),
            Self::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for GlossaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(error) => Some(error),
            Self::Runtime(error) => Some(error),
        }
    }
}
