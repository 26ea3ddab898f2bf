/// Binary operator parsing: logical chains, the single relational level,
/// and the additive/multiplicative ladder.
pub mod binary;
/// The parser's entry point for expressions and its shared result alias.
pub mod core;
/// Program structure: the `ΠΡΟΓΡΑΜΜΑ` header, declaration sections, and
/// subprogram definitions.
pub mod program;
/// Statement parsing: everything between `ΑΡΧΗ` and the closing keyword of
/// the enclosing construct.
pub mod statement;
/// Prefix operators and primaries: `ΟΧΙ`, unary sign, literals, names,
/// indexed references, calls, and parenthesized expressions.
pub mod unary;
/// Small shared helpers: token expectation, identifier parsing, and
/// comma-separated lists.
pub mod utils;
