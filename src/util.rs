/// Safe numeric conversions and integer-division helpers.
///
/// These routines are shared by the coercion layer, the built-in library,
/// and the `DIV`/`MOD` operators.
pub mod num;
