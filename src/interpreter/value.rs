use crate::{
    ast::VarType,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::i64_to_f64_checked,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models everything an expression can produce: the four scalar
/// types of the language plus whole arrays, which are values too — they
/// copy on assignment and on argument binding, never alias.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer value (64-bit).
    Integer(i64),
    /// A real value (double precision).
    Real(f64),
    /// A character-string value.
    Text(String),
    /// A boolean value, printed as `ΑΛΗΘΗΣ` / `ΨΕΥΔΗΣ`.
    Bool(bool),
    /// A rectangular 1-D or 2-D array of one element type.
    Array(ArrayValue),
}

/// A rectangular array with 1-based bounds and row-major flat storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    /// The declared element type every cell coerces to.
    pub elem_type: VarType,
    /// The declared upper bounds; one entry per dimension (1 or 2).
    pub dims:      Vec<usize>,
    /// Cell values in row-major order.
    pub data:      Vec<Value>,
}

impl ArrayValue {
    /// Creates an array with every cell set to the element type's default.
    #[must_use]
    pub fn new(elem_type: VarType, dims: Vec<usize>) -> Self {
        let total = dims.iter().product();
        let data = vec![Value::default_for(elem_type); total];
        Self { elem_type, dims, data }
    }

    /// Resolves 1-based indices to a flat offset, checking the index count
    /// and every bound.
    ///
    /// # Errors
    /// - `IndexCountMismatch` when the number of indices differs from the
    ///   array's rank.
    /// - `IndexOutOfBounds` when any index leaves `[1, bound]`.
    pub fn offset(&self, name: &str, indices: &[i64], line: usize) -> EvalResult<usize> {
        if indices.len() != self.dims.len() {
            return Err(RuntimeError::IndexCountMismatch { name:     name.to_string(),
                                                          expected: self.dims.len(),
                                                          found:    indices.len(),
                                                          line, });
        }
        let mut flat = 0usize;
        for (&index, &bound) in indices.iter().zip(&self.dims) {
            if index < 1 || index as usize > bound {
                return Err(RuntimeError::IndexOutOfBounds { name: name.to_string(),
                                                            index,
                                                            bound,
                                                            line });
            }
            flat = flat * bound + (index as usize - 1);
        }
        Ok(flat)
    }

    /// Reads the cell at the given 1-based indices.
    ///
    /// # Errors
    /// Propagates the bounds checks of [`Self::offset`].
    pub fn get(&self, name: &str, indices: &[i64], line: usize) -> EvalResult<Value> {
        let flat = self.offset(name, indices, line)?;
        Ok(self.data[flat].clone())
    }

    /// Writes the cell at the given 1-based indices, coercing the value to
    /// the element type.
    ///
    /// # Errors
    /// Propagates the bounds checks of [`Self::offset`] and the coercion
    /// rules of [`Value::coerce_to`].
    pub fn set(&mut self, name: &str, indices: &[i64], value: Value, line: usize)
               -> EvalResult<()> {
        let flat = self.offset(name, indices, line)?;
        self.data[flat] = value.coerce_to(self.elem_type, line)?;
        Ok(())
    }
}

impl Value {
    /// The default initial value of a declared type: `0`, `0.0`, the empty
    /// string, or `ΨΕΥΔΗΣ`.
    #[must_use]
    pub const fn default_for(var_type: VarType) -> Self {
        match var_type {
            VarType::Integer => Self::Integer(0),
            VarType::Real => Self::Real(0.0),
            VarType::Character => Self::Text(String::new()),
            VarType::Boolean => Self::Bool(false),
        }
    }

    /// Coerces the value to a declared scalar type.
    ///
    /// The accepted promotions are exactly the language's: INTEGER takes
    /// integers and booleans (1/0); REAL additionally widens integers;
    /// BOOLEAN and CHARACTER take only their own kind. Arrays never coerce
    /// to a scalar.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` for every other combination,
    /// and `RuntimeError::Overflow` when widening an integer that `f64`
    /// cannot represent exactly.
    ///
    /// # Example
    /// ```
    /// use glossa::{ast::VarType, interpreter::value::Value};
    ///
    /// let widened = Value::Integer(3).coerce_to(VarType::Real, 1).unwrap();
    /// assert_eq!(widened, Value::Real(3.0));
    ///
    /// assert!(Value::Real(3.5).coerce_to(VarType::Integer, 1).is_err());
    /// ```
    pub fn coerce_to(self, var_type: VarType, line: usize) -> EvalResult<Self> {
        match (var_type, self) {
            (VarType::Integer, Self::Integer(n)) => Ok(Self::Integer(n)),
            (VarType::Integer, Self::Bool(b)) => Ok(Self::Integer(i64::from(b))),
            (VarType::Real, Self::Real(r)) => Ok(Self::Real(r)),
            (VarType::Real, Self::Integer(n)) => Ok(Self::Real(i64_to_f64_checked(n, line)?)),
            (VarType::Real, Self::Bool(b)) => Ok(Self::Real(if b { 1.0 } else { 0.0 })),
            (VarType::Boolean, Self::Bool(b)) => Ok(Self::Bool(b)),
            (VarType::Character, Self::Text(s)) => Ok(Self::Text(s)),
            (expected, _) => Err(RuntimeError::TypeMismatch { expected, line }),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for every guard (`ΑΝ`, `ΟΣΟ`, `ΜΕΧΡΙΣ_ΟΤΟΥ`) and for the
    /// operands of `ΚΑΙ`, `Η`, and `ΟΧΙ`.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` expecting a boolean.
    pub const fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::TypeMismatch { expected: VarType::Boolean,
                                                  line }),
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Errors
    /// Returns `RuntimeError::ExpectedNumber` for non-numeric values and
    /// `RuntimeError::Overflow` for integers `f64` cannot hold exactly.
    pub const fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => i64_to_f64_checked(*n, line),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Returns `true` if the value is numeric (integer or real).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Real(..))
    }

    /// The declared type a scalar value corresponds to, or `None` for
    /// arrays. Used to type `ΣΤΑΘΕΡΕΣ` slots from their evaluated value.
    #[must_use]
    pub const fn scalar_type(&self) -> Option<VarType> {
        match self {
            Self::Integer(..) => Some(VarType::Integer),
            Self::Real(..) => Some(VarType::Real),
            Self::Text(..) => Some(VarType::Character),
            Self::Bool(..) => Some(VarType::Boolean),
            Self::Array(..) => None,
        }
    }
}

/// Formats a real for output: shortest round-trip decimal, with `.0`
/// forced when the value is integral so reals never print like integers.
fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", format_real(*r)),
            Self::Text(s) => write!(f, "{s}"),
            Self::Bool(true) => write!(f, "ΑΛΗΘΗΣ"),
            Self::Bool(false) => write!(f, "ΨΕΥΔΗΣ"),
            Self::Array(array) => {
                if let [rows, cols] = array.dims[..] {
                    write!(f, "[")?;
                    for row in 0..rows {
                        if row > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "[")?;
                        for col in 0..cols {
                            if col > 0 {
                                write!(f, ",")?;
                            }
                            write!(f, "{}", array.data[row * cols + col])?;
                        }
                        write!(f, "]")?;
                    }
                    write!(f, "]")
                } else {
                    write!(f, "[")?;
                    for (index, value) in array.data.iter().enumerate() {
                        if index > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{value}")?;
                    }
                    write!(f, "]")
                }
            },
        }
    }
}
