use crate::ast::VarType;

#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
///
/// Every variant carries the 1-based source line where it was raised. The
/// `Display` implementation is the Greek message the host shows to the
/// user; the interpreter never recovers from any of these — the first one
/// unwinds to the top of `run`.
pub enum RuntimeError {
    /// Tried to read or write an undeclared identifier.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `ΚΑΛΕΣΕ` named something that is not a declared procedure.
    UnknownProcedure {
        /// The name that failed to resolve.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call expression named something that is neither a built-in nor a
    /// declared function.
    UnknownFunction {
        /// The name that failed to resolve.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `ΚΑΛΕΣΕ` named a function or a built-in instead of a procedure.
    NotAProcedure {
        /// The name that resolved to something callable but wrong.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Indexed a name that is not an array.
    NotAnArray {
        /// The name of the scalar variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Used an array name where a scalar is required (e.g. a `ΔΙΑΒΑΣΕ`
    /// target without indices).
    ArrayRequiresIndices {
        /// The name of the array.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Supplied the wrong number of indices for an array's rank.
    IndexCountMismatch {
        /// The name of the array.
        name:     String,
        /// The number of declared dimensions.
        expected: usize,
        /// The number of indices actually supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An index expression did not evaluate to an integer.
    NonIntegerIndex {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An index fell outside the declared `[1, bound]` range.
    IndexOutOfBounds {
        /// The name of the array.
        name:  String,
        /// The index that was requested.
        index: i64,
        /// The declared upper bound of that dimension.
        bound: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A value could not be coerced to the declared type of its slot.
    TypeMismatch {
        /// The declared type that was expected.
        expected: VarType,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A binary operator received operands it cannot combine.
    IncompatibleOperands {
        /// The operator, as written in the source.
        op:   String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Assigned one array to another with different bounds.
    ShapeMismatch {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to assign to a `ΣΤΑΘΕΡΕΣ` slot.
    AssignmentToConstant {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a subprogram or
    /// built-in.
    ArityMismatch {
        /// The callee's name.
        name:     String,
        /// The number of declared parameters.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `ΕΠΙΣΤΡΕΨΕ` executed outside of a function body.
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function body finished without executing `ΕΠΙΣΤΡΕΨΕ`.
    FunctionWithoutReturn {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `ΓΙΑ` loop was entered with a zero step.
    InvalidLoopStep {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division (or `DIV`/`MOD`) by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A built-in received an argument outside its mathematical domain.
    DomainError {
        /// The name of the built-in function.
        function: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Integer arithmetic overflowed, or a value left the exactly
    /// representable range during conversion.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `ΔΙΑΒΑΣΕ` received a line that does not parse as the target's type.
    InvalidInput {
        /// The raw input line.
        text:     String,
        /// The declared type of the target.
        expected: VarType,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `ΔΙΑΒΑΣΕ` requested input but the source had none left.
    InputExhausted {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The recursion limit was hit; the program would otherwise abort the
    /// host process.
    CallDepthExceeded {
        /// The source line of the call that went too deep.
        line: usize,
    },
    /// The debugger hook asked the interpreter to stop.
    Stopped {
        /// The source line of the statement being executed.
        line: usize,
    },
}

/// The wording the coercion messages use for each declared type, matching
/// the accusative-free phrasing of the reference interpreter.
const fn expected_name(var_type: VarType) -> &'static str {
    match var_type {
        VarType::Integer => "ακέραιος",
        VarType::Real => "πραγματικός",
        VarType::Character => "αλφαριθμητικό",
        VarType::Boolean => "λογική τιμή",
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Άγνωστη μεταβλητή '{name}' στη γραμμή {line}.")
            },
            Self::UnknownProcedure { name, line } => {
                write!(f, "Άγνωστη διαδικασία '{name}' στη γραμμή {line}.")
            },
            Self::UnknownFunction { name, line } => {
                write!(f, "Άγνωστη συνάρτηση '{name}' στη γραμμή {line}.")
            },
            Self::NotAProcedure { name, line } => {
                write!(f, "Το '{name}' στη γραμμή {line} δεν είναι διαδικασία.")
            },
            Self::NotAnArray { name, line } => {
                write!(f, "Η '{name}' στη γραμμή {line} δεν είναι πίνακας.")
            },
            Self::ArrayRequiresIndices { name, line } => {
                write!(f, "Η '{name}' είναι πίνακας — απαιτούνται δείκτες (γραμμή {line}).")
            },
            Self::IndexCountMismatch { name, expected, found, line } => write!(f,
                "Ο πίνακας '{name}' αναμένει {expected} δείκτες, δόθηκαν {found} (γραμμή {line})."),
            Self::NonIntegerIndex { line } => {
                write!(f, "Οι δείκτες πίνακα πρέπει να είναι ακέραιοι (γραμμή {line}).")
            },
            Self::IndexOutOfBounds { name, index, bound, line } => write!(f,
                "Η πρόσβαση στον πίνακα '{name}' είναι εκτός ορίων: δείκτης {index}, όρια 1..{bound} (γραμμή {line})."),
            Self::TypeMismatch { expected, line } => {
                write!(f, "Αναμενόταν {} στη γραμμή {line}.", expected_name(*expected))
            },
            Self::ExpectedNumber { line } => {
                write!(f, "Αναμενόταν αριθμός στη γραμμή {line}.")
            },
            Self::IncompatibleOperands { op, line } => {
                write!(f, "Μη συμβατοί τελεστέοι για τον τελεστή '{op}' στη γραμμή {line}.")
            },
            Self::ShapeMismatch { line } => {
                write!(f, "Ασύμβατες διαστάσεις πινάκων στη γραμμή {line}.")
            },
            Self::AssignmentToConstant { name, line } => {
                write!(f, "Η '{name}' είναι σταθερά και δεν επιδέχεται εκχώρηση (γραμμή {line}).")
            },
            Self::ArityMismatch { name, expected, found, line } => write!(f,
                "Η '{name}' αναμένει {expected} ορίσματα, δόθηκαν {found} (γραμμή {line})."),
            Self::ReturnOutsideFunction { line } => write!(f,
                "Η ΕΠΙΣΤΡΕΨΕ επιτρέπεται μόνο μέσα σε συνάρτηση (γραμμή {line})."),
            Self::FunctionWithoutReturn { name, line } => {
                write!(f, "Η συνάρτηση '{name}' δεν επέστρεψε τιμή (γραμμή {line}).")
            },
            Self::InvalidLoopStep { line } => {
                write!(f, "Μη έγκυρο βήμα επανάληψης στη γραμμή {line}.")
            },
            Self::DivisionByZero { line } => {
                write!(f, "Διαίρεση με το μηδέν στη γραμμή {line}.")
            },
            Self::DomainError { function, line } => write!(f,
                "Μη έγκυρο όρισμα στη συνάρτηση {function} (γραμμή {line})."),
            Self::Overflow { line } => {
                write!(f, "Αριθμητική υπερχείλιση στη γραμμή {line}.")
            },
            Self::InvalidInput { text, expected, line } => write!(f,
                "Μη έγκυρη είσοδος '{text}' στη γραμμή {line}: αναμενόταν {}.",
                expected_name(*expected)),
            Self::InputExhausted { line } => write!(f,
                "Απαιτείται είσοδος (ΔΙΑΒΑΣΕ) στη γραμμή {line} αλλά η πηγή εξαντλήθηκε."),
            Self::CallDepthExceeded { line } => write!(f,
                "Υπέρβαση του μέγιστου βάθους κλήσεων στη γραμμή {line}."),
            Self::Stopped { line } => {
                write!(f, "Η εκτέλεση διακόπηκε στη γραμμή {line}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
