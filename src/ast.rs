/// The four declarable types of the language.
///
/// Every variable, parameter, and function result carries exactly one of
/// these tags. Arrays are not a type of their own; they carry an element
/// type plus fixed bounds in their declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    /// `ΑΚΕΡΑΙΕΣ` / `ΑΚΕΡΑΙΑ` — 64-bit signed integers.
    Integer,
    /// `ΠΡΑΓΜΑΤΙΚΕΣ` / `ΠΡΑΓΜΑΤΙΚΗ` — double precision reals.
    Real,
    /// `ΧΑΡΑΚΤΗΡΕΣ` / `ΧΑΡΑΚΤΗΡΑΣ` — character strings.
    Character,
    /// `ΛΟΓΙΚΕΣ` / `ΛΟΓΙΚΗ` — boolean values.
    Boolean,
}

impl std::fmt::Display for VarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "ΑΚΕΡΑΙΑ",
            Self::Real => "ΠΡΑΓΜΑΤΙΚΗ",
            Self::Character => "ΧΑΡΑΚΤΗΡΑΣ",
            Self::Boolean => "ΛΟΓΙΚΗ",
        };
        write!(f, "{name}")
    }
}

/// A parsed program: header name, declaration sections, main body, and the
/// subprograms declared alongside it.
///
/// The tree is built once by the parser and never mutated afterwards; the
/// interpreter walks it by shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The name following `ΠΡΟΓΡΑΜΜΑ`.
    pub name:       String,
    /// `ΣΤΑΘΕΡΕΣ` entries in declaration order.
    pub constants:  Vec<ConstDecl>,
    /// `ΜΕΤΑΒΛΗΤΕΣ` (and `ΠΙΝΑΚΕΣ`) entries in declaration order.
    pub variables:  Vec<VarDecl>,
    /// Statements between `ΑΡΧΗ` and `ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ`.
    pub body:       Vec<Statement>,
    /// `ΔΙΑΔΙΚΑΣΙΑ` definitions, wherever they appeared in the source.
    pub procedures: Vec<ProcedureDef>,
    /// `ΣΥΝΑΡΤΗΣΗ` definitions, wherever they appeared in the source.
    pub functions:  Vec<FunctionDef>,
    /// Line of the `ΠΡΟΓΡΑΜΜΑ` keyword.
    pub line:       usize,
}

/// A single `ΣΤΑΘΕΡΕΣ` entry: `name = expression`.
///
/// The expression is evaluated once when the global frame is built; the
/// resulting slot is immutable for the rest of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    /// The constant's name.
    pub name:  String,
    /// The defining expression, usually a literal.
    pub value: Expr,
    /// Line number in the source code.
    pub line:  usize,
}

/// A single declared variable or array.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// The variable's name.
    pub name:     String,
    /// The declared element type.
    pub var_type: VarType,
    /// Array bounds (one or two), or `None` for a scalar.
    pub dims:     Option<Vec<usize>>,
    /// Line number in the source code.
    pub line:     usize,
}

/// A formal parameter of a subprogram: name plus declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter's name.
    pub name:     String,
    /// The declared type the argument is coerced to.
    pub var_type: VarType,
}

/// A `ΔΙΑΔΙΚΑΣΙΑ` definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDef {
    /// The procedure's name.
    pub name:   String,
    /// Formal parameters in declaration order.
    pub params: Vec<Parameter>,
    /// Locally declared variables.
    pub locals: Vec<VarDecl>,
    /// The procedure body.
    pub body:   Vec<Statement>,
    /// Line of the `ΔΙΑΔΙΚΑΣΙΑ` keyword.
    pub line:   usize,
}

/// A `ΣΥΝΑΡΤΗΣΗ` definition. Unlike a procedure it carries a return type
/// and must leave through `ΕΠΙΣΤΡΕΨΕ`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The function's name.
    pub name:        String,
    /// Formal parameters in declaration order.
    pub params:      Vec<Parameter>,
    /// Locally declared variables.
    pub locals:      Vec<VarDecl>,
    /// The function body.
    pub body:        Vec<Statement>,
    /// Declared result type; the returned value is coerced to it.
    pub return_type: VarType,
    /// Line of the `ΣΥΝΑΡΤΗΣΗ` keyword.
    pub line:        usize,
}

/// The target of an assignment or a `ΔΙΑΒΑΣΕ`: a plain name or an indexed
/// array cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// The variable or array name.
    pub name:    String,
    /// Index expressions (one or two), or `None` for a scalar target.
    pub indices: Option<Vec<Expr>>,
    /// Line number in the source code.
    pub line:    usize,
}

/// One `ΑΝ`/`ΑΛΛΙΩΣ_ΑΝ` arm: a boolean guard and the statements it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct IfArm {
    /// The guard expression; must evaluate to a boolean.
    pub condition: Expr,
    /// The statements executed when the guard holds.
    pub body:      Vec<Statement>,
}

/// One value pattern of a `ΠΕΡΙΠΤΩΣΗ` arm.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseValue {
    /// A single value compared for equality with the subject.
    Single(Expr),
    /// A closed range `a..b`; matches when `a ≤ subject ≤ b`.
    Range(Expr, Expr),
}

/// One `ΠΕΡΙΠΤΩΣΗ` arm: the values it matches and its body.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    /// The comma-separated value patterns.
    pub values: Vec<CaseValue>,
    /// The statements executed when any pattern matches.
    pub body:   Vec<Statement>,
}

/// An executable statement.
///
/// The interpreter matches exhaustively over this enum, so adding a variant
/// is a compile-time event everywhere a statement is handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Assignment `target <- expression`.
    Assign {
        /// The name or indexed cell being written.
        target: Target,
        /// The expression producing the stored value.
        value:  Expr,
        /// Line number in the source code.
        line:   usize,
    },
    /// `ΑΝ … ΤΟΤΕ … (ΑΛΛΙΩΣ_ΑΝ … ΤΟΤΕ …)* (ΑΛΛΙΩΣ …)? ΤΕΛΟΣ_ΑΝ`.
    If {
        /// The `ΑΝ` arm followed by any `ΑΛΛΙΩΣ_ΑΝ` arms, in source order.
        arms:      Vec<IfArm>,
        /// The `ΑΛΛΙΩΣ` branch, if present.
        else_body: Option<Vec<Statement>>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `ΟΣΟ … ΕΠΑΝΑΛΑΒΕ … ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ`.
    While {
        /// The guard checked before each iteration.
        condition: Expr,
        /// The loop body.
        body:      Vec<Statement>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ … ΜΕΧΡΙΣ_ΟΤΟΥ …` — runs at least once, stops when
    /// the condition becomes true.
    RepeatUntil {
        /// The loop body.
        body:      Vec<Statement>,
        /// The guard checked after each iteration.
        condition: Expr,
        /// Line number in the source code.
        line:      usize,
    },
    /// `ΓΙΑ v ΑΠΟ a ΜΕΧΡΙ b (ΜΕ_ΒΗΜΑ k)? … ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ`.
    For {
        /// The iteration variable; must name a declared numeric slot.
        var:   String,
        /// The starting value, evaluated once.
        start: Expr,
        /// The bound, evaluated once.
        end:   Expr,
        /// The stride, evaluated once; defaults to 1 and must be nonzero.
        step:  Option<Expr>,
        /// The loop body.
        body:  Vec<Statement>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `ΕΠΙΛΕΞΕ … (ΠΕΡΙΠΤΩΣΗ …)* (ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ …)? ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ`.
    Select {
        /// The subject, evaluated exactly once.
        subject: Expr,
        /// The `ΠΕΡΙΠΤΩΣΗ` arms in source order; the first match wins.
        arms:    Vec<CaseArm>,
        /// The `ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ` arm, if present.
        default: Option<Vec<Statement>>,
        /// Line number in the source code.
        line:    usize,
    },
    /// `ΔΙΑΒΑΣΕ target (, target)*` — one input line per target.
    Read {
        /// The variables or array cells receiving input.
        targets: Vec<Target>,
        /// Line number in the source code.
        line:    usize,
    },
    /// `ΓΡΑΨΕ expr (, expr)*` — one output line per statement.
    Write {
        /// The expressions to format and emit.
        values: Vec<Expr>,
        /// Line number in the source code.
        line:   usize,
    },
    /// `ΚΑΛΕΣΕ name(args)` — procedure invocation.
    Call {
        /// The procedure's name.
        name: String,
        /// The argument expressions.
        args: Vec<Expr>,
        /// Line number in the source code.
        line: usize,
    },
    /// `ΕΠΙΣΤΡΕΨΕ expression` — leaves the enclosing function with a value.
    Return {
        /// The returned expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Statement {
    /// Gets the source line this statement starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Assign { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::RepeatUntil { line, .. }
            | Self::For { line, .. }
            | Self::Select { line, .. }
            | Self::Read { line, .. }
            | Self::Write { line, .. }
            | Self::Call { line, .. }
            | Self::Return { line, .. } => *line,
        }
    }

    /// Gets the keyword (or symbol) that introduces this statement, for
    /// trace output and diagnostics.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "<-",
            Self::If { .. } => "ΑΝ",
            Self::While { .. } => "ΟΣΟ",
            Self::RepeatUntil { .. } => "ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ",
            Self::For { .. } => "ΓΙΑ",
            Self::Select { .. } => "ΕΠΙΛΕΞΕ",
            Self::Read { .. } => "ΔΙΑΒΑΣΕ",
            Self::Write { .. } => "ΓΡΑΨΕ",
            Self::Call { .. } => "ΚΑΛΕΣΕ",
            Self::Return { .. } => "ΕΠΙΣΤΡΕΨΕ",
        }
    }
}

/// An abstract syntax tree node representing an expression.
///
/// Each variant models one syntactic construct and carries the 1-based line
/// it came from for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An integer literal such as `42`.
    IntegerLit {
        /// The literal value.
        value: i64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A real literal such as `3.14`.
    RealLit {
        /// The literal value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal, delimited by `"…"` or `«…»` in the source.
    TextLit {
        /// The literal text without its delimiters.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// A boolean literal: `ΑΛΗΘΗΣ` or `ΨΕΥΔΗΣ`.
    BoolLit {
        /// The literal value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable (or whole array) by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// An indexed array cell, with one or two index expressions.
    Indexed {
        /// Name of the array.
        name:    String,
        /// The index expressions.
        indices: Vec<Expr>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A unary operation (negation or `ΟΧΙ`).
    Unary {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A call to a built-in or user-defined function, such as `Τ_Ρ(x)`.
    Call {
        /// Name of the function being called.
        name: String,
        /// Arguments to the function.
        args: Vec<Self>,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::IntegerLit { line, .. }
            | Self::RealLit { line, .. }
            | Self::TextLit { line, .. }
            | Self::BoolLit { line, .. }
            | Self::Variable { line, .. }
            | Self::Indexed { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Call { line, .. } => *line,
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Real division (`/`); the result is always REAL.
    Div,
    /// Integer quotient (`DIV`); both operands must be integers.
    IntDiv,
    /// Integer remainder (`MOD`); both operands must be integers.
    Mod,
    /// Equal to (`=`)
    Eq,
    /// Not equal to (`<>`)
    NotEq,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEq,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEq,
    /// Logical conjunction (`ΚΑΙ`), short-circuiting.
    And,
    /// Logical disjunction (`Η`), short-circuiting.
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Unary plus (e.g. `+x`); numeric identity.
    Plus,
    /// Logical NOT (`ΟΧΙ x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "DIV",
            Self::Mod => "MOD",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::And => "ΚΑΙ",
            Self::Or => "Η",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Plus => "+",
            Self::Not => "ΟΧΙ",
        };
        write!(f, "{operator}")
    }
}
