use crate::interpreter::{
    units::{Prefix, UnitDef},
    value::{complex::ComplexNumber, unit::UnitValue},
};

/// Represents a literal value in the language.
///
/// `LiteralValue` covers all constant values that can appear directly in
/// source code: numbers, imaginary numbers, unit literals such as `5 cm`,
/// strings and booleans.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A real number literal.
    Number(f64),
    /// An imaginary literal such as `2i`.
    Complex(ComplexNumber),
    /// A number written with a unit.
    Unit(UnitValue),
    /// A double-quoted string.
    String(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<ComplexNumber> for LiteralValue {
    fn from(value: ComplexNumber) -> Self {
        Self::Complex(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Every statement is an expression: assignments and function definitions
/// evaluate to a value as well. Each variant records the byte offset of the
/// construct for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, unit, string, boolean, etc.).
    Literal {
        /// The constant value.
        value:    LiteralValue,
        /// Byte offset in the source code.
        position: usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name:     String,
        /// Byte offset in the source code.
        position: usize,
    },
    /// A prefix or postfix unary operation.
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Byte offset in the source code.
        position: usize,
    },
    /// A binary operation (addition, comparison, etc.).
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Byte offset in the source code.
        position: usize,
    },
    /// A range `start:end` or `start:step:end`.
    Range {
        /// First element.
        start:    Box<Self>,
        /// Optional step, `1` when absent.
        step:     Option<Box<Self>>,
        /// Inclusive end.
        end:      Box<Self>,
        /// Byte offset in the source code.
        position: usize,
    },
    /// Matrix literal `[a, b; c, d]`.
    Matrix {
        /// Rows of entries. `[ ]` has no rows.
        rows:     Vec<Vec<Self>>,
        /// Byte offset in the source code.
        position: usize,
    },
    /// Index access on an arbitrary expression, such as `[1, 2, 3](2)`.
    Index {
        /// The indexed value.
        target:   Box<Self>,
        /// One or two index expressions (1-based).
        indices:  Vec<Self>,
        /// Byte offset in the source code.
        position: usize,
    },
    /// `name(args)`: a function call or an index read, decided when
    /// evaluated.
    Call {
        /// Name of the function or variable.
        name:      String,
        /// Argument expressions.
        arguments: Vec<Self>,
        /// Byte offset in the source code.
        position:  usize,
    },
    /// Unit conversion `expr in unit`.
    Conversion {
        /// The expression to convert.
        expr:     Box<Self>,
        /// Target unit.
        unit:     &'static UnitDef,
        /// Target prefix.
        prefix:   &'static Prefix,
        /// Byte offset in the source code.
        position: usize,
    },
    /// Assignment to a name, optionally through an index (`a(1, 2) = 3`).
    Assignment {
        /// The assigned name.
        name:     String,
        /// Index expressions for a partial write.
        indices:  Option<Vec<Self>>,
        /// The right-hand side.
        value:    Box<Self>,
        /// Byte offset in the source code.
        position: usize,
    },
    /// `function name(params) = body`.
    FunctionDefinition(FunctionDef),
}

impl Expr {
    /// Gets the byte offset of the expression.
    /// ## Example
    /// ```
    /// use unitmath::ast::Expr;
    ///
    /// let expr = Expr::Variable { name:     "x".to_string(),
    ///                             position: 5, };
    ///
    /// assert_eq!(expr.position(), 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Literal { position, .. }
            | Self::Variable { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::Range { position, .. }
            | Self::Matrix { position, .. }
            | Self::Index { position, .. }
            | Self::Call { position, .. }
            | Self::Conversion { position, .. }
            | Self::Assignment { position, .. }
            | Self::FunctionDefinition(FunctionDef { position, .. }) => *position,
        }
    }
}

/// Represents a user-defined function definition.
///
/// Only the parameter list and the body are kept: names in the body that are
/// not parameters are looked up in the scope current at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:     String,
    /// The parameter names (e.g. `x`).
    pub params:   Vec<String>,
    /// The body expression evaluated when the function is called.
    pub body:     Box<Expr>,
    /// Byte offset in the source code.
    pub position: usize,
}

impl FunctionDef {
    /// Returns the invocation signature, such as `f(x,y)`.
    ///
    /// ## Example
    /// ```
    /// use unitmath::ast::{Expr, FunctionDef};
    ///
    /// let def = FunctionDef { name:     "f".to_string(),
    ///                         params:   vec!["x".to_string(), "y".to_string()],
    ///                         body:     Box::new(Expr::Variable { name:     "x".to_string(),
    ///                                                             position: 0, }),
    ///                         position: 0, };
    /// assert_eq!(def.signature(), "f(x,y)");
    /// ```
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.params.join(","))
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic and comparisons.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

impl BinaryOperator {
    /// Returns `true` for the six comparison operators.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::Equal
                 | Self::NotEqual)
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Identity (e.g. `+x`).
    Plus,
    /// Postfix factorial (e.g. `x!`).
    Factorial,
    /// Postfix transpose (e.g. `x'`).
    Transpose,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Pow => "^",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Plus => "+",
            Self::Factorial => "!",
            Self::Transpose => "'",
        };
        write!(f, "{operator}")
    }
}
