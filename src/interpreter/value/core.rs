use std::fmt::Display;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{complex::ComplexNumber, matrix::Matrix, range::Range, unit::UnitValue},
    },
    util::num::format_number,
};

/// Represents a runtime value in the interpreter.
///
/// This enum is the closed set of kinds every operator dispatches over.
/// Matrices own their elements, so assigning a matrix never aliases another
/// binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A double precision real number.
    Number(f64),
    /// A complex number.
    Complex(ComplexNumber),
    /// A magnitude with a physical unit.
    Unit(UnitValue),
    /// A rectangular matrix of scalar values.
    Matrix(Matrix),
    /// A lazy range `start:step:end`, behaving like a row vector.
    Range(Range),
    /// A text value.
    String(String),
    /// A boolean, produced by comparisons. Coerces to `1` or `0` when an
    /// operator has no rule for it.
    Bool(bool),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<ComplexNumber> for Value {
    fn from(c: ComplexNumber) -> Self {
        Self::Complex(c)
    }
}

impl From<UnitValue> for Value {
    fn from(u: UnitValue) -> Self {
        Self::Unit(u)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Self::Matrix(m)
    }
}

impl From<Range> for Value {
    fn from(r: Range) -> Self {
        Self::Range(r)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl Value {
    /// Returns the name of the runtime kind, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Complex(_) => "complex",
            Self::Unit(_) => "unit",
            Self::Matrix(_) => "matrix",
            Self::Range(_) => "range",
            Self::String(_) => "string",
            Self::Bool(_) => "boolean",
        }
    }

    /// Returns the primitive value this value coerces to, if any.
    ///
    /// This is the single unwrapping step the operator dispatch tries before
    /// reporting an unsupported combination. Only booleans coerce.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Bool(true).as_primitive(), Some(Value::Number(1.0)));
    /// assert_eq!(Value::Number(2.0).as_primitive(), None);
    /// ```
    #[must_use]
    pub fn as_primitive(&self) -> Option<Self> {
        match self {
            Self::Bool(b) => Some(Self::Number(if *b { 1.0 } else { 0.0 })),
            _ => None,
        }
    }

    /// Returns `true` for matrices and ranges.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Matrix(_) | Self::Range(_))
    }

    /// Converts a matrix or range into a matrix. Returns `None` for scalars.
    #[must_use]
    pub fn to_matrix(&self) -> Option<Matrix> {
        match self {
            Self::Matrix(m) => Some(m.clone()),
            Self::Range(r) => Some(r.to_matrix()),
            _ => None,
        }
    }

    /// Converts any value into a matrix block for literal assembly and
    /// indexed writes: scalars become `1 x 1` matrices.
    #[must_use]
    pub fn into_matrix(self) -> Matrix {
        match self {
            Self::Matrix(m) => m,
            Self::Range(r) => r.to_matrix(),
            scalar => Matrix::row(vec![scalar]),
        }
    }

    /// Converts the value to an `f64`, or returns an error naming `function`
    /// if it is not a real number.
    ///
    /// Booleans are accepted through their primitive coercion.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(10.0).as_real("sqrt", 0).unwrap(), 10.0);
    /// assert_eq!(Value::Bool(true).as_real("sqrt", 0).unwrap(), 1.0);
    /// assert!(Value::from("text").as_real("sqrt", 0).is_err());
    /// ```
    pub fn as_real(&self, function: &str, position: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            other => Err(RuntimeError::UnsupportedArgument { function: function.to_string(),
                                                             kind: other.type_name(),
                                                             position }),
        }
    }

    /// Converts the value to a `ComplexNumber`, or returns an error naming
    /// `function` if it is not numeric.
    pub fn as_complex(&self, function: &str, position: usize) -> EvalResult<ComplexNumber> {
        match self {
            Self::Complex(c) => Ok(*c),
            other => other.as_real(function, position).map(ComplexNumber::from),
        }
    }

    /// Interprets the value as a condition: booleans as is, numbers as
    /// non-zero. Matrices are true when every element is.
    pub fn is_truthy(&self, function: &str, position: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Number(n) => Ok(*n != 0.0),
            Self::Complex(c) => Ok(c.real != 0.0 || c.imaginary != 0.0),
            Self::Matrix(m) => {
                for value in m.data() {
                    if !value.is_truthy(function, position)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            },
            other => Err(RuntimeError::UnsupportedArgument { function: function.to_string(),
                                                             kind: other.type_name(),
                                                             position }),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Complex(c) => write!(f, "{c}"),
            Self::Unit(u) => write!(f, "{u}"),
            Self::Matrix(m) => write!(f, "{m}"),
            Self::Range(r) => write!(f, "{r}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}
