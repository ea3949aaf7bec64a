use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::map_elementwise,
        },
        value::core::Value,
    },
    util::num::{f64_to_i64_checked, format_number},
};

/// Largest argument whose factorial is finite in double precision.
const MAX_FACTORIAL: i64 = 170;

/// Computes `n!` for a non-negative integer `n`.
///
/// Results beyond [`MAX_FACTORIAL`] overflow to infinity.
///
/// # Errors
/// - `NonIntegerArgument` if `n` has a fractional part.
/// - `Range` if `n` is negative.
///
/// # Example
/// ```
/// use unitmath::interpreter::evaluator::unary::factorial;
///
/// assert_eq!(factorial(5.0, 0).unwrap(), 120.0);
/// assert_eq!(factorial(0.0, 0).unwrap(), 1.0);
/// assert!(factorial(-1.0, 0).is_err());
/// assert!(factorial(2.5, 0).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn factorial(n: f64, position: usize) -> EvalResult<f64> {
    let n = f64_to_i64_checked(n, "factorial", position)?;
    if n < 0 {
        return Err(RuntimeError::Range { details: format!("Factorial is not defined for negative value {}",
                                                          format_number(n as f64)),
                                         position });
    }
    if n > MAX_FACTORIAL {
        return Ok(f64::INFINITY);
    }
    Ok((2..=n).fold(1.0, |acc, k| acc * k as f64))
}

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: negation of numbers, complex numbers and units.
    /// - `Plus`: identity on the same kinds.
    /// - `Factorial`: `n!` for non-negative integers.
    /// - `Transpose`: swaps rows and columns of a matrix; scalars are returned
    ///   unchanged.
    ///
    /// The arithmetic operators apply element-wise to matrices and ranges, and
    /// booleans are unwrapped to numbers first.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `position`: Byte offset for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use unitmath::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Number(5.0), 0).unwrap();
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Factorial, &Value::Number(4.0), 0).unwrap();
    /// assert_eq!(v, Value::Number(24.0));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Transpose, &Value::Number(3.0), 0).unwrap();
    /// assert_eq!(v, Value::Number(3.0));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, position: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Transpose => Ok(match value {
                Value::Matrix(m) => Value::Matrix(m.transpose()),
                Value::Range(r) => Value::Matrix(r.to_matrix().transpose()),
                scalar => scalar.clone(),
            }),
            _ => map_elementwise(value, &|v| Self::eval_unary_scalar(op, v, position)),
        }
    }

    fn eval_unary_scalar(op: UnaryOperator, value: &Value, position: usize) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
            (UnaryOperator::Negate, Value::Complex(c)) => Ok(Value::Complex(-*c)),
            (UnaryOperator::Negate, Value::Unit(u)) => Ok(Value::Unit(u.with_value(-u.value))),
            (UnaryOperator::Plus, Value::Number(_) | Value::Complex(_) | Value::Unit(_)) => {
                Ok(value.clone())
            },
            (UnaryOperator::Factorial, Value::Number(n)) => Ok(Value::Number(factorial(*n, position)?)),
            _ => match value.as_primitive() {
                Some(primitive) => Self::eval_unary_scalar(op, &primitive, position),
                None => Err(RuntimeError::UnsupportedArgument { function: op.to_string(),
                                                                kind: value.type_name(),
                                                                position }),
            },
        }
    }
}
