use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::f64_to_i64_checked,
};

/// Builds the error reported when no rule handles an operand combination.
///
/// # Example
/// ```
/// use unitmath::{
///     ast::BinaryOperator,
///     error::RuntimeError,
///     interpreter::{evaluator::utils::unsupported, value::core::Value},
/// };
///
/// let err = unsupported(BinaryOperator::Sub, &"a".into(), &Value::Number(1.0), 4);
/// assert_eq!(err.to_string(),
///            "Error at position 4: Unsupported type of arguments in '-' (string, number).");
/// ```
#[must_use]
pub fn unsupported(op: BinaryOperator, left: &Value, right: &Value, position: usize) -> RuntimeError {
    RuntimeError::UnsupportedType { operator: op.to_string(),
                                    left: left.type_name(),
                                    right: right.type_name(),
                                    position }
}

/// Applies `f` to a scalar, or to every element of a matrix or range.
///
/// This is how unary operators and single-argument functions extend to
/// collections.
pub fn map_elementwise<F>(value: &Value, f: &F) -> EvalResult<Value>
    where F: Fn(&Value) -> EvalResult<Value>
{
    match value {
        Value::Matrix(m) => Ok(Value::Matrix(m.map(f)?)),
        Value::Range(r) => Ok(Value::Matrix(r.to_matrix().map(f)?)),
        scalar => f(scalar),
    }
}

/// Returns the integer value of a real-valued argument.
///
/// # Errors
/// - `UnsupportedArgument` if the value is not a real number.
/// - `NonIntegerArgument` if it has a fractional part.
pub fn as_integer(value: &Value, function: &str, position: usize) -> EvalResult<i64> {
    f64_to_i64_checked(value.as_real(function, position)?, function, position)
}

fn argument_count(function: &str, expected: &str, found: usize, position: usize) -> RuntimeError {
    RuntimeError::ArgumentCount { name: function.to_string(),
                                  expected: expected.to_string(),
                                  found,
                                  position }
}

/// Returns the first argument of a function call.
///
/// # Errors
/// `ArgumentCount` if `args` is empty.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::utils::first_argument, value::core::Value};
///
/// assert_eq!(first_argument("sqrt", &[Value::Number(4.0)], 0).unwrap(), &Value::Number(4.0));
/// assert!(first_argument("sqrt", &[], 0).is_err());
/// ```
pub fn first_argument<'a>(function: &str, args: &'a [Value], position: usize) -> EvalResult<&'a Value> {
    args.first()
        .ok_or_else(|| argument_count(function, "at least 1", 0, position))
}

/// Returns both arguments of a two-argument function call.
///
/// # Errors
/// `ArgumentCount` unless `args` holds exactly two values.
pub fn argument_pair<'a>(function: &str,
                         args: &'a [Value],
                         position: usize)
                         -> EvalResult<(&'a Value, &'a Value)> {
    match args {
        [left, right] => Ok((left, right)),
        _ => Err(argument_count(function, "2", args.len(), position)),
    }
}
