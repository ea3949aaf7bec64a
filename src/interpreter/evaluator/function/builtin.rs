use std::f64::consts::LN_10;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::{argument_pair, as_integer, first_argument, map_elementwise},
        },
        units::Dimension,
        value::{complex::ComplexNumber, core::Value},
    },
};

/// Builds the error for an argument kind a function does not handle.
fn unexpected(function: &str, value: &Value, position: usize) -> RuntimeError {
    RuntimeError::UnsupportedArgument { function: function.to_string(),
                                        kind: value.type_name(),
                                        position }
}

/// Unwraps a boolean once and retries `f`, or reports the argument kind.
fn retry_primitive<F>(function: &str, value: &Value, position: usize, f: F) -> EvalResult<Value>
    where F: Fn(&Value) -> EvalResult<Value>
{
    match value.as_primitive() {
        Some(primitive) => f(&primitive),
        None => Err(unexpected(function, value, position)),
    }
}

/// Applies a unary builtin function to a numeric value.
///
/// The generated functions accept exactly one argument.
/// - Reals use the corresponding real builtin.
/// - Complex values use the complex variant.
/// - With `angle: true`, angles (units of dimension angle) are taken in
///   radians.
/// - Matrices and ranges are mapped element-wise.
///
/// Other arguments produce an `UnsupportedArgument` error.
///
/// # Parameters
/// - `args`: Slice containing one argument.
/// - `position`: Byte offset for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing the computed value.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::function::builtin::sin, value::core::Value};
///
/// let x = Value::Number(std::f64::consts::PI / 2.0);
/// let r = sin(&[x], 0).unwrap();
///
/// assert_eq!(r, Value::Number(1.0));
/// ```
macro_rules! real_complex_builtin {
    ($fname:ident, $real_fn:ident, $complex_fn:ident, angle: $angle:literal) => {
        pub fn $fname(args: &[Value], position: usize) -> EvalResult<Value> {
            fn scalar(value: &Value, position: usize) -> EvalResult<Value> {
                match value {
                    Value::Number(x) => Ok(Value::Number(x.$real_fn())),
                    Value::Complex(c) => Ok(Value::Complex(c.$complex_fn())),
                    Value::Unit(u) if $angle && u.dimension() == Dimension::ANGLE => {
                        Ok(Value::Number(u.value.$real_fn()))
                    },
                    other => retry_primitive(stringify!($fname), other, position, |v| {
                                 scalar(v, position)
                             }),
                }
            }
            map_elementwise(first_argument(stringify!($fname), args, position)?, &|v| scalar(v, position))
        }
    };
}

/// Applies a unary builtin function defined on real numbers only.
///
/// Works like `real_complex_builtin`, except that complex arguments are
/// rejected.
macro_rules! real_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(args: &[Value], position: usize) -> EvalResult<Value> {
            fn scalar(value: &Value, position: usize) -> EvalResult<Value> {
                match value {
                    Value::Number(x) => Ok(Value::Number(x.$real_fn())),
                    other => retry_primitive(stringify!($fname), other, position, |v| {
                                 scalar(v, position)
                             }),
                }
            }
            map_elementwise(first_argument(stringify!($fname), args, position)?, &|v| scalar(v, position))
        }
    };
}

real_complex_builtin!(sin, sin, sin, angle: true);
real_complex_builtin!(cos, cos, cos, angle: true);
real_complex_builtin!(tan, tan, tan, angle: true);
real_complex_builtin!(exp, exp, exp, angle: false);
real_builtin!(asin, asin);
real_builtin!(acos, acos);
real_builtin!(atan, atan);

/// Returns the absolute value of a number, the magnitude of a complex number
/// or a unit with a non-negative magnitude.
///
/// # Example
/// ```
/// use unitmath::interpreter::{
///     evaluator::function::builtin::abs,
///     value::{complex::ComplexNumber, core::Value},
/// };
///
/// let r = abs(&[Value::Complex(ComplexNumber::new(3.0, -4.0))], 0).unwrap();
/// assert_eq!(r, Value::Number(5.0));
/// ```
pub fn abs(args: &[Value], position: usize) -> EvalResult<Value> {
    fn scalar(value: &Value, position: usize) -> EvalResult<Value> {
        match value {
            Value::Number(x) => Ok(Value::Number(x.abs())),
            Value::Complex(c) => Ok(Value::Number(c.abs())),
            Value::Unit(u) => Ok(Value::Unit(u.with_value(u.value.abs()))),
            other => retry_primitive("abs", other, position, |v| scalar(v, position)),
        }
    }
    map_elementwise(first_argument("abs", args, position)?, &|v| scalar(v, position))
}

/// Computes the square root. Negative numbers yield a complex result.
///
/// # Example
/// ```
/// use unitmath::interpreter::{
///     evaluator::function::builtin::sqrt,
///     value::{complex::ComplexNumber, core::Value},
/// };
///
/// assert_eq!(sqrt(&[Value::Number(16.0)], 0).unwrap(), Value::Number(4.0));
/// assert_eq!(sqrt(&[Value::Number(-4.0)], 0).unwrap(),
///            Value::Complex(ComplexNumber::new(0.0, 2.0)));
/// ```
pub fn sqrt(args: &[Value], position: usize) -> EvalResult<Value> {
    fn scalar(value: &Value, position: usize) -> EvalResult<Value> {
        match value {
            Value::Number(x) if *x >= 0.0 => Ok(Value::Number(x.sqrt())),
            Value::Number(x) => Ok(Value::Complex(ComplexNumber::from(*x).sqrt())),
            Value::Complex(c) => Ok(Value::Complex(c.sqrt())),
            other => retry_primitive("sqrt", other, position, |v| scalar(v, position)),
        }
    }
    map_elementwise(first_argument("sqrt", args, position)?, &|v| scalar(v, position))
}

/// Natural logarithm, extended to the principal complex value for negative
/// and complex arguments.
fn ln(value: &Value, function: &str, position: usize) -> EvalResult<Value> {
    match value {
        Value::Number(x) if *x >= 0.0 => Ok(Value::Number(x.ln())),
        Value::Number(x) => Ok(Value::Complex(ComplexNumber::from(*x).ln())),
        Value::Complex(c) => Ok(Value::Complex(c.ln())),
        other => retry_primitive(function, other, position, |v| ln(v, function, position)),
    }
}

/// Computes `log(x)` (natural logarithm) or `log(x, base)`.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::function::builtin::log, value::core::Value};
///
/// let Value::Number(r) = log(&[Value::Number(1024.0), Value::Number(2.0)], 0).unwrap() else {
///     panic!("expected a number");
/// };
/// assert!((r - 10.0).abs() < 1e-12);
/// ```
pub fn log(args: &[Value], position: usize) -> EvalResult<Value> {
    let value = map_elementwise(first_argument("log", args, position)?, &|v| ln(v, "log", position))?;
    match args.get(1) {
        Some(base) => {
            let base = map_elementwise(base, &|v| ln(v, "log", position))?;
            Context::eval_binary(BinaryOperator::Div, &value, &base, position)
        },
        None => Ok(value),
    }
}

/// Computes the base-10 logarithm.
pub fn log10(args: &[Value], position: usize) -> EvalResult<Value> {
    map_elementwise(first_argument("log10", args, position)?, &|v| match v {
        Value::Number(x) if *x >= 0.0 => Ok(Value::Number(x.log10())),
        other => {
            let natural = ln(other, "log10", position)?;
            Context::eval_binary(BinaryOperator::Div, &natural, &Value::Number(LN_10), position)
        },
    })
}

/// Computes the four-quadrant arc tangent of `y / x`.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::function::builtin::atan2, value::core::Value};
///
/// let r = atan2(&[Value::Number(2.0), Value::Number(2.0)], 0).unwrap();
/// assert_eq!(r, Value::Number(0.7853981633974483));
/// ```
pub fn atan2(args: &[Value], position: usize) -> EvalResult<Value> {
    let (y, x) = argument_pair("atan2", args, position)?;
    Context::map_matrix_binary("atan2", y, x, position, &|y, x| {
        let y = y.as_real("atan2", position)?;
        let x = x.as_real("atan2", position)?;
        Ok(Value::Number(y.atan2(x)))
    })
}

/// Applies a rounding operation (`floor` or `ceil`) to a numeric value.
///
/// Complex numbers are rounded part by part.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::function::builtin::unary_round, value::core::Value};
///
/// let r = unary_round("floor", &[Value::Number(3.8)], 0).unwrap();
/// assert_eq!(r, Value::Number(3.0));
/// ```
pub fn unary_round(name: &str, args: &[Value], position: usize) -> EvalResult<Value> {
    let op = match name {
        "floor" => f64::floor,
        "ceil" => f64::ceil,
        _ => f64::round,
    };
    map_elementwise(first_argument(name, args, position)?, &|v| round_with(name, v, op, position))
}

fn round_with(name: &str, value: &Value, op: fn(f64) -> f64, position: usize) -> EvalResult<Value> {
    match value {
        Value::Number(x) => Ok(Value::Number(op(*x))),
        Value::Complex(c) => Ok(Value::Complex(ComplexNumber::new(op(c.real), op(c.imaginary)))),
        other => retry_primitive(name, other, position, |v| round_with(name, v, op, position)),
    }
}

/// Rounds to the nearest integer, or to `n` decimals with `round(x, n)`.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::function::builtin::round, value::core::Value};
///
/// let r = round(&[Value::Number(3.14159), Value::Number(2.0)], 0).unwrap();
/// assert_eq!(r, Value::Number(3.14));
/// ```
pub fn round(args: &[Value], position: usize) -> EvalResult<Value> {
    let Some(decimals) = args.get(1) else {
        return unary_round("round", args, position);
    };
    let decimals = as_integer(decimals, "round", position)?;
    if !(0..=15).contains(&decimals) {
        return Err(RuntimeError::Range { details: "Number of decimals in function round must be in the range 0 to 15".to_string(),
                                         position });
    }
    let factor = 10_f64.powi(i32::try_from(decimals).unwrap_or(0));
    let scaled = |x: f64| (x * factor).round() / factor;
    map_elementwise(first_argument("round", args, position)?, &|v| match v.as_primitive().as_ref().unwrap_or(v) {
        Value::Number(x) => Ok(Value::Number(scaled(*x))),
        Value::Complex(c) => Ok(Value::Complex(ComplexNumber::new(scaled(c.real), scaled(c.imaginary)))),
        other => Err(unexpected("round", other, position)),
    })
}

/// Returns the numeric sign of a value: `-1`, `0` or `1`.
///
/// For a complex number the result is the number divided by its magnitude.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::function::builtin::sign, value::core::Value};
///
/// let s = sign(&[Value::Number(-42.0)], 0).unwrap();
/// assert_eq!(s, Value::Number(-1.0));
/// ```
pub fn sign(args: &[Value], position: usize) -> EvalResult<Value> {
    fn scalar(value: &Value, position: usize) -> EvalResult<Value> {
        match value {
            Value::Number(x) if *x == 0.0 || x.is_nan() => Ok(Value::Number(*x)),
            Value::Number(x) => Ok(Value::Number(x.signum())),
            Value::Complex(c) => {
                let magnitude = c.abs();
                if magnitude == 0.0 {
                    return Ok(Value::Complex(*c));
                }
                Ok(Value::Complex(ComplexNumber::new(c.real / magnitude, c.imaginary / magnitude)))
            },
            other => retry_primitive("sign", other, position, |v| scalar(v, position)),
        }
    }
    map_elementwise(first_argument("sign", args, position)?, &|v| scalar(v, position))
}

/// Applies a function of the complex parts; real numbers are treated as
/// complex numbers with a zero imaginary part.
fn complex_part<F>(name: &str, args: &[Value], position: usize, f: F) -> EvalResult<Value>
    where F: Fn(ComplexNumber) -> Value
{
    map_elementwise(first_argument(name, args, position)?, &|v| Ok(f(v.as_complex(name, position)?)))
}

/// Returns the real part of a number.
pub fn re(args: &[Value], position: usize) -> EvalResult<Value> {
    complex_part("re", args, position, |c| Value::Number(c.real))
}

/// Returns the imaginary part of a number.
pub fn im(args: &[Value], position: usize) -> EvalResult<Value> {
    complex_part("im", args, position, |c| Value::Number(c.imaginary))
}

/// Returns the complex conjugate. Real numbers are returned unchanged.
///
/// # Example
/// ```
/// use unitmath::interpreter::{
///     evaluator::function::builtin::conj,
///     value::{complex::ComplexNumber, core::Value},
/// };
///
/// let r = conj(&[Value::Complex(ComplexNumber::new(1.0, 2.0))], 0).unwrap();
/// assert_eq!(r, Value::Complex(ComplexNumber::new(1.0, -2.0)));
/// assert_eq!(conj(&[Value::Number(5.0)], 0).unwrap(), Value::Number(5.0));
/// ```
pub fn conj(args: &[Value], position: usize) -> EvalResult<Value> {
    map_elementwise(first_argument("conj", args, position)?, &|v| match v {
        Value::Complex(c) => Ok(Value::Complex(c.conj())),
        other => Ok(Value::Number(other.as_real("conj", position)?)),
    })
}

/// Returns the argument (phase angle) of a number in radians.
pub fn arg(args: &[Value], position: usize) -> EvalResult<Value> {
    complex_part("arg", args, position, |c| Value::Number(c.arg()))
}

/// Asserts that the argument holds.
///
/// Numbers are true when non-zero and matrices when every element is.
/// If the value does not hold, an `AssertionFailed` error is returned.
/// Otherwise the function returns `true`.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::function::builtin::assert_fn, value::core::Value};
///
/// let r = assert_fn(&[Value::Bool(true)], 0).unwrap();
/// assert_eq!(r, Value::Bool(true));
/// assert!(assert_fn(&[Value::Number(0.0)], 0).is_err());
/// ```
pub fn assert_fn(args: &[Value], position: usize) -> EvalResult<Value> {
    if !first_argument("assert", args, position)?.is_truthy("assert", position)? {
        return Err(RuntimeError::AssertionFailed { position });
    }
    Ok(Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::function::{arithmetic, matrix};

    fn argument_count_error(result: EvalResult<Value>) -> Option<(String, usize)> {
        match result {
            Err(RuntimeError::ArgumentCount { name, found, .. }) => Some((name, found)),
            _ => None,
        }
    }

    #[test]
    fn short_argument_lists_are_errors() {
        let one = [Value::Number(1.0)];

        assert_eq!(argument_count_error(sqrt(&[], 0)), Some(("sqrt".to_string(), 0)));
        assert_eq!(argument_count_error(sin(&[], 0)), Some(("sin".to_string(), 0)));
        assert_eq!(argument_count_error(atan2(&one, 0)), Some(("atan2".to_string(), 1)));
        assert_eq!(argument_count_error(arithmetic::add(&one, 0)), Some(("add".to_string(), 1)));
        assert_eq!(argument_count_error(arithmetic::factorial_fn(&[], 0)), Some(("factorial".to_string(), 0)));
        assert_eq!(argument_count_error(matrix::lu(&[], 0)), Some(("lu".to_string(), 0)));
        assert_eq!(argument_count_error(matrix::size(&[], 0)), Some(("size".to_string(), 0)));
        assert_eq!(sqrt(&[Value::Number(4.0)], 0), Ok(Value::Number(2.0)));
    }
}
