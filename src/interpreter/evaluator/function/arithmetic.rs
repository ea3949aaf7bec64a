use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            unary::factorial,
            utils::{argument_pair, first_argument, map_elementwise},
        },
        value::core::Value,
    },
    util::num::f64_to_i64_checked,
};

/// Computes `n!` element-wise.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::function::arithmetic::factorial_fn, value::core::Value};
///
/// assert_eq!(factorial_fn(&[Value::Number(5.0)], 0).unwrap(), Value::Number(120.0));
/// ```
pub fn factorial_fn(args: &[Value], position: usize) -> EvalResult<Value> {
    map_elementwise(first_argument("factorial", args, position)?, &|v| {
        Ok(Value::Number(factorial(v.as_real("factorial", position)?, position)?))
    })
}

/// Greatest common divisor of two integers, always non-negative.
const fn gcd_i64(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.abs()
}

/// Applies an integer function to two scalars, element-wise over
/// collections.
///
/// Booleans are unwrapped once; any other kind fails with `UnsupportedType`.
fn integer_pair<F>(name: &str, left: &Value, right: &Value, position: usize, f: &F) -> EvalResult<Value>
    where F: Fn(i64, i64) -> f64
{
    Context::map_matrix_binary(name, left, right, position, &|l, r| match (l, r) {
        (Value::Number(a), Value::Number(b)) => {
            let a = f64_to_i64_checked(*a, name, position)?;
            let b = f64_to_i64_checked(*b, name, position)?;
            Ok(Value::Number(f(a, b)))
        },
        _ => match (l.as_primitive(), r.as_primitive()) {
            (None, None) => Err(RuntimeError::UnsupportedType { operator: name.to_string(),
                                                                left: l.type_name(),
                                                                right: r.type_name(),
                                                                position }),
            (pl, pr) => integer_pair(name,
                                     pl.as_ref().unwrap_or(l),
                                     pr.as_ref().unwrap_or(r),
                                     position,
                                     f),
        },
    })
}

/// Folds an integer function over two or more arguments, left to right.
fn reduce<F>(name: &str, args: &[Value], position: usize, f: F) -> EvalResult<Value>
    where F: Fn(i64, i64) -> f64
{
    let Some((first, rest)) = args.split_first() else {
        return Err(RuntimeError::ArgumentCount { name: name.to_string(),
                                                 expected: "at least 2".to_string(),
                                                 found: 0,
                                                 position });
    };
    rest.iter()
        .try_fold(first.clone(), |acc, value| integer_pair(name, &acc, value, position, &f))
}

/// Computes the greatest common divisor of two or more integers.
///
/// The result is always non-negative and `gcd(a, 0)` is `|a|`. Matrices
/// are processed element-wise.
///
/// # Errors
/// - `NonIntegerArgument` if a value has a fractional part.
/// - `UnsupportedType` for arguments that are not numbers.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::function::arithmetic::gcd, value::core::Value};
///
/// let r = gcd(&[Value::Number(-12.0), Value::Number(18.0)], 0).unwrap();
/// assert_eq!(r, Value::Number(6.0));
///
/// let r = gcd(&[Value::Number(12.0), Value::Number(18.0), Value::Number(27.0)], 0).unwrap();
/// assert_eq!(r, Value::Number(3.0));
///
/// assert!(gcd(&[Value::Number(1.5), Value::Number(3.0)], 0).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn gcd(args: &[Value], position: usize) -> EvalResult<Value> {
    reduce("gcd", args, position, |a, b| gcd_i64(a, b) as f64)
}

/// Computes the least common multiple of two or more integers.
///
/// `lcm(a, 0)` is `0`.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::function::arithmetic::lcm, value::core::Value};
///
/// let r = lcm(&[Value::Number(4.0), Value::Number(6.0)], 0).unwrap();
/// assert_eq!(r, Value::Number(12.0));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn lcm(args: &[Value], position: usize) -> EvalResult<Value> {
    reduce("lcm", args, position, |a, b| {
        if a == 0 || b == 0 {
            return 0.0;
        }
        ((a / gcd_i64(a, b)) as f64 * b as f64).abs()
    })
}

/// Named form of a binary operator.
macro_rules! operator_function {
    ($fname:ident, $op:expr) => {
        pub fn $fname(args: &[Value], position: usize) -> EvalResult<Value> {
            let (left, right) = argument_pair(stringify!($fname), args, position)?;
            Context::eval_binary($op, left, right, position)
        }
    };
}

operator_function!(add, BinaryOperator::Add);
operator_function!(subtract, BinaryOperator::Sub);
operator_function!(multiply, BinaryOperator::Mul);
operator_function!(divide, BinaryOperator::Div);
operator_function!(pow, BinaryOperator::Pow);
operator_function!(equal, BinaryOperator::Equal);
operator_function!(smaller, BinaryOperator::Less);
operator_function!(larger, BinaryOperator::Greater);

/// Tests two values for inequality, element-wise over matrices.
///
/// # Example
/// ```
/// use unitmath::interpreter::{evaluator::function::arithmetic::unequal, value::core::Value};
///
/// let r = unequal(&[Value::Number(2.0), Value::Number(3.0)], 0).unwrap();
/// assert_eq!(r, Value::Bool(true));
///
/// let r = unequal(&[Value::Number(2.0), Value::Number(2.0)], 0).unwrap();
/// assert_eq!(r, Value::Bool(false));
/// ```
pub fn unequal(args: &[Value], position: usize) -> EvalResult<Value> {
    let (left, right) = argument_pair("unequal", args, position)?;
    Context::eval_binary(BinaryOperator::NotEqual, left, right, position)
}
