use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

/// Number of significant digits kept when a number is displayed.
pub const DISPLAY_PRECISION: usize = 10;

/// Returns `true` if `value` is finite and has no fractional part.
///
/// # Example
/// ```
/// use unitmath::util::num::is_integer;
///
/// assert!(is_integer(4.0));
/// assert!(is_integer(-12.0));
/// assert!(!is_integer(0.5));
/// assert!(!is_integer(f64::INFINITY));
/// ```
#[must_use]
pub fn is_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Converts an `f64` to `i64` if the value is integral and exactly
/// representable.
///
/// ## Errors
/// - `NonIntegerArgument` naming `function` if the value is fractional or not
///   finite.
/// - `Range` if the magnitude exceeds [`MAX_SAFE_INT`].
///
/// ## Example
/// ```
/// use unitmath::{error::RuntimeError, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(1000.0, "gcd", 0).unwrap(), 1000);
///
/// let err = f64_to_i64_checked(1.5, "gcd", 7).unwrap_err();
/// assert!(matches!(err, RuntimeError::NonIntegerArgument { position: 7, .. }));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_checked(value: f64, function: &str, position: usize) -> EvalResult<i64> {
    if !is_integer(value) {
        return Err(RuntimeError::NonIntegerArgument { function: function.to_string(),
                                                      value: format_number(value),
                                                      position });
    }
    if value.abs() > MAX_SAFE_INT {
        return Err(RuntimeError::Range { details: format!("Value {} is too large for function {function}",
                                                          format_number(value)),
                                         position });
    }
    Ok(value as i64)
}

/// Converts an `f64` to an `i32` exponent.
///
/// ## Errors
/// - `NonIntegerArgument` if the value is fractional.
/// - `Range` if the value does not fit in an `i32`.
pub fn f64_to_i32_checked(value: f64, function: &str, position: usize) -> EvalResult<i32> {
    let wide = f64_to_i64_checked(value, function, position)?;
    i32::try_from(wide).map_err(|_| RuntimeError::Range { details: format!("Exponent {wide} is out of range"),
                                                          position })
}

/// Converts a 1-based index value to a `usize`.
///
/// Only the lower bound is checked here; `max` is the current extent of the
/// indexed dimension and is reported in the error. Reads check the upper bound
/// themselves, writes grow the matrix instead.
///
/// ## Errors
/// - `NonIntegerArgument` if the index is fractional.
/// - `IndexOutOfBounds` if the index is smaller than one.
///
/// ## Example
/// ```
/// use unitmath::{error::RuntimeError, util::num::f64_to_index};
///
/// assert_eq!(f64_to_index(3.0, 2, 0).unwrap(), 3);
/// assert!(matches!(f64_to_index(0.0, 2, 0),
///                  Err(RuntimeError::IndexOutOfBounds { found: 0, max: 2, .. })));
/// assert!(matches!(f64_to_index(1.5, 2, 0),
///                  Err(RuntimeError::NonIntegerArgument { .. })));
/// ```
pub fn f64_to_index(value: f64, max: usize, position: usize) -> EvalResult<usize> {
    let index = f64_to_i64_checked(value, "index", position)?;
    if index < 1 {
        return Err(RuntimeError::IndexOutOfBounds { max,
                                                    found: index,
                                                    position });
    }
    usize::try_from(index).map_err(|_| RuntimeError::Range { details: format!("Index {index} is out of range"),
                                                             position })
}

/// Converts a `usize` to `f64`.
///
/// Matrix dimensions never approach `2^53`, so the conversion is exact for
/// every value the interpreter produces.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Formats a number the way values are displayed.
///
/// The value is rounded to [`DISPLAY_PRECISION`] significant digits before
/// printing so that representation noise such as `2000.0000000000002` is
/// shown as `2000`. Infinities and `NaN` are spelled out.
///
/// ## Example
/// ```
/// use unitmath::util::num::format_number;
///
/// assert_eq!(format_number(2.0), "2");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(2000.0000000000002), "2000");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let rounded = format!("{:.*e}", DISPLAY_PRECISION - 1, value).parse::<f64>()
                                                                   .unwrap_or(value);
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}
