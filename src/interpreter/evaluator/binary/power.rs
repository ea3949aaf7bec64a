use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::matmul::multiply,
            core::{Context, EvalResult},
            utils::unsupported,
        },
        value::{complex::ComplexNumber, core::Value, matrix::Matrix},
    },
    util::num::{f64_to_i64_checked, format_number, is_integer},
};

impl Context {
    /// Raises a real number to a real power.
    ///
    /// A negative base with a fractional exponent has no real result; the
    /// principal complex value is returned instead.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// assert_eq!(Context::eval_number_pow(2.0, 10.0), Value::Number(1024.0));
    /// assert!(matches!(Context::eval_number_pow(-4.0, 0.5), Value::Complex(_)));
    /// ```
    #[must_use]
    pub fn eval_number_pow(base: f64, exponent: f64) -> Value {
        if base < 0.0 && exponent.is_finite() && !is_integer(exponent) {
            return Value::Complex(ComplexNumber::from(base).pow(ComplexNumber::from(exponent)));
        }
        Value::Number(base.powf(exponent))
    }

    /// Raises a square matrix to a non-negative integer power by repeated
    /// squaring.
    ///
    /// # Errors
    /// - `UnsupportedType` unless the base is a matrix and the exponent a
    ///   number.
    /// - `DimensionMismatch` if the matrix is not square.
    /// - `NonIntegerArgument` if the exponent is fractional, `Range` if it is
    ///   negative.
    ///
    /// # Example
    /// ```
    /// use unitmath::{interpreter::evaluator::core::Context, parse};
    ///
    /// let mut ctx = Context::new();
    /// let m = ctx.eval(&parse("[1, 1; 1, 0]").unwrap(), None).unwrap();
    /// let r = Context::eval_matrix_pow(&m, &10.0.into(), 0).unwrap();
    ///
    /// assert_eq!(r.to_string(), "[[89, 55], [55, 34]]");
    /// ```
    pub fn eval_matrix_pow(base: &Value, exponent: &Value, position: usize) -> EvalResult<Value> {
        let power = exponent.as_primitive().unwrap_or_else(|| exponent.clone());
        let (Some(matrix), Value::Number(exponent)) = (base.to_matrix(), power) else {
            return Err(unsupported(BinaryOperator::Pow, base, exponent, position));
        };
        if !matrix.is_square() {
            return Err(RuntimeError::DimensionMismatch { details: format!("matrix power needs a square matrix, found {} x {}",
                                                                          matrix.rows(),
                                                                          matrix.cols()),
                                                         position });
        }
        let mut n = f64_to_i64_checked(exponent, "^", position)?;
        if n < 0 {
            return Err(RuntimeError::Range { details: format!("Matrix exponent must be non-negative, found {}",
                                                              format_number(exponent)),
                                             position });
        }

        let mut result = Matrix::identity(matrix.rows(), position)?;
        let mut square = matrix;
        while n > 0 {
            if n % 2 == 1 {
                result = multiply(&result, &square, position)?;
            }
            n /= 2;
            if n > 0 {
                square = multiply(&square, &square, position)?;
            }
        }
        Ok(Value::Matrix(result))
    }
}
