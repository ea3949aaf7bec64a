use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            core::Value,
            matrix::{Matrix, checked_len, shape_to_string},
        },
    },
};

impl Context {
    /// Evaluates the matrix product `left * right`.
    ///
    /// Both operands must be matrices or ranges, and the column count of
    /// `left` must equal the row count of `right`. Elements are combined with
    /// the regular `*` and `+` dispatch, so matrices of complex numbers or
    /// units multiply as well.
    ///
    /// # Parameters
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Byte offset for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the product matrix.
    ///
    /// # Example
    /// ```
    /// use unitmath::{interpreter::evaluator::core::Context, parse};
    ///
    /// let mut ctx = Context::new();
    /// let a = ctx.eval(&parse("[1, 2; 3, 4]").unwrap(), None).unwrap();
    /// let b = ctx.eval(&parse("[5, 6; 7, 8]").unwrap(), None).unwrap();
    ///
    /// let product = Context::eval_matmul(&a, &b, 0).unwrap();
    /// assert_eq!(product.to_string(), "[[19, 22], [43, 50]]");
    /// ```
    pub fn eval_matmul(left: &Value, right: &Value, position: usize) -> EvalResult<Value> {
        let (Some(l), Some(r)) = (left.to_matrix(), right.to_matrix()) else {
            return Err(RuntimeError::UnsupportedType { operator: "*".to_string(),
                                                       left: left.type_name(),
                                                       right: right.type_name(),
                                                       position });
        };
        Ok(Value::Matrix(multiply(&l, &r, position)?))
    }
}

/// Multiplies two matrices.
///
/// # Errors
/// - `DimensionMismatch` if the inner dimensions differ.
/// - `Range` if the product would be too large.
pub fn multiply(left: &Matrix, right: &Matrix, position: usize) -> EvalResult<Matrix> {
    if left.cols() != right.rows() {
        return Err(RuntimeError::DimensionMismatch { details: format!("cannot multiply matrices of size {} and {}",
                                                                      shape_to_string(left.size()),
                                                                      shape_to_string(right.size())),
                                                     position });
    }
    let (rows, inner, cols) = (left.rows(), left.cols(), right.cols());

    let mut data = Vec::with_capacity(checked_len(rows, cols, position)?);
    for i in 0..rows {
        for j in 0..cols {
            let mut sum: Option<Value> = None;
            for k in 0..inner {
                let (Some(a), Some(b)) = (left.get(i, k), right.get(k, j)) else {
                    continue;
                };
                let product = Context::eval_binary(BinaryOperator::Mul, a, b, position)?;
                sum = Some(match sum {
                               Some(acc) => {
                                   Context::eval_binary(BinaryOperator::Add, &acc, &product, position)?
                               },
                               None => product,
                           });
            }
            data.push(sum.unwrap_or(Value::Number(0.0)));
        }
    }
    Matrix::from_shape(rows, cols, data, position)
}
