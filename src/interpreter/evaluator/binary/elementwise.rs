use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            core::Value,
            matrix::{Matrix, shape_to_string},
        },
    },
};

impl Context {
    /// Applies an element-wise binary operation to one or two values.
    ///
    /// This function unifies all element-wise evaluation paths:
    /// - Matrix with matrix (ranges count as row vectors)
    /// - Matrix with scalar
    /// - Scalar with matrix
    /// - Scalar with scalar
    ///
    /// Two collections must have the same shape; a scalar is repeated across
    /// every element of the other operand. No other broadcasting happens.
    ///
    /// # Parameters
    /// - `operator`: The operator or function being applied. Only needed for
    ///   error messages.
    /// - `left`: Left-hand operand.
    /// - `right`: Right-hand operand.
    /// - `position`: Byte offset for error reporting.
    /// - `f`: Scalar operation applied to each pair of elements.
    ///
    /// # Returns
    /// A matrix holding the element results, or the scalar result when
    /// neither operand is a collection.
    ///
    /// # Example
    /// ```
    /// use unitmath::{
    ///     ast::BinaryOperator,
    ///     interpreter::{
    ///         evaluator::core::Context,
    ///         value::{core::Value, matrix::Matrix, range::Range},
    ///     },
    /// };
    ///
    /// let left = Value::Range(Range::new(1.0, 1.0, 2.0, 0).unwrap());
    /// let right = Value::Matrix(Matrix::row(vec![10.0.into(), 20.0.into()]));
    ///
    /// let r = Context::map_matrix_binary("+", &left, &right, 0, &|l, r| {
    ///             Context::eval_binary(BinaryOperator::Add, l, r, 0)
    ///         }).unwrap();
    ///
    /// assert_eq!(r, Value::Matrix(Matrix::row(vec![11.0.into(), 22.0.into()])));
    /// ```
    pub fn map_matrix_binary<F>(operator: &str,
                                left: &Value,
                                right: &Value,
                                position: usize,
                                f: &F)
                                -> EvalResult<Value>
        where F: Fn(&Value, &Value) -> EvalResult<Value>
    {
        match (left.to_matrix(), right.to_matrix()) {
            (Some(l), Some(r)) => {
                if l.size() != r.size() {
                    return Err(RuntimeError::DimensionMismatch { details: format!("cannot apply {operator} to matrices of size {} and {}",
                                                                                  shape_to_string(l.size()),
                                                                                  shape_to_string(r.size())),
                                                                 position });
                }
                let (rows, cols) = l.size();
                let data = l.data()
                            .iter()
                            .zip(r.data())
                            .map(|(a, b)| f(a, b))
                            .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::Matrix(Matrix::from_shape(rows, cols, data, position)?))
            },
            (Some(m), None) => Ok(Value::Matrix(m.map(|v| f(v, right))?)),
            (None, Some(m)) => Ok(Value::Matrix(m.map(|v| f(left, v))?)),
            (None, None) => f(left, right),
        }
    }
}
