use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::unsupported,
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// The operand kinds are checked in a fixed order so that an exact rule
    /// is never shadowed by a more general one:
    /// 1. number with number;
    /// 2. complex with number or complex, the number promoted to complex;
    /// 3. unit with unit, and unit with number;
    /// 4. string with a scalar;
    /// 5. a matrix or range on either side, evaluated element-wise (`*` is
    ///    the matrix product and `^` the matrix power when applicable);
    /// 6. operands exposing a primitive value are unwrapped once and the
    ///    dispatch is retried.
    ///
    /// Anything else fails with `UnsupportedType`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Byte offset for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use unitmath::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let left = Value::Number(3.0);
    /// let right = Value::Number(4.0);
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add, &left, &right, 0);
    /// assert_eq!(result.unwrap(), Value::Number(7.0));
    ///
    /// let result = Context::eval_binary(BinaryOperator::Mul, &Value::Bool(true), &right, 0);
    /// assert_eq!(result.unwrap(), Value::Number(4.0));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       position: usize)
                       -> EvalResult<Value> {
        use Value::{Complex, Number, String, Unit};

        match (left, right) {
            (Number(a), Number(b)) => Ok(Self::eval_number_op(op, *a, *b)),

            (Complex(_), Number(_) | Complex(_)) | (Number(_), Complex(_)) => {
                let l = left.as_complex(&op.to_string(), position)?;
                let r = right.as_complex(&op.to_string(), position)?;
                Self::eval_complex_op(op, l, r, position)
            },

            (Unit(a), Unit(b)) => Self::eval_unit_unit(op, a, b, position),
            (Unit(u), Number(n)) => Self::eval_unit_number(op, u, *n, position),
            (Number(n), Unit(u)) => Self::eval_number_unit(op, *n, u, position),

            (String(_), _) | (_, String(_))
                if !left.is_collection() && !right.is_collection() =>
            {
                Self::eval_string_op(op, left, right, position)
            },

            _ if left.is_collection() || right.is_collection() => {
                Self::eval_collection_op(op, left, right, position)
            },

            _ => match (left.as_primitive(), right.as_primitive()) {
                (None, None) => Err(unsupported(op, left, right, position)),
                (l, r) => Self::eval_binary(op,
                                            l.as_ref().unwrap_or(left),
                                            r.as_ref().unwrap_or(right),
                                            position),
            },
        }
    }

    /// Routes an operation involving at least one matrix or range.
    ///
    /// `*` between two collections is the matrix product and `^` raises a
    /// square matrix to an integer power. Every other operator applies
    /// element-wise, repeating a scalar operand across all elements.
    fn eval_collection_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          position: usize)
                          -> EvalResult<Value> {
        match op {
            BinaryOperator::Mul if left.is_collection() && right.is_collection() => {
                Self::eval_matmul(left, right, position)
            },
            BinaryOperator::Pow => Self::eval_matrix_pow(left, right, position),
            _ => Self::map_matrix_binary(&op.to_string(), left, right, position, &|l, r| {
                     Self::eval_binary(op, l, r, position)
                 }),
        }
    }
}
