use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::unsupported,
        },
        value::{complex::ComplexNumber, core::Value},
    },
};

impl Context {
    /// Evaluates an operation on two real numbers.
    ///
    /// Arithmetic follows IEEE semantics, so dividing by zero yields an
    /// infinity or `NaN` rather than an error. A negative base raised to a
    /// fractional power produces a complex result.
    ///
    /// # Example
    /// ```
    /// use unitmath::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// assert_eq!(Context::eval_number_op(BinaryOperator::Div, 1.0, 0.0),
    ///            Value::Number(f64::INFINITY));
    /// assert_eq!(Context::eval_number_op(BinaryOperator::Less, 1.0, 2.0),
    ///            Value::Bool(true));
    /// ```
    #[must_use]
    pub fn eval_number_op(op: BinaryOperator, left: f64, right: f64) -> Value {
        use BinaryOperator::{Add, Div, Mul, Pow, Sub};

        match op {
            Add => Value::Number(left + right),
            Sub => Value::Number(left - right),
            Mul => Value::Number(left * right),
            Div => Value::Number(left / right),
            Pow => Self::eval_number_pow(left, right),
            _ => Value::Bool(Self::compare_numbers(op, left, right)),
        }
    }

    /// Evaluates an operation on two complex numbers.
    ///
    /// Only `==` and `!=` are defined among the comparisons; complex numbers
    /// have no ordering.
    pub fn eval_complex_op(op: BinaryOperator,
                           left: ComplexNumber,
                           right: ComplexNumber,
                           position: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Equal, Mul, NotEqual, Pow, Sub};

        Ok(match op {
            Add => Value::Complex(left + right),
            Sub => Value::Complex(left - right),
            Mul => Value::Complex(left * right),
            Div => Value::Complex(left / right),
            Pow => Value::Complex(left.pow(right)),
            Equal => Value::Bool(left == right),
            NotEqual => Value::Bool(left != right),
            _ => {
                return Err(unsupported(op,
                                       &Value::Complex(left),
                                       &Value::Complex(right),
                                       position));
            },
        })
    }

    /// Evaluates an operation where at least one operand is a string.
    ///
    /// `+` concatenates the display forms of both operands, `==` and `!=`
    /// compare them as text.
    ///
    /// # Example
    /// ```
    /// use unitmath::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let r = Context::eval_string_op(BinaryOperator::Add, &"x = ".into(), &Value::Number(2.0), 0);
    /// assert_eq!(r.unwrap(), Value::from("x = 2"));
    /// ```
    pub fn eval_string_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          position: usize)
                          -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => Ok(Value::String(format!("{left}{right}"))),
            BinaryOperator::Equal => Ok(Value::Bool(left.to_string() == right.to_string())),
            BinaryOperator::NotEqual => Ok(Value::Bool(left.to_string() != right.to_string())),
            _ => Err(unsupported(op, left, right, position)),
        }
    }
}
