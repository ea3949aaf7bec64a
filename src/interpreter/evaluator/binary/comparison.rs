use crate::{ast::BinaryOperator, interpreter::evaluator::core::Context};

impl Context {
    /// Compares two real numbers with a relational or equality operator.
    ///
    /// Equality is IEEE equality, so `NaN` is unequal to everything,
    /// itself included.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    ///
    /// # Returns
    /// The outcome of the comparison. Arithmetic operators yield `false`.
    ///
    /// # Example
    /// ```
    /// use unitmath::{ast::BinaryOperator, interpreter::evaluator::core::Context};
    ///
    /// assert!(Context::compare_numbers(BinaryOperator::LessEqual, 3.0, 3.0));
    /// assert!(Context::compare_numbers(BinaryOperator::NotEqual, f64::NAN, f64::NAN));
    /// ```
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn compare_numbers(op: BinaryOperator, left: f64, right: f64) -> bool {
        match op {
            BinaryOperator::Less => left < right,
            BinaryOperator::Greater => left > right,
            BinaryOperator::LessEqual => left <= right,
            BinaryOperator::GreaterEqual => left >= right,
            BinaryOperator::Equal => left == right,
            BinaryOperator::NotEqual => left != right,
            _ => false,
        }
    }
}
