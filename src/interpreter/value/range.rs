use std::fmt::Display;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            core::Value,
            matrix::{MAX_ELEMENTS, Matrix},
        },
    },
    util::num::{format_number, usize_to_f64},
};

/// Slack applied when counting range elements so that `0:0.1:1` includes its
/// end point despite representation error.
const EPSILON: f64 = 1e-10;

/// An inclusive arithmetic sequence `start:step:end`.
///
/// Ranges are kept lazy until an operation needs their elements; they then
/// behave like a `1 x n` row vector. A range never holds more than
/// [`MAX_ELEMENTS`] elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    start: f64,
    step:  f64,
    /// Inclusive upper (or lower, for negative steps) bound.
    end:   f64,
}

/// Counts the elements of `start:step:end` without expanding it.
///
/// A zero step, a step pointing away from `end` and non-finite bounds all
/// give an empty range.
fn element_count(start: f64, step: f64, end: f64) -> f64 {
    if step == 0.0 || !(start.is_finite() && step.is_finite() && end.is_finite()) {
        return 0.0;
    }
    (((end - start) / step + EPSILON).floor() + 1.0).max(0.0)
}

impl Range {
    /// Creates the range `start:step:end`.
    ///
    /// # Errors
    /// `Range` if it would hold more than [`MAX_ELEMENTS`] elements.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::value::range::Range;
    ///
    /// assert_eq!(Range::new(2.0, 1.0, 5.0, 0).unwrap().len(), 4);
    /// assert_eq!(Range::new(10.0, -2.0, 2.0, 0).unwrap().len(), 5);
    /// assert_eq!(Range::new(0.0, 0.1, 1.0, 0).unwrap().len(), 11);
    /// assert_eq!(Range::new(5.0, 1.0, 2.0, 0).unwrap().len(), 0);
    /// assert!(Range::new(1.0, 1.0, 1e20, 0).is_err());
    /// ```
    pub fn new(start: f64, step: f64, end: f64, position: usize) -> EvalResult<Self> {
        let count = element_count(start, step, end);
        if count > usize_to_f64(MAX_ELEMENTS) {
            return Err(RuntimeError::Range { details: format!("Range {}:{}:{} exceeds the limit of {MAX_ELEMENTS} elements",
                                                              format_number(start),
                                                              format_number(step),
                                                              format_number(end)),
                                             position });
        }
        Ok(Self { start, step, end })
    }

    /// Returns the number of elements.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    pub fn len(&self) -> usize {
        element_count(self.start, self.step, self.end) as usize
    }

    /// Returns `true` if the range has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the elements.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(|k| self.start + usize_to_f64(k) * self.step)
    }

    /// Expands the range into a `1 x n` matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix {
        Matrix::row(self.values().map(Value::Number).collect())
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.step == 1.0 {
            write!(f, "{}:{}", format_number(self.start), format_number(self.end))
        } else {
            write!(f,
                   "{}:{}:{}",
                   format_number(self.start),
                   format_number(self.step),
                   format_number(self.end))
        }
    }
}
