use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::{as_integer, first_argument},
        },
        value::{
            core::Value,
            matrix::{Matrix, shape_to_string},
        },
    },
    util::num::usize_to_f64,
};

/// Returns the size of a value as a row vector.
///
/// Matrices yield `[rows, cols]`, ranges `[1, n]`, strings `[length]` and
/// scalars the empty matrix.
///
/// # Example
/// ```
/// use unitmath::interpreter::{
///     evaluator::function::matrix::size,
///     value::{core::Value, matrix::Matrix},
/// };
///
/// let m = Matrix::filled(2, 3, &Value::Number(0.0), 0).unwrap();
/// let r = size(&[Value::Matrix(m)], 0).unwrap();
/// assert_eq!(r, Value::Matrix(Matrix::row(vec![2.0.into(), 3.0.into()])));
///
/// assert_eq!(size(&[Value::Number(4.0)], 0).unwrap(), Value::Matrix(Matrix::empty()));
/// ```
pub fn size(args: &[Value], position: usize) -> EvalResult<Value> {
    let dims = match first_argument("size", args, position)? {
        Value::Matrix(m) => vec![m.rows(), m.cols()],
        Value::Range(r) => vec![1, r.len()],
        Value::String(s) => vec![s.chars().count()],
        _ => return Ok(Value::Matrix(Matrix::empty())),
    };
    Ok(Value::Matrix(Matrix::row(dims.into_iter()
                                     .map(|d| Value::Number(usize_to_f64(d)))
                                     .collect())))
}

/// Transposes a matrix or range. Scalars are returned unchanged.
pub fn transpose(args: &[Value], position: usize) -> EvalResult<Value> {
    Context::eval_unary(UnaryOperator::Transpose, first_argument("transpose", args, position)?, position)
}

/// Converts one dimension argument to a matrix extent.
fn extent(value: &Value, function: &str, position: usize) -> EvalResult<usize> {
    let n = as_integer(value, function, position)?;
    usize::try_from(n).map_err(|_| RuntimeError::Range { details: format!("Dimension of {function} must be non-negative, got {n}"),
                                                         position })
}

/// Reads the requested shape from `(n)`, `(rows, cols)` or a size vector.
///
/// A single number produces a square shape.
fn requested_shape(function: &str, args: &[Value], position: usize) -> EvalResult<(usize, usize)> {
    match args {
        [rows, cols] => Ok((extent(rows, function, position)?, extent(cols, function, position)?)),
        [dims] if dims.is_collection() => {
            let dims = dims.to_matrix().unwrap_or_else(Matrix::empty);
            match dims.data() {
                [] => Ok((0, 0)),
                [n] => {
                    let n = extent(n, function, position)?;
                    Ok((n, n))
                },
                [rows, cols] => Ok((extent(rows, function, position)?, extent(cols, function, position)?)),
                _ => Err(RuntimeError::DimensionMismatch { details: format!("{function} supports at most two dimensions, got {}",
                                                                            dims.len()),
                                                           position }),
            }
        },
        [n] => {
            let n = extent(n, function, position)?;
            Ok((n, n))
        },
        _ => Err(RuntimeError::ArgumentCount { name: function.to_string(),
                                               expected: "1 or 2".to_string(),
                                               found: args.len(),
                                               position }),
    }
}

/// Creates a matrix filled with zeros.
///
/// # Example
/// ```
/// use unitmath::interpreter::{
///     evaluator::function::matrix::zeros,
///     value::{core::Value, matrix::Matrix},
/// };
///
/// let r = zeros(&[Value::Number(2.0), Value::Number(3.0)], 0).unwrap();
/// assert_eq!(r, Value::Matrix(Matrix::filled(2, 3, &Value::Number(0.0), 0).unwrap()));
/// ```
pub fn zeros(args: &[Value], position: usize) -> EvalResult<Value> {
    let (rows, cols) = requested_shape("zeros", args, position)?;
    Ok(Value::Matrix(Matrix::filled(rows, cols, &Value::Number(0.0), position)?))
}

/// Creates a matrix filled with ones.
pub fn ones(args: &[Value], position: usize) -> EvalResult<Value> {
    let (rows, cols) = requested_shape("ones", args, position)?;
    Ok(Value::Matrix(Matrix::filled(rows, cols, &Value::Number(1.0), position)?))
}

/// Creates an identity matrix. Rectangular shapes put ones on the main
/// diagonal.
///
/// # Example
/// ```
/// use unitmath::interpreter::{
///     evaluator::function::matrix::eye,
///     value::{core::Value, matrix::Matrix},
/// };
///
/// let r = eye(&[Value::Number(3.0)], 0).unwrap();
/// assert_eq!(r, Value::Matrix(Matrix::identity(3, 0).unwrap()));
/// ```
pub fn eye(args: &[Value], position: usize) -> EvalResult<Value> {
    let (rows, cols) = requested_shape("eye", args, position)?;
    let mut matrix = Matrix::filled(rows, cols, &Value::Number(0.0), position)?;
    for i in 0..rows.min(cols) {
        matrix.set(i, i, Value::Number(1.0));
    }
    Ok(Value::Matrix(matrix))
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Number(n) => *n == 0.0,
        Value::Complex(c) => c.real == 0.0 && c.imaginary == 0.0,
        Value::Bool(b) => !b,
        _ => false,
    }
}

fn magnitude(value: &Value, position: usize) -> EvalResult<f64> {
    Ok(value.as_complex("lu", position)?.abs())
}

/// Result of an in-place Doolittle elimination.
struct Factorization {
    /// Combined factors: multipliers of `L` below the diagonal, `U` on and
    /// above it.
    rows:    Vec<Vec<Value>>,
    /// `true` when an odd number of row swaps was performed.
    swapped: bool,
}

/// Runs Doolittle elimination on a square matrix.
///
/// Returns `None` when a zero pivot is met. With `pivoting`, the row with
/// the largest pivot magnitude is swapped in first, so `None` then means
/// the matrix is singular.
fn doolittle(matrix: &Matrix, pivoting: bool, position: usize) -> EvalResult<Option<Factorization>> {
    use BinaryOperator::{Div, Mul, Sub};

    let n = matrix.rows();
    let mut rows = (0..n).map(|r| matrix.row_slice(r).to_vec())
                         .collect::<Vec<_>>();
    let mut swapped = false;

    for k in 0..n {
        if pivoting {
            let mut best = k;
            let mut best_magnitude = magnitude(&rows[k][k], position)?;
            for (i, row) in rows.iter().enumerate().skip(k + 1) {
                let m = magnitude(&row[k], position)?;
                if m > best_magnitude {
                    best = i;
                    best_magnitude = m;
                }
            }
            if best != k {
                rows.swap(k, best);
                swapped = !swapped;
            }
        }
        if is_zero(&rows[k][k]) {
            return Ok(None);
        }
        let pivot_row = rows[k].clone();
        for row in rows.iter_mut().skip(k + 1) {
            let factor = Context::eval_binary(Div, &row[k], &pivot_row[k], position)?;
            for j in (k + 1)..n {
                let product = Context::eval_binary(Mul, &factor, &pivot_row[j], position)?;
                row[j] = Context::eval_binary(Sub, &row[j], &product, position)?;
            }
            row[k] = factor;
        }
    }

    Ok(Some(Factorization { rows, swapped }))
}

/// Checks the preconditions shared by the decompositions and returns the
/// argument as a matrix.
fn square_matrix(function: &str, value: &Value, position: usize) -> EvalResult<Matrix> {
    let Some(matrix) = value.to_matrix() else {
        return Err(RuntimeError::Range { details: format!("Matrix must be two dimensional in {function}, got {}",
                                                          value.type_name()),
                                         position });
    };
    if !matrix.is_square() {
        return Err(RuntimeError::Range { details: format!("Matrix must be square in {function} (size: {})",
                                                          shape_to_string(matrix.size())),
                                         position });
    }
    Ok(matrix)
}

/// Computes the LU factorization of a square matrix without pivoting.
///
/// The result is a single matrix: the strictly lower part holds the
/// multipliers of the unit lower triangular `L`, the upper part including
/// the diagonal holds `U`.
///
/// # Errors
/// - `Range` if the argument is not a square matrix, or a zero pivot
///   occurs.
///
/// # Example
/// ```
/// use unitmath::interpreter::{
///     evaluator::function::matrix::lu,
///     value::{core::Value, matrix::Matrix},
/// };
///
/// let a = Matrix::from_rows(vec![vec![4.0.into(), 3.0.into()],
///                                vec![6.0.into(), 3.0.into()]],
///                           0).unwrap();
/// let r = lu(&[Value::Matrix(a)], 0).unwrap();
///
/// let expected = Matrix::from_rows(vec![vec![4.0.into(), 3.0.into()],
///                                       vec![1.5.into(), (-1.5).into()]],
///                                  0).unwrap();
/// assert_eq!(r, Value::Matrix(expected));
/// ```
pub fn lu(args: &[Value], position: usize) -> EvalResult<Value> {
    let matrix = square_matrix("lu", first_argument("lu", args, position)?, position)?;
    let Some(factorization) = doolittle(&matrix, false, position)? else {
        return Err(RuntimeError::Range { details: "Zero pivot encountered in lu; the matrix needs row exchanges".to_string(),
                                         position });
    };
    Ok(Value::Matrix(Matrix::from_rows(factorization.rows, position)?))
}

/// Computes the determinant of a square matrix.
///
/// The empty matrix has determinant `1`; singular matrices give `0`.
///
/// # Example
/// ```
/// use unitmath::interpreter::{
///     evaluator::function::matrix::det,
///     value::{core::Value, matrix::Matrix},
/// };
///
/// let a = Matrix::from_rows(vec![vec![0.0.into(), 1.0.into()],
///                                vec![1.0.into(), 0.0.into()]],
///                           0).unwrap();
/// assert_eq!(det(&[Value::Matrix(a)], 0).unwrap(), Value::Number(-1.0));
/// ```
pub fn det(args: &[Value], position: usize) -> EvalResult<Value> {
    let matrix = square_matrix("det", first_argument("det", args, position)?, position)?;
    let Some(factorization) = doolittle(&matrix, true, position)? else {
        return Ok(Value::Number(0.0));
    };
    let initial = Value::Number(if factorization.swapped { -1.0 } else { 1.0 });
    factorization.rows
                 .iter()
                 .enumerate()
                 .try_fold(initial, |acc, (i, row)| {
                     Context::eval_binary(BinaryOperator::Mul, &acc, &row[i], position)
                 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[f64]]) -> Value {
        let rows = rows.iter()
                       .map(|row| row.iter().copied().map(Value::Number).collect())
                       .collect();
        Value::Matrix(Matrix::from_rows(rows, 0).unwrap())
    }

    #[test]
    fn lu_combines_both_factors() {
        let a = matrix(&[&[2.0, 1.0, 1.0], &[4.0, 3.0, 3.0], &[8.0, 7.0, 9.0]]);
        let expected = matrix(&[&[2.0, 1.0, 1.0], &[2.0, 1.0, 1.0], &[4.0, 3.0, 2.0]]);

        assert_eq!(lu(&[a], 0).unwrap(), expected);
    }

    #[test]
    fn lu_rejects_bad_input() {
        let zero_pivot = matrix(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let not_square = matrix(&[&[1.0, 2.0, 3.0]]);

        assert!(matches!(lu(&[zero_pivot], 0), Err(RuntimeError::Range { .. })));
        assert!(matches!(lu(&[not_square], 0), Err(RuntimeError::Range { .. })));
        assert!(matches!(lu(&[Value::from("abc")], 0), Err(RuntimeError::Range { .. })));
    }

    #[test]
    fn det_of_special_matrices() {
        assert_eq!(det(&[Value::Matrix(Matrix::empty())], 0).unwrap(), Value::Number(1.0));
        assert_eq!(det(&[matrix(&[&[1.0, 2.0], &[2.0, 4.0]])], 0).unwrap(), Value::Number(0.0));
        assert_eq!(det(&[matrix(&[&[2.0, 0.0, 0.0], &[0.0, 3.0, 0.0], &[0.0, 0.0, 4.0]])], 0).unwrap(),
                   Value::Number(24.0));
    }

    #[test]
    fn shapes_from_arguments() {
        assert_eq!(zeros(&[Value::Number(2.0)], 0).unwrap(),
                   Value::Matrix(Matrix::filled(2, 2, &Value::Number(0.0), 0).unwrap()));
        assert_eq!(ones(&[matrix(&[&[1.0, 3.0]])], 0).unwrap(),
                   Value::Matrix(Matrix::filled(1, 3, &Value::Number(1.0), 0).unwrap()));
        assert_eq!(eye(&[Value::Number(2.0), Value::Number(3.0)], 0).unwrap(),
                   matrix(&[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]]));
        assert!(zeros(&[Value::Number(-1.0)], 0).is_err());
        assert!(matches!(zeros(&[Value::Number(4_294_967_296.0), Value::Number(4_294_967_296.0)], 2),
                         Err(RuntimeError::Range { position: 2, .. })));
        assert!(eye(&[Value::Number(1e9)], 0).is_err());
        assert!(zeros(&[Value::Number(1.5)], 0).is_err());
    }

    #[test]
    fn size_of_each_kind() {
        assert_eq!(size(&[matrix(&[&[1.0, 2.0, 3.0]])], 0).unwrap(), matrix(&[&[1.0, 3.0]]));
        assert_eq!(size(&[Value::from("abc")], 0).unwrap(), matrix(&[&[3.0]]));
        assert_eq!(size(&[Value::Number(1.0)], 0).unwrap(), Value::Matrix(Matrix::empty()));
    }
}
