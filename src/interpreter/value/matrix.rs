use std::fmt::Display;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A rectangular two-dimensional array of scalar values stored in row-major
/// order.
///
/// The empty matrix has shape `0 x 0`. Elements are never matrices
/// themselves: literals containing matrices are assembled block-wise.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Value>,
}

/// Formats a shape as `[rows, cols]` for error messages.
#[must_use]
pub fn shape_to_string((rows, cols): (usize, usize)) -> String {
    format!("[{rows}, {cols}]")
}

/// Largest number of elements a matrix or range may hold.
pub const MAX_ELEMENTS: usize = 1 << 24;

/// Returns `rows * cols`, the element count of a matrix of that shape.
///
/// # Errors
/// `Range` if the count overflows or exceeds [`MAX_ELEMENTS`].
///
/// # Example
/// ```
/// use unitmath::interpreter::value::matrix::checked_len;
///
/// assert_eq!(checked_len(3, 4, 0).unwrap(), 12);
/// assert!(checked_len(1 << 32, 1 << 32, 0).is_err());
/// ```
pub fn checked_len(rows: usize, cols: usize, position: usize) -> EvalResult<usize> {
    rows.checked_mul(cols)
        .filter(|&len| len <= MAX_ELEMENTS)
        .ok_or_else(|| RuntimeError::Range { details: format!("Matrix of size {} exceeds the limit of {MAX_ELEMENTS} elements",
                                                              shape_to_string((rows, cols))),
                                             position })
}

impl Matrix {
    /// Returns the `0 x 0` matrix.
    #[must_use]
    pub const fn empty() -> Self {
        Self { rows: 0,
               cols: 0,
               data: Vec::new() }
    }

    /// Builds a `1 x n` row vector.
    #[must_use]
    pub fn row(data: Vec<Value>) -> Self {
        if data.is_empty() {
            return Self::empty();
        }
        Self { rows: 1,
               cols: data.len(),
               data }
    }

    /// Builds a matrix with every cell set to `value`.
    ///
    /// ## Errors
    /// `Range` if the shape holds more than [`MAX_ELEMENTS`] cells.
    pub fn filled(rows: usize, cols: usize, value: &Value, position: usize) -> EvalResult<Self> {
        let len = checked_len(rows, cols, position)?;
        if len == 0 {
            return Ok(Self::empty());
        }
        Ok(Self { rows,
                  cols,
                  data: vec![value.clone(); len] })
    }

    /// Builds the `n x n` identity matrix.
    ///
    /// ## Errors
    /// `Range` if the shape holds more than [`MAX_ELEMENTS`] cells.
    pub fn identity(n: usize, position: usize) -> EvalResult<Self> {
        let mut matrix = Self::filled(n, n, &Value::Number(0.0), position)?;
        for k in 0..n {
            matrix.data[k * n + k] = Value::Number(1.0);
        }
        Ok(matrix)
    }

    /// Builds a matrix from row-major data.
    ///
    /// ## Errors
    /// `DimensionMismatch` if `data` does not hold exactly `rows * cols`
    /// elements.
    pub fn from_shape(rows: usize, cols: usize, data: Vec<Value>, position: usize) -> EvalResult<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(RuntimeError::DimensionMismatch { details: format!("cannot shape {} elements as {}",
                                                                          data.len(),
                                                                          shape_to_string((rows, cols))),
                                                         position });
        }
        if data.is_empty() {
            return Ok(Self::empty());
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from a list of rows.
    ///
    /// ## Errors
    /// `DimensionMismatch` if the rows differ in length.
    ///
    /// ## Example
    /// ```
    /// use unitmath::interpreter::value::{core::Value, matrix::Matrix};
    ///
    /// let m = Matrix::from_rows(vec![vec![1.0.into(), 2.0.into()], vec![3.0.into(), 4.0.into()]],
    ///                           0).unwrap();
    /// assert_eq!(m.size(), (2, 2));
    /// assert_eq!(m.get(1, 0), Some(&Value::Number(3.0)));
    /// assert_eq!(m.to_string(), "[[1, 2], [3, 4]]");
    ///
    /// assert!(Matrix::from_rows(vec![vec![1.0.into()], vec![]], 0).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<Value>>, position: usize) -> EvalResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != cols) {
            return Err(RuntimeError::DimensionMismatch { details: format!("row of length {} does not match row of length {cols}",
                                                                          bad.len()),
                                                         position });
        }
        let height = rows.len();
        Self::from_shape(height, cols, rows.into_iter().flatten().collect(), position)
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub const fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for the `0 x 0` matrix.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the matrix is square (the empty matrix included).
    #[must_use]
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the element at zero-based `(row, col)`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Replaces the element at zero-based `(row, col)`. Returns `false` if
    /// the cell does not exist.
    pub fn set(&mut self, row: usize, col: usize, value: Value) -> bool {
        if row < self.rows && col < self.cols {
            self.data[row * self.cols + col] = value;
            true
        } else {
            false
        }
    }

    /// Returns the elements in row-major order.
    #[must_use]
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Consumes the matrix and returns its elements in row-major order.
    #[must_use]
    pub fn into_data(self) -> Vec<Value> {
        self.data
    }

    /// Returns the elements of row `row`.
    #[must_use]
    pub fn row_slice(&self, row: usize) -> &[Value] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns the transposed matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.data[row * self.cols + col].clone());
            }
        }
        Self { rows: self.cols,
               cols: self.rows,
               data }
    }

    /// Applies `f` to every element.
    pub fn map<F>(&self, mut f: F) -> EvalResult<Self>
        where F: FnMut(&Value) -> EvalResult<Value>
    {
        Ok(Self { rows: self.rows,
                  cols: self.cols,
                  data: self.data.iter().map(&mut f).collect::<EvalResult<_>>()? })
    }

    /// Grows the matrix to at least `rows x cols`, filling new cells with
    /// `0`. Never shrinks.
    ///
    /// ## Errors
    /// `Range` if the grown matrix would hold more than [`MAX_ELEMENTS`]
    /// cells. The matrix is left unchanged then.
    pub fn grow(&mut self, rows: usize, cols: usize, position: usize) -> EvalResult<()> {
        let rows = rows.max(self.rows);
        let cols = cols.max(self.cols);
        if rows == self.rows && cols == self.cols {
            return Ok(());
        }
        let mut data = vec![Value::Number(0.0); checked_len(rows, cols, position)?];
        for row in 0..self.rows {
            for col in 0..self.cols {
                data[row * cols + col] = self.data[row * self.cols + col].clone();
            }
        }
        self.rows = rows;
        self.cols = cols;
        self.data = data;
        Ok(())
    }

    /// Joins blocks side by side. Empty blocks are skipped.
    ///
    /// ## Errors
    /// `DimensionMismatch` if the non-empty blocks differ in row count.
    pub fn concat_horizontal(blocks: Vec<Self>, position: usize) -> EvalResult<Self> {
        let blocks = blocks.into_iter().filter(|b| !b.is_empty()).collect::<Vec<_>>();
        let Some(rows) = blocks.first().map(Self::rows) else {
            return Ok(Self::empty());
        };
        if let Some(bad) = blocks.iter().find(|b| b.rows != rows) {
            return Err(RuntimeError::DimensionMismatch { details: format!("cannot join {} and {} horizontally, row counts differ",
                                                                          shape_to_string(blocks[0].size()),
                                                                          shape_to_string(bad.size())),
                                                         position });
        }
        let cols = blocks.iter().map(Self::cols).sum();
        let mut data = Vec::with_capacity(checked_len(rows, cols, position)?);
        for row in 0..rows {
            for block in &blocks {
                data.extend_from_slice(block.row_slice(row));
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// Stacks blocks on top of each other. Empty blocks are skipped.
    ///
    /// ## Errors
    /// `DimensionMismatch` if the non-empty blocks differ in column count.
    pub fn concat_vertical(blocks: Vec<Self>, position: usize) -> EvalResult<Self> {
        let blocks = blocks.into_iter().filter(|b| !b.is_empty()).collect::<Vec<_>>();
        let Some(cols) = blocks.first().map(Self::cols) else {
            return Ok(Self::empty());
        };
        if let Some(bad) = blocks.iter().find(|b| b.cols != cols) {
            return Err(RuntimeError::DimensionMismatch { details: format!("cannot stack {} and {} vertically, column counts differ",
                                                                          shape_to_string(blocks[0].size()),
                                                                          shape_to_string(bad.size())),
                                                         position });
        }
        let rows = blocks.iter().map(Self::rows).sum();
        checked_len(rows, cols, position)?;
        let data = blocks.into_iter().flat_map(Self::into_data).collect();
        Ok(Self { rows, cols, data })
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        write!(f, "[")?;
        for row in 0..self.rows {
            if row > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (col, value) in self.row_slice(row).iter().enumerate() {
                if col > 0 {
                    write!(f, ", ")?;
                }
                match value {
                    Value::String(s) => write!(f, "\"{s}\"")?,
                    other => write!(f, "{other}")?,
                }
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(rows: usize, cols: usize, values: &[f64]) -> Matrix {
        Matrix::from_shape(rows, cols, values.iter().copied().map(Value::Number).collect(), 0).unwrap()
    }

    #[test]
    fn grow_pads_with_zeros() {
        let mut m = numbers(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.grow(3, 3, 0).unwrap();
        assert_eq!(m, numbers(3, 3, &[1.0, 2.0, 0.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn oversized_shapes_are_rejected() {
        let huge = 1_usize << 32;

        assert!(matches!(Matrix::filled(huge, huge, &Value::Number(0.0), 3),
                         Err(RuntimeError::Range { position: 3, .. })));
        assert!(Matrix::filled(MAX_ELEMENTS, 2, &Value::Number(0.0), 0).is_err());
        assert!(Matrix::identity(huge, 0).is_err());
        assert!(matches!(Matrix::from_shape(huge, huge, Vec::new(), 0),
                         Err(RuntimeError::DimensionMismatch { .. })));

        let mut m = numbers(1, 1, &[5.0]);
        assert!(m.grow(huge, huge, 0).is_err());
        assert_eq!(m, numbers(1, 1, &[5.0]));
    }

    #[test]
    fn concatenation_skips_empty_blocks() {
        let joined = Matrix::concat_horizontal(vec![Matrix::empty(), Matrix::empty()], 0).unwrap();
        assert_eq!(joined.size(), (0, 0));

        let stacked =
            Matrix::concat_vertical(vec![numbers(1, 1, &[1.0]), numbers(2, 1, &[2.0, 3.0])], 0).unwrap();
        assert_eq!(stacked, numbers(3, 1, &[1.0, 2.0, 3.0]));
    }

    #[test]
    fn concatenation_rejects_mismatched_blocks() {
        let square = numbers(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let row = numbers(1, 3, &[1.0, 2.0, 3.0]);
        assert!(matches!(Matrix::concat_vertical(vec![square.clone(), row.clone()], 4),
                         Err(RuntimeError::DimensionMismatch { position: 4, .. })));
        assert!(Matrix::concat_horizontal(vec![square, row], 0).is_err());
    }

    #[test]
    fn transpose_swaps_shape() {
        let m = numbers(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.transpose(), numbers(3, 2, &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]));
    }
}
