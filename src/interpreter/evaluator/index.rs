use tracing::debug;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Bindings, Context, EvalResult},
        value::{
            core::Value,
            matrix::{Matrix, checked_len, shape_to_string},
        },
    },
    util::num::f64_to_index,
};

/// The 1-based positions selected by one index argument.
struct Selection {
    indices: Vec<usize>,
    /// The index was a single number, so the dimension is dropped on reads.
    scalar:  bool,
}

impl Selection {
    /// Resolves an index value. `max` is only used for error messages.
    fn resolve(value: &Value, max: usize, position: usize) -> EvalResult<Self> {
        let one = |v: &Value| f64_to_index(v.as_real("index", position)?, max, position);

        match value {
            Value::Number(_) | Value::Bool(_) => Ok(Self { indices: vec![one(value)?],
                                                           scalar:  true, }),
            Value::Range(r) => {
                let indices = r.values()
                               .map(|v| f64_to_index(v, max, position))
                               .collect::<EvalResult<_>>()?;
                Ok(Self { indices,
                          scalar: false })
            },
            Value::Matrix(m) => Ok(Self { indices: m.data().iter().map(one).collect::<EvalResult<_>>()?,
                                          scalar:  false, }),
            other => Err(RuntimeError::UnsupportedArgument { function: "index".to_string(),
                                                             kind: other.type_name(),
                                                             position }),
        }
    }

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn highest(&self) -> usize {
        self.indices.iter().copied().max().unwrap_or(0)
    }

    /// Fails if any index exceeds `max`.
    fn check_bounds(&self, max: usize, position: usize) -> EvalResult<()> {
        match self.indices.iter().find(|&&i| i > max) {
            Some(&found) => Err(RuntimeError::IndexOutOfBounds { max,
                                                                 found: i64::try_from(found).unwrap_or(i64::MAX),
                                                                 position }),
            None => Ok(()),
        }
    }
}

/// How a single index maps onto a matrix.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// Along the columns of a row vector (or an empty matrix).
    Row,
    /// Along the rows of a column vector.
    Column,
    /// Row-major linear order over a true 2-D matrix.
    Linear,
}

impl Axis {
    fn of(matrix: &Matrix) -> Self {
        match matrix.size() {
            (rows, _) if rows <= 1 => Self::Row,
            (_, 1) => Self::Column,
            _ => Self::Linear,
        }
    }

    /// Returns the zero-based cell addressed by the 1-based `index`.
    const fn cell(self, index: usize, cols: usize) -> (usize, usize) {
        match self {
            Self::Row => (0, index - 1),
            Self::Column => (index - 1, 0),
            Self::Linear => ((index - 1) / cols, (index - 1) % cols),
        }
    }

    /// Returns the shape of a region of `len` cells selected along this axis.
    const fn region(self, len: usize) -> (usize, usize) {
        match self {
            Self::Row | Self::Linear => (1, len),
            Self::Column => (len, 1),
        }
    }
}

fn index_count_error(found: usize, position: usize) -> RuntimeError {
    RuntimeError::ArgumentCount { name: "index".to_string(),
                                  expected: "1 or 2".to_string(),
                                  found,
                                  position }
}

impl Context {
    fn eval_selection(&mut self,
                      index: &Expr,
                      max: usize,
                      bindings: Option<&Bindings>)
                      -> EvalResult<Selection> {
        let value = self.eval(index, bindings)?;
        Selection::resolve(&value, max, index.position())
    }

    fn eval_selections(&mut self,
                       indices: &[Expr],
                       bounds: &[usize],
                       position: usize,
                       bindings: Option<&Bindings>)
                       -> EvalResult<Vec<Selection>> {
        if indices.is_empty() || indices.len() > 2 {
            return Err(index_count_error(indices.len(), position));
        }
        let mut selections = Vec::with_capacity(indices.len());
        for (expr, &max) in indices.iter().zip(bounds) {
            selections.push(self.eval_selection(expr, max, bindings)?);
        }
        Ok(selections)
    }

    /// Reads the elements of `target` selected by one or two 1-based
    /// indices.
    ///
    /// With two indices the result is the `rows x cols` sub-matrix, or the
    /// element itself when both indices are numbers. A single index walks a
    /// vector along its long axis and a 2-D matrix in row-major order.
    /// Scalars behave like `1 x 1` matrices. Reads never grow anything.
    ///
    /// # Errors
    /// - `IndexOutOfBounds` if an index is below 1 or past the end.
    /// - `NonIntegerArgument` for fractional indices.
    /// - `ArgumentCount` for zero or more than two indices.
    ///
    /// # Example
    /// ```
    /// use unitmath::{interpreter::evaluator::core::Context, parse};
    ///
    /// let mut ctx = Context::new();
    /// ctx.eval(&parse("a = [1, 2, 3; 4, 5, 6]").unwrap(), None).unwrap();
    ///
    /// let v = ctx.eval(&parse("a(2, 3)").unwrap(), None).unwrap();
    /// assert_eq!(v.to_string(), "6");
    ///
    /// let v = ctx.eval(&parse("a(1:2, 2)").unwrap(), None).unwrap();
    /// assert_eq!(v.to_string(), "[[2], [5]]");
    /// ```
    pub fn eval_index_read(&mut self,
                           target: &Value,
                           indices: &[Expr],
                           position: usize,
                           bindings: Option<&Bindings>)
                           -> EvalResult<Value> {
        let matrix = match target {
            Value::String(_) => {
                return Err(RuntimeError::UnsupportedArgument { function: "index".to_string(),
                                                               kind: target.type_name(),
                                                               position });
            },
            other => other.clone().into_matrix(),
        };
        let (rows, cols) = matrix.size();

        if let [index] = indices {
            let axis = Axis::of(&matrix);
            let selection = self.eval_selection(index, matrix.len(), bindings)?;
            selection.check_bounds(matrix.len(), index.position())?;

            let values = selection.indices
                                  .iter()
                                  .filter_map(|&i| {
                                      let (r, c) = axis.cell(i, cols);
                                      matrix.get(r, c).cloned()
                                  })
                                  .collect::<Vec<_>>();
            if selection.scalar
               && let Some(value) = values.first()
            {
                return Ok(value.clone());
            }
            let (height, width) = axis.region(values.len());
            return Ok(Value::Matrix(Matrix::from_shape(height, width, values, position)?));
        }

        let selections = self.eval_selections(indices, &[rows, cols], position, bindings)?;
        let [row_sel, col_sel] = selections.as_slice() else {
            return Err(index_count_error(indices.len(), position));
        };
        row_sel.check_bounds(rows, indices[0].position())?;
        col_sel.check_bounds(cols, indices[1].position())?;

        let mut values = Vec::with_capacity(checked_len(row_sel.len(), col_sel.len(), position)?);
        for &r in &row_sel.indices {
            for &c in &col_sel.indices {
                if let Some(value) = matrix.get(r - 1, c - 1) {
                    values.push(value.clone());
                }
            }
        }
        if row_sel.scalar
           && col_sel.scalar
           && let Some(value) = values.first()
        {
            return Ok(value.clone());
        }
        Ok(Value::Matrix(Matrix::from_shape(row_sel.len(), col_sel.len(), values, position)?))
    }

    /// Writes `value` into the cells of the matrix bound to `name` selected
    /// by one or two 1-based indices, and rebinds the result.
    ///
    /// The matrix grows as needed; new cells are filled with `0`. An unbound
    /// name starts out as the empty matrix, a bound scalar as a `1 x 1`
    /// matrix. A scalar right-hand side fills every selected cell, a matrix
    /// must match the shape of the selection (or its length when the
    /// selection is a vector).
    ///
    /// The caller has already checked that the scope is writable.
    ///
    /// # Returns
    /// The assigned value.
    ///
    /// # Example
    /// ```
    /// use unitmath::{interpreter::evaluator::core::Context, parse};
    ///
    /// let mut ctx = Context::new();
    /// ctx.eval(&parse("a = [1, 2; 3, 4]").unwrap(), None).unwrap();
    /// ctx.eval(&parse("a(2:3, 2:3) = [10, 11; 12, 13]").unwrap(), None).unwrap();
    ///
    /// assert_eq!(ctx.scope.get("a").unwrap().to_string(),
    ///            "[[1, 2, 0], [3, 10, 11], [0, 12, 13]]");
    /// ```
    pub fn eval_index_write(&mut self,
                            name: &str,
                            indices: &[Expr],
                            value: Value,
                            position: usize,
                            bindings: Option<&Bindings>)
                            -> EvalResult<Value> {
        let mut matrix = self.scope
                             .value(name)
                             .cloned()
                             .map_or_else(Matrix::empty, Value::into_matrix);
        let (rows, cols) = matrix.size();

        let (cells, region) = if let [index] = indices {
            let axis = Axis::of(&matrix);
            let selection = self.eval_selection(index, matrix.len(), bindings)?;
            match axis {
                Axis::Row => grow(&mut matrix, name, 1, selection.highest(), position)?,
                Axis::Column => grow(&mut matrix, name, selection.highest(), 1, position)?,
                Axis::Linear => selection.check_bounds(matrix.len(), index.position())?,
            }
            let cells = selection.indices
                                 .iter()
                                 .map(|&i| axis.cell(i, cols))
                                 .collect::<Vec<_>>();
            (cells, axis.region(selection.len()))
        } else {
            let selections = self.eval_selections(indices, &[rows, cols], position, bindings)?;
            let [row_sel, col_sel] = selections.as_slice() else {
                return Err(index_count_error(indices.len(), position));
            };
            grow(&mut matrix, name, row_sel.highest(), col_sel.highest(), position)?;

            let mut cells = Vec::with_capacity(checked_len(row_sel.len(), col_sel.len(), position)?);
            for &r in &row_sel.indices {
                for &c in &col_sel.indices {
                    cells.push((r - 1, c - 1));
                }
            }
            (cells, (row_sel.len(), col_sel.len()))
        };

        let replacements = region_values(&value, region, position)?;
        for ((r, c), v) in cells.into_iter().zip(replacements) {
            matrix.set(r, c, v);
        }

        self.scope.set(name, Value::Matrix(matrix))?;
        Ok(value)
    }
}

/// Grows `matrix` so that the cell `(rows, cols)` (1-based) exists.
fn grow(matrix: &mut Matrix, name: &str, rows: usize, cols: usize, position: usize) -> EvalResult<()> {
    let before = matrix.size();
    matrix.grow(rows, cols, position)?;
    if matrix.size() != before {
        debug!(name,
               from = %shape_to_string(before),
               to = %shape_to_string(matrix.size()),
               "matrix grown for indexed write");
    }
    Ok(())
}

/// Expands the right-hand side of an indexed write into one value per cell
/// of a `region`, in row-major order.
fn region_values(value: &Value, region: (usize, usize), position: usize) -> EvalResult<Vec<Value>> {
    let cells = checked_len(region.0, region.1, position)?;
    let Some(source) = value.to_matrix() else {
        return Ok(vec![value.clone(); cells]);
    };
    let is_vector = region.0 == 1 || region.1 == 1;
    if source.size() == region || (is_vector && source.len() == cells) {
        return Ok(source.into_data());
    }
    Err(RuntimeError::DimensionMismatch { details: format!("cannot assign a matrix of size {} to a selection of size {}",
                                                           shape_to_string(source.size()),
                                                           shape_to_string(region)),
                                          position })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn run(ctx: &mut Context, source: &str) -> EvalResult<Value> {
        ctx.eval(&parse(source).unwrap(), None)
    }

    #[test]
    fn single_index_follows_the_long_axis() {
        let mut ctx = Context::new();
        run(&mut ctx, "c = [1; 2; 3]").unwrap();
        run(&mut ctx, "m = [1, 2; 3, 4]").unwrap();

        assert_eq!(run(&mut ctx, "c(2)").unwrap(), Value::Number(2.0));
        assert_eq!(run(&mut ctx, "c(2:3)").unwrap().to_string(), "[[2], [3]]");
        assert_eq!(run(&mut ctx, "m(2)").unwrap(), Value::Number(2.0));
        assert_eq!(run(&mut ctx, "m([4, 1])").unwrap().to_string(), "[[4, 1]]");
    }

    #[test]
    fn reads_never_grow() {
        let mut ctx = Context::new();
        run(&mut ctx, "m = [1, 2; 3, 4]").unwrap();

        assert!(matches!(run(&mut ctx, "m(3, 1)"),
                         Err(RuntimeError::IndexOutOfBounds { max: 2, found: 3, .. })));
        assert!(matches!(run(&mut ctx, "m(5)"),
                         Err(RuntimeError::IndexOutOfBounds { max: 4, found: 5, .. })));
        assert!(run(&mut ctx, "m(0)").is_err());
        assert_eq!(run(&mut ctx, "m").unwrap().to_string(), "[[1, 2], [3, 4]]");
    }

    #[test]
    fn scalars_index_like_one_by_one_matrices() {
        let mut ctx = Context::new();

        run(&mut ctx, "x = 7").unwrap();
        assert_eq!(run(&mut ctx, "x(1, 1)").unwrap(), Value::Number(7.0));
        assert!(run(&mut ctx, "x(2)").is_err());
    }

    #[test]
    fn writes_grow_vectors_along_their_axis() {
        let mut ctx = Context::new();
        run(&mut ctx, "c = [1; 2]").unwrap();
        run(&mut ctx, "c(4) = 9").unwrap();
        assert_eq!(ctx.scope.get("c").unwrap().to_string(), "[[1], [2], [0], [9]]");

        run(&mut ctx, "m = [1, 2; 3, 4]").unwrap();
        assert!(run(&mut ctx, "m(5) = 1").is_err());
        run(&mut ctx, "m(4) = 40").unwrap();
        assert_eq!(ctx.scope.get("m").unwrap().to_string(), "[[1, 2], [3, 40]]");
    }

    #[test]
    fn block_write_checks_shape() {
        let mut ctx = Context::new();
        run(&mut ctx, "m = zeros(2, 2)").unwrap();

        run(&mut ctx, "m(1:2, 2) = [5, 6]").unwrap();
        assert_eq!(ctx.scope.get("m").unwrap().to_string(), "[[0, 5], [0, 6]]");

        run(&mut ctx, "m(1, 1:2) = 1").unwrap();
        assert_eq!(ctx.scope.get("m").unwrap().to_string(), "[[1, 1], [0, 6]]");

        assert!(matches!(run(&mut ctx, "m(1:2, 1:2) = [1, 2, 3, 4]"),
                         Err(RuntimeError::DimensionMismatch { .. })));
    }

    #[test]
    fn oversized_writes_fail_without_touching_the_binding() {
        let mut ctx = Context::new();
        run(&mut ctx, "m = 1").unwrap();

        assert!(matches!(run(&mut ctx, "m(2^32, 2^32) = 1"), Err(RuntimeError::Range { .. })));
        assert!(matches!(run(&mut ctx, "m(2^40) = 1"), Err(RuntimeError::Range { .. })));
        assert_eq!(ctx.scope.get("m").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn strings_cannot_be_indexed() {
        let mut ctx = Context::new();
        run(&mut ctx, "s = \"text\"").unwrap();

        assert!(matches!(run(&mut ctx, "s(1)"),
                         Err(RuntimeError::UnsupportedArgument { .. })));
    }
}
