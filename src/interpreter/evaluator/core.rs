use std::collections::HashMap;

use tracing::trace;

use crate::{
    ast::{Expr, FunctionDef, LiteralValue},
    error::RuntimeError,
    interpreter::{
        scope::Scope,
        units::{Prefix, UnitDef},
        value::{core::Value, matrix::Matrix, range::Range},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Parameter bindings of the user function currently being called.
pub type Bindings = HashMap<String, Value>;

/// Stores the runtime evaluation context.
///
/// The context owns the [`Scope`] every statement is evaluated against.
/// Assignments and function definitions are the only operations that write to
/// it, and they do so only after their right-hand side evaluated successfully.
///
/// ## Usage
///
/// `Context` is created once and reused for evaluating consecutive
/// statements, so variables, user functions and `ans` persist between them.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Variables, user functions and constants visible to every statement.
    pub scope: Scope,
}

impl Context {
    /// Creates a context over a fresh writable scope with the built-in
    /// constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context over an existing scope.
    #[must_use]
    pub const fn with_scope(scope: Scope) -> Self {
        Self { scope }
    }

    /// Evaluates one top-level statement and records its value as `ans`.
    ///
    /// # Example
    /// ```
    /// use unitmath::{
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    ///     parse,
    /// };
    ///
    /// let mut ctx = Context::new();
    /// let value = ctx.eval_toplevel(&parse("2 + 3").unwrap()).unwrap();
    ///
    /// assert_eq!(value, Value::Number(5.0));
    /// assert_eq!(ctx.scope.ans(), Some(&Value::Number(5.0)));
    /// ```
    pub fn eval_toplevel(&mut self, expr: &Expr) -> EvalResult<Value> {
        let value = self.eval(expr, None)?;
        trace!(position = expr.position(), %value, "statement evaluated");
        self.scope.set_ans(value.clone());
        Ok(value)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant; every operator is routed through
    /// [`Context::eval_binary`] or [`Context::eval_unary`].
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `bindings`: Parameter bindings when evaluating a user function body.
    ///
    /// # Returns
    /// The value the expression produced. Assignments yield the assigned
    /// value, function definitions their signature.
    pub fn eval(&mut self, expr: &Expr, bindings: Option<&Bindings>) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Self::eval_literal(value)),
            Expr::Variable { name, position } => self.eval_variable(name, *position, bindings),
            Expr::UnaryOp { op, expr, position } => {
                let value = self.eval(expr, bindings)?;
                Self::eval_unary(*op, &value, *position)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => {
                let left = self.eval(left, bindings)?;
                let right = self.eval(right, bindings)?;
                Self::eval_binary(*op, &left, &right, *position)
            },
            Expr::Range { start,
                          step,
                          end,
                          position, } => self.eval_range(start, step.as_deref(), end, *position, bindings),
            Expr::Matrix { rows, position } => self.eval_matrix_literal(rows, *position, bindings),
            Expr::Index { target,
                          indices,
                          position, } => {
                let target = self.eval(target, bindings)?;
                self.eval_index_read(&target, indices, *position, bindings)
            },
            Expr::Call { name,
                         arguments,
                         position, } => self.eval_call(name, arguments, *position, bindings),
            Expr::Conversion { expr,
                               unit,
                               prefix,
                               position, } => {
                let value = self.eval(expr, bindings)?;
                Self::eval_conversion(&value, unit, prefix, *position)
            },
            Expr::Assignment { name,
                               indices,
                               value,
                               position, } => {
                self.eval_assignment(name, indices.as_deref(), value, *position, bindings)
            },
            Expr::FunctionDefinition(def) => self.eval_function_definition(def),
        }
    }

    /// Evaluates a literal expression.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// assert_eq!(Context::eval_literal(&7.0.into()), Value::Number(7.0));
    /// ```
    #[must_use]
    pub fn eval_literal(value: &LiteralValue) -> Value {
        match value {
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::Complex(c) => Value::Complex(*c),
            LiteralValue::Unit(u) => Value::Unit(u.clone()),
            LiteralValue::String(s) => Value::String(s.clone()),
            LiteralValue::Bool(b) => Value::Bool(*b),
        }
    }

    /// Looks up a variable by name.
    ///
    /// Variable lookup checks, in order:
    /// 1. Local function bindings (when evaluating a function body).
    /// 2. Values in the scope.
    ///
    /// The lookup happens when the variable is evaluated, so a function body
    /// sees the scope as it is at call time.
    pub fn eval_variable(&self, name: &str, position: usize, bindings: Option<&Bindings>) -> EvalResult<Value> {
        if let Some(b) = bindings
           && let Some(value) = b.get(name)
        {
            return Ok(value.clone());
        }
        self.scope
            .value(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedSymbol { name: name.to_string(),
                                                           position })
    }

    /// Evaluates `start:end` or `start:step:end`.
    ///
    /// All bounds must be real numbers.
    fn eval_range(&mut self,
                  start: &Expr,
                  step: Option<&Expr>,
                  end: &Expr,
                  position: usize,
                  bindings: Option<&Bindings>)
                  -> EvalResult<Value> {
        let start = self.eval(start, bindings)?.as_real("range", position)?;
        let step = match step {
            Some(step) => self.eval(step, bindings)?.as_real("range", position)?,
            None => 1.0,
        };
        let end = self.eval(end, bindings)?.as_real("range", position)?;

        Ok(Value::Range(Range::new(start, step, end, position)?))
    }

    /// Evaluates a matrix literal by block concatenation.
    ///
    /// Every entry is turned into a block (scalars are `1 x 1`), the blocks of
    /// a row are joined horizontally and the rows are stacked vertically.
    /// Empty blocks are ignored, so `[[], []]` is the empty matrix.
    ///
    /// # Example
    /// ```
    /// use unitmath::{interpreter::evaluator::core::Context, parse};
    ///
    /// let mut ctx = Context::new();
    /// let value = ctx.eval(&parse("[1; [2; 3]]").unwrap(), None).unwrap();
    ///
    /// assert_eq!(value.to_string(), "[[1], [2], [3]]");
    /// ```
    pub fn eval_matrix_literal(&mut self,
                               rows: &[Vec<Expr>],
                               position: usize,
                               bindings: Option<&Bindings>)
                               -> EvalResult<Value> {
        let mut stacked = Vec::with_capacity(rows.len());
        for row in rows {
            let mut blocks = Vec::with_capacity(row.len());
            for entry in row {
                blocks.push(self.eval(entry, bindings)?.into_matrix());
            }
            stacked.push(Matrix::concat_horizontal(blocks, position)?);
        }
        Ok(Value::Matrix(Matrix::concat_vertical(stacked, position)?))
    }

    /// Re-expresses a unit value in another unit.
    ///
    /// Matrices are converted element-wise. The value must measure the same
    /// quantity as the target unit.
    ///
    /// # Errors
    /// - `UnsupportedArgument` if the value is not a unit.
    /// - `IncompatibleUnits` if the dimensions differ.
    pub fn eval_conversion(value: &Value,
                           unit: &'static UnitDef,
                           prefix: &'static Prefix,
                           position: usize)
                           -> EvalResult<Value> {
        match value {
            Value::Unit(u) => {
                if u.dimension() != unit.dimension {
                    return Err(RuntimeError::IncompatibleUnits { left: u.unit_name(),
                                                                 right: format!("{}{}",
                                                                                prefix.name,
                                                                                unit.name),
                                                                 position });
                }
                Ok(Value::Unit(u.convert_to(unit, prefix)))
            },
            Value::Matrix(m) => {
                Ok(Value::Matrix(m.map(|v| Self::eval_conversion(v, unit, prefix, position))?))
            },
            Value::Range(r) => Self::eval_conversion(&Value::Matrix(r.to_matrix()), unit, prefix, position),
            other => Err(RuntimeError::UnsupportedArgument { function: "in".to_string(),
                                                             kind: other.type_name(),
                                                             position }),
        }
    }

    /// Evaluates an assignment.
    ///
    /// The scope is checked for writability before anything is evaluated, and
    /// written only once the right-hand side produced a value. The assigned
    /// value is returned.
    fn eval_assignment(&mut self,
                       name: &str,
                       indices: Option<&[Expr]>,
                       value: &Expr,
                       position: usize,
                       bindings: Option<&Bindings>)
                       -> EvalResult<Value> {
        self.scope.check_writable("assign", name, position)?;

        let value = self.eval(value, bindings)?;
        match indices {
            Some(indices) => self.eval_index_write(name, indices, value, position, bindings),
            None => {
                self.scope.set(name, value.clone())?;
                Ok(value)
            },
        }
    }

    /// Registers a user function and returns its signature.
    fn eval_function_definition(&mut self, def: &FunctionDef) -> EvalResult<Value> {
        self.scope.define_function(def.clone())?;
        Ok(Value::String(def.signature()))
    }
}
