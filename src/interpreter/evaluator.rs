/// Binary operator evaluation logic.
///
/// Dispatches every binary operator over the value kinds: real and complex
/// arithmetic, unit arithmetic, string concatenation, element-wise matrix
/// operations, the matrix product and the matrix power.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation, unary plus, factorial and transpose.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context that owns the
/// scope, literals, ranges, matrix literals, `in` conversions and
/// assignments.
pub mod core;

/// Matrix indexing.
///
/// Reads `m(i)` and `m(i, j)` with numbers, ranges or index vectors, and
/// writes to indexed targets, growing the matrix when needed.
pub mod index;

/// Utility functions for evaluation.
///
/// Provides helpers and reusable routines shared by evaluation logic.
pub mod utils;

/// Function evaluation.
///
/// Resolves calls against parameters, user functions, values and the
/// built-in table, checks argument counts and runs the built-ins.
pub mod function;
