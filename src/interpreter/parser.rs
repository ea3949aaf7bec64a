/// Parser entry points and shared result type.
///
/// Splits a token stream into statements and dispatches each one to the
/// statement parser.
pub mod core;

/// Unary, postfix and primary expression parsing.
///
/// Handles prefix `-`/`+`, the postfix operators `!`, `'`, `in unit` and
/// indexing, and all atoms: literals, names, calls, groups and matrices.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the precedence levels from comparison down to exponentiation,
/// including the range operator `:`.
pub mod binary;

/// Utility functions for the parser.
///
/// Provides list parsing helpers and the matrix literal parser.
pub mod utils;

/// Statement parsing.
///
/// Recognizes function definitions and (indexed) assignments on top of plain
/// expressions.
pub mod statement;
