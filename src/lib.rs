//! # unitmath
//!
//! unitmath is an embeddable expression language written in Rust.
//! It parses and evaluates mathematical expressions over real and complex
//! numbers, physical units, matrices, ranges and strings, with persistent
//! variables and user-defined functions.
//!
//! ```
//! use unitmath::Parser;
//!
//! let mut parser = Parser::new();
//! parser.eval("a = [1, 2; 3, 4]").unwrap();
//! parser.eval("function f(x) = a * x").unwrap();
//!
//! assert_eq!(parser.eval("f(2)").unwrap().to_string(), "[[2, 4], [6, 8]]");
//! assert_eq!(parser.eval("ans(2, 1)").unwrap().to_string(), "6");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

pub use crate::{
    error::Error,
    interpreter::{parser::core::parse_statements, scope::Scope, value::core::Value},
};
use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        parser::core::{ParseResult, parse_single},
        scope::{Entry, Options},
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches the byte offset of each node for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including error kinds, descriptions, and source
/// locations for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches byte offsets and detailed messages for context.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code evaluation. It exposes the public
/// API for interpreting and executing expressions or programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers and conversion routines that are used
/// throughout the interpreter, parser, and evaluator. These include safe
/// conversions between integer and floating-point types, and any
/// general-purpose functions not specific to a single phase.
///
/// # Responsibilities
/// - Safely convert between `i64`, `i32`, `usize`, and `f64` without silent
///   data loss.
/// - Format numbers for display.
pub mod util;

/// Parses `text` into a single expression.
///
/// # Errors
/// Returns a [`ParseError`] for invalid characters, grammar violations, or
/// text holding more or less than one statement.
///
/// # Example
/// ```
/// use unitmath::{ast::Expr, parse};
///
/// assert!(matches!(parse("2 + 3").unwrap(), Expr::BinaryOp { .. }));
/// assert!(parse("2 +").is_err());
/// ```
pub fn parse(text: &str) -> ParseResult<Expr> {
    parse_single(text)
}

/// Evaluates a parsed top-level statement against `scope` and records its
/// value as `ans`.
///
/// # Example
/// ```
/// use unitmath::{Scope, Value, evaluate, parse};
///
/// let mut scope = Scope::new();
/// evaluate(&parse("x = 4").unwrap(), &mut scope).unwrap();
///
/// assert_eq!(evaluate(&parse("x ^ 2").unwrap(), &mut scope).unwrap(),
///            Value::Number(16.0));
/// assert_eq!(scope.ans(), Some(&Value::Number(16.0)));
/// ```
pub fn evaluate(expr: &Expr, scope: &mut Scope) -> EvalResult<Value> {
    let mut context = Context::with_scope(std::mem::take(scope));
    let result = context.eval_toplevel(expr);
    *scope = context.scope;
    result
}

/// An evaluator instance with its own scope.
///
/// Variables, functions and `ans` persist between calls to
/// [`Parser::eval`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    context: Context,
}

impl Parser {
    /// Creates a parser over a writable scope seeded with the constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser whose scope is configured by `options`.
    ///
    /// # Example
    /// ```
    /// use unitmath::{Parser, interpreter::scope::Options};
    ///
    /// let mut parser = Parser::with_options(Options { read_only: true,
    ///                                                 ..Options::default() });
    /// assert!(parser.eval("pi > 3").is_ok());
    /// assert!(parser.eval("a = 2").is_err());
    /// ```
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self { context: Context::with_scope(Scope::with_options(options)) }
    }

    /// Evaluates every statement in `text` and returns the value of the last
    /// one.
    ///
    /// Statements run in order; a failing statement stops evaluation, but the
    /// effects of the statements before it are kept.
    ///
    /// # Errors
    /// The first [`ParseError`] or [`RuntimeError`](crate::error::RuntimeError) encountered. Nothing is
    /// evaluated if the text does not parse.
    pub fn eval(&mut self, text: &str) -> Result<Value, Error> {
        let statements = parse_statements(text)?;
        let mut last = None;
        for statement in &statements {
            last = Some(self.context.eval_toplevel(statement)?);
        }
        last.ok_or(Error::Parse(ParseError::UnexpectedEndOfInput { position: text.len() }))
    }

    /// Returns the value bound to `name`.
    ///
    /// # Errors
    /// `UndefinedSymbol` if the name is unbound or names a function.
    pub fn get(&self, name: &str) -> EvalResult<Value> {
        self.context.scope.get(name)
    }

    /// Binds `name` to `value`.
    ///
    /// # Errors
    /// `ReadOnly` if the scope is read-only.
    pub fn set(&mut self, name: &str, value: Value) -> EvalResult<()> {
        self.context.scope.set(name, value)
    }

    /// Removes the binding of `name` and returns what it was bound to.
    pub fn remove(&mut self, name: &str) -> EvalResult<Option<Entry>> {
        self.context.scope.remove(name)
    }

    /// Removes every variable and function. The built-in constants are
    /// seeded again if the scope was created with them.
    pub fn clear(&mut self) -> EvalResult<()> {
        self.context.scope.clear()
    }

    /// Returns the scope of this parser.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.context.scope
    }
}

/// Parses and evaluates `source` in a fresh evaluator.
///
/// If `auto_print` is set, the value of the last statement is printed to
/// standard output.
///
/// # Errors
/// Returns the first parse or runtime error.
///
/// # Examples
/// ```
/// use unitmath::get_result;
///
/// let value = get_result("a = 2; a + 2", false).unwrap();
/// assert_eq!(value.to_string(), "4");
///
/// // 'x' is not defined
/// assert!(get_result("y = x + 1", false).is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<Value, Error> {
    get_result_with(source, auto_print, Options::default())
}

/// Like [`get_result`], with the scope configured by `options`.
pub fn get_result_with(source: &str, auto_print: bool, options: Options) -> Result<Value, Error> {
    let mut parser = Parser::with_options(options);
    let value = parser.eval(source).inspect_err(|e| debug!(error = %e, "evaluation failed"))?;

    if auto_print {
        println!("{value}");
    }

    Ok(value)
}

