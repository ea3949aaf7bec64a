/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include invalid characters, unexpected tokens, unmatched
/// brackets and malformed assignments or function definitions.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating an expression
/// tree: undefined symbols, read-only violations, unsupported operand kinds,
/// unit and shape mismatches, and domain errors of integer-only functions.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error produced by the parse-then-evaluate pipeline.
///
/// Host-facing entry points such as [`crate::get_result`] and
/// [`crate::Parser::eval`] return this type so that callers can handle both
/// phases uniformly while still matching on the concrete failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The source text could not be tokenized or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The expression tree failed while being evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
