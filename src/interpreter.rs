/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST against a scope, applies the operator
/// dispatch of the value model and stores assignments and function
/// definitions.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Resolves names, calls user and built-in functions, indexes matrices.
/// - Reports runtime errors such as undefined symbols or unit mismatches.
pub mod evaluator;
/// The lexer module tokenizes source text for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// carrying its byte offset: numbers, strings, identifiers, operators and
/// delimiters.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Handles numeric and string literals, identifiers and operators.
/// - Reports characters that start no token.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST for each statement, following the operator precedence table of the
/// language.
///
/// # Responsibilities
/// - Converts tokens into expression nodes.
/// - Validates grammar, reporting errors with their byte offset.
/// - Recognizes assignments, indexed assignments and function definitions.
pub mod parser;
/// Variable and function storage.
///
/// Defines the `Scope` that maps names to values and user functions, its
/// read-only mode and the implicit `ans` binding.
pub mod scope;
/// The unit catalog.
///
/// Lists the supported units with their dimension and conversion factor, and
/// the SI prefixes each unit accepts.
pub mod units;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value kinds every operator works on: numbers,
/// complex numbers, units, matrices, ranges, strings and booleans.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements conversions between kinds and display formatting.
pub mod value;
