use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{binary::parse_comparison, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence expression level, comparison, and
/// recursively descends through the precedence hierarchy. Assignment is only
/// recognized at statement level.
///
/// Grammar: `expression := comparison`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, position)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_comparison(tokens)
}

/// Returns `true` for the tokens that end a statement.
pub(in crate::interpreter::parser) const fn is_separator(token: &Token) -> bool {
    matches!(token, Token::NewLine | Token::Semicolon)
}

/// Skips any run of statement separators.
pub(in crate::interpreter::parser) fn skip_separators<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((token, _)) = tokens.peek()
          && is_separator(token)
    {
        tokens.next();
    }
}

/// Parses every statement of `source`.
///
/// Statements are separated by newlines or `;`. Empty statements are
/// skipped, so blank lines and trailing separators are allowed.
///
/// # Errors
/// Returns the first lexing or parsing error. No partial result is returned.
///
/// # Example
/// ```
/// use unitmath::interpreter::parser::core::parse_statements;
///
/// let statements = parse_statements("a = 2\n\nb = a * 3; b").unwrap();
/// assert_eq!(statements.len(), 3);
///
/// assert!(parse_statements("a = (2").is_err());
/// ```
pub fn parse_statements(source: &str) -> ParseResult<Vec<Expr>> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    loop {
        skip_separators(&mut iter);
        if iter.peek().is_none() {
            break;
        }
        let statement = parse_statement(&mut iter).map_err(|e| e.at_end_of(source.len()))?;
        match iter.peek() {
            None => {},
            Some((token, _)) if is_separator(token) => {},
            Some((token, position)) => {
                return Err(ParseError::UnexpectedTrailingTokens { token:    token.to_string(),
                                                                  position: *position, });
            },
        }
        statements.push(statement);
    }

    Ok(statements)
}

/// Parses `source` as exactly one statement.
///
/// Leading and trailing separators are ignored.
///
/// # Errors
/// - Any lexing or parsing error.
/// - `UnexpectedTrailingTokens` if a second statement follows.
/// - `UnexpectedEndOfInput` if the source holds no statement.
///
/// # Example
/// ```
/// use unitmath::{ast::Expr, interpreter::parser::core::parse_single};
///
/// assert!(matches!(parse_single("x").unwrap(), Expr::Variable { .. }));
/// assert!(parse_single("x\ny").is_err());
/// assert!(parse_single("").is_err());
/// ```
pub fn parse_single(source: &str) -> ParseResult<Expr> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    skip_separators(&mut iter);
    if iter.peek().is_none() {
        return Err(ParseError::UnexpectedEndOfInput { position: source.len() });
    }
    let statement = parse_statement(&mut iter).map_err(|e| e.at_end_of(source.len()))?;
    skip_separators(&mut iter);

    if let Some((token, position)) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { token:    token.to_string(),
                                                          position: *position, });
    }

    Ok(statement)
}
