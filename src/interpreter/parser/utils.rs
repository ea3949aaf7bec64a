use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Skips line breaks inside brackets, where they carry no meaning.
fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((Token::NewLine, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by call arguments, index lists and function
/// parameter lists. It repeatedly calls `parse_item` to parse one element,
/// expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. Line
/// breaks around items are ignored.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
/// - `open`: Byte offset of the opening token, for unmatched brackets.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    open: usize)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    skip_newlines(tokens);
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        skip_newlines(tokens);
        match tokens.next() {
            Some((Token::Comma, _)) => skip_newlines(tokens),
            Some((tok, _)) if tok == closing => break,
            Some((tok, position)) => {
                return Err(ParseError::UnexpectedToken { token:    format!("expected ',' or '{closing}', found {tok}"),
                                                         position: *position, });
            },
            None => {
                return Err(ParseError::UnmatchedBracket { expected: closing_char(closing),
                                                          position: open, });
            },
        }
    }
    Ok(items)
}

/// Parses the argument list of a call or index after its `(`.
pub(in crate::interpreter::parser) fn parse_arguments<'a, I>(tokens: &mut Peekable<I>,
                                                             open: usize)
                                                             -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_comma_separated(tokens, parse_expression, &Token::RParen, open)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, position)) => {
            Err(ParseError::UnexpectedToken { token:    format!("expected identifier, found {tok}"),
                                              position: *position, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

/// Parses a matrix literal such as `[1, 2; 3, 4]`.
///
/// Entries within a row are separated by `,`; rows are separated by `;` or a
/// line break. `[ ]` is the empty matrix. Entries may themselves be
/// matrices; the evaluator assembles them block-wise.
///
/// Grammar:
/// ```text
///     matrix := "[" (row ((";" | NEWLINE) row)*)? "]"
///     row    := expression ("," expression)*
/// ```
///
/// # Errors
/// Returns a `ParseError` if:
/// - an entry fails to parse,
/// - an unexpected token appears between entries,
/// - the closing `]` is missing.
pub fn parse_matrix_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let open = match tokens.next() {
        Some((Token::LBracket, position)) => *position,
        Some((tok, position)) => {
            return Err(ParseError::UnexpectedToken { token:    format!("expected '[', found {tok}"),
                                                     position: *position, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    };

    let mut rows = Vec::new();
    let mut row = Vec::new();

    skip_row_separators(tokens);
    if let Some((Token::RBracket, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::Matrix { rows, position: open });
    }

    loop {
        row.push(parse_expression(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => skip_newlines(tokens),
            Some((Token::Semicolon | Token::NewLine, _)) => {
                rows.push(std::mem::take(&mut row));
                skip_row_separators(tokens);
                if let Some((Token::RBracket, _)) = tokens.peek() {
                    tokens.next();
                    break;
                }
            },
            Some((Token::RBracket, _)) => {
                rows.push(std::mem::take(&mut row));
                break;
            },
            Some((tok, position)) => {
                return Err(ParseError::UnexpectedToken { token:    format!("expected ',', ';' or ']', found {tok}"),
                                                         position: *position, });
            },
            None => {
                return Err(ParseError::UnmatchedBracket { expected: ']',
                                                          position: open, });
            },
        }
    }

    Ok(Expr::Matrix { rows, position: open })
}

fn skip_row_separators<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((Token::NewLine | Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
    }
}

const fn closing_char(token: &Token) -> char {
    match token {
        Token::RBracket => ']',
        _ => ')',
    }
}

#[cfg(test)]
mod tests {
    use crate::{ast::Expr, error::ParseError, interpreter::parser::core::parse_single};

    fn shape(source: &str) -> Vec<usize> {
        match parse_single(source).unwrap() {
            Expr::Matrix { rows, .. } => rows.iter().map(Vec::len).collect(),
            other => panic!("expected a matrix literal, found {other:?}"),
        }
    }

    #[test]
    fn rows_and_columns() {
        assert_eq!(shape("[1, 2, 3; 4, 5, 6]"), vec![3, 3]);
        assert_eq!(shape("[ ]"), Vec::<usize>::new());
        assert_eq!(shape("[1; [2; 3]]"), vec![1, 1]);
    }

    #[test]
    fn newlines_separate_rows() {
        assert_eq!(shape("[1, 2\n 3, 4\n]"), vec![2, 2]);
        assert_eq!(shape("[1,\n 2]"), vec![2]);
    }

    #[test]
    fn unclosed_matrix() {
        assert_eq!(parse_single("[1, 2").unwrap_err(),
                   ParseError::UnmatchedBracket { expected: ']',
                                                  position: 0, });
    }

    #[test]
    fn unclosed_argument_list() {
        assert!(matches!(parse_single("f(1, 2"),
                         Err(ParseError::UnmatchedBracket { expected: ')', position: 1 })));
    }
}
