use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{parse_arguments, parse_matrix_literal},
        },
        units::find_unit,
        value::{complex::ComplexNumber, unit::UnitValue},
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `-` (negation) and `+` (identity).
/// Unary operators are right-associative and bind looser than `^`, so `-3^2`
/// is parsed as `-(3^2)`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+") unary
///            | power
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a power expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Plus, _)) => UnaryOperator::Plus,
        _ => return parse_power(tokens),
    };
    let Some((_, position)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { position: 0 });
    };
    let expr = parse_unary(tokens)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       position: *position })
}

/// Parses exponentiation.
///
/// The exponent is itself a unary expression, which makes `^`
/// right-associative (`a ^ b ^ c` is `a ^ (b ^ c)`) and allows `2 ^ -1`.
///
/// Grammar: `power := postfix ("^" unary)?`
fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_postfix(tokens)?;
    if let Some((Token::Caret, position)) = tokens.peek() {
        tokens.next();
        let exponent = parse_unary(tokens)?;
        return Ok(Expr::BinaryOp { left:     Box::new(base),
                                   op:       BinaryOperator::Pow,
                                   right:    Box::new(exponent),
                                   position: *position, });
    }
    Ok(base)
}

/// Parses a primary expression and the postfix operators applied to it.
///
/// Postfix operators bind tighter than `^` and may be chained in any order:
///
/// 1. **Factorial** `expr!`
/// 2. **Transpose** `expr'`
/// 3. **Unit conversion** `expr in unit`
/// 4. **Indexing** `expr(i)` or `expr(i, j)`, for expressions other than a
///    plain name (`name(...)` is parsed as a call by [`parse_primary`]).
///
/// Grammar:
/// ```text
///     postfix := primary ("!" | "'" | "in" IDENTIFIER | "(" arguments ")")*
/// ```
///
/// # Errors
/// - `UnknownUnit` if the name after `in` is not a unit.
/// - `UnmatchedBracket` if an index list is not closed.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut node = parse_primary(tokens)?;
    loop {
        match tokens.peek() {
            Some((Token::Bang, position)) => {
                tokens.next();
                node = Expr::UnaryOp { op:       UnaryOperator::Factorial,
                                       expr:     Box::new(node),
                                       position: *position, };
            },
            Some((Token::Apostrophe, position)) => {
                tokens.next();
                node = Expr::UnaryOp { op:       UnaryOperator::Transpose,
                                       expr:     Box::new(node),
                                       position: *position, };
            },
            Some((Token::In, position)) => {
                tokens.next();
                let (unit, prefix) = match tokens.next() {
                    Some((Token::Identifier(name), name_position)) => {
                        find_unit(name).ok_or_else(|| ParseError::UnknownUnit { name:     name.clone(),
                                                                                position: *name_position, })?
                    },
                    Some((tok, position)) => {
                        return Err(ParseError::UnexpectedToken { token:    format!("expected unit after 'in', found {tok}"),
                                                                 position: *position, });
                    },
                    None => return Err(ParseError::UnexpectedEndOfInput { position: 0 }),
                };
                node = Expr::Conversion { expr: Box::new(node),
                                          unit,
                                          prefix,
                                          position: *position };
            },
            Some((Token::LParen, position)) => {
                tokens.next();
                let indices = parse_arguments(tokens, *position)?;
                node = Expr::Index { target: Box::new(node),
                                     indices,
                                     position: *position };
            },
            _ => break,
        }
    }
    Ok(node)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, imaginary, unit, string and boolean literals
/// - identifiers and calls
/// - parenthesized expressions
/// - matrix literals (`[ ... ]`)
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier_or_call
///              | "(" expression ")"
///              | "[" rows "]"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { position: 0 })?;

    match peeked {
        (Token::Number(_), _) => parse_number(tokens),
        (Token::Str(_) | Token::Bool(_), _) => parse_literal(tokens),
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::LBracket, _) => parse_matrix_literal(tokens),
        (Token::Identifier(_), _) => parse_identifier_or_call(tokens),
        (tok, position) => Err(ParseError::UnexpectedToken { token:    tok.to_string(),
                                                             position: *position, }),
    }
}

/// Parses a numeric literal and an optional suffix.
///
/// Supported forms:
/// - a plain number: `4.5`
/// - an imaginary number: `3i`, `2 j`
/// - a unit literal: `5cm`, `2 inch`
///
/// Whitespace between the number and the suffix is irrelevant. Any other
/// identifier following a number is rejected.
///
/// Grammar (simplified):
/// ```text
///     number := NUMBER ("i" | "j" | UNIT)?
/// ```
///
/// # Errors
/// Returns `UnexpectedToken` if the number is followed by an identifier that
/// is neither an imaginary suffix nor a unit.
fn parse_number<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Number(n), position)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { position: 0 });
    };
    let value = match tokens.peek() {
        Some((Token::Identifier(id), _)) if id == "i" || id == "j" => {
            tokens.next();
            LiteralValue::Complex(ComplexNumber::new(0.0, *n))
        },
        Some((Token::Identifier(id), id_position)) => {
            let (unit, prefix) = find_unit(id).ok_or_else(|| ParseError::UnexpectedToken { token:    id.clone(),
                                                                                            position: *id_position, })?;
            tokens.next();
            LiteralValue::Unit(UnitValue::new(*n, unit, prefix))
        },
        _ => LiteralValue::Number(*n),
    };
    Ok(Expr::Literal { value,
                       position: *position })
}

/// Parses a string or boolean literal.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Str(s), position)) => Ok(Expr::Literal { value:    LiteralValue::String(s.clone()),
                                                              position: *position, }),
        Some((Token::Bool(b), position)) => Ok(Expr::Literal { value:    (*b).into(),
                                                               position: *position, }),
        Some((tok, position)) => Err(ParseError::UnexpectedToken { token:    tok.to_string(),
                                                                   position: *position, }),
        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

/// Parses a parenthesized expression `( expression )`.
///
/// # Errors
/// Returns `UnmatchedBracket` pointing at the opening parenthesis if the
/// closing one is missing.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((_, open)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { position: 0 });
    };
    let expr = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        Some((tok, position)) => Err(ParseError::UnexpectedToken { token:    format!("expected ')', found {tok}"),
                                                                   position: *position, }),
        None => Err(ParseError::UnmatchedBracket { expected: ')',
                                                   position: *open, }),
    }
}

/// Parses a name, or a call when the name is directly followed by `(`.
///
/// Whether `name(args)` calls a function or indexes a variable is decided
/// at evaluation time.
///
/// Grammar:
/// ```text
///     identifier_or_call := IDENTIFIER ("(" arguments ")")?
/// ```
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Identifier(name), position)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { position: 0 });
    };

    if let Some((Token::LParen, open)) = tokens.peek() {
        tokens.next();
        let arguments = parse_arguments(tokens, *open)?;
        return Ok(Expr::Call { name: name.clone(),
                               arguments,
                               position: *position });
    }

    Ok(Expr::Variable { name:     name.clone(),
                        position: *position, })
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{Expr, LiteralValue, UnaryOperator},
        error::ParseError,
        interpreter::parser::core::parse_single,
    };

    #[test]
    fn number_suffixes() {
        assert!(matches!(parse_single("2i").unwrap(),
                         Expr::Literal { value: LiteralValue::Complex(_), .. }));
        assert!(matches!(parse_single("5 cm").unwrap(),
                         Expr::Literal { value: LiteralValue::Unit(_), .. }));
        assert!(matches!(parse_single("2 x"),
                         Err(ParseError::UnexpectedToken { position: 2, .. })));
    }

    #[test]
    fn postfix_operators_stack() {
        let Expr::UnaryOp { op, expr, .. } = parse_single("a'!").unwrap() else {
            panic!("expected a unary operation");
        };
        assert_eq!(op, UnaryOperator::Factorial);
        assert!(matches!(*expr, Expr::UnaryOp { op: UnaryOperator::Transpose, .. }));
    }

    #[test]
    fn conversion_binds_to_the_nearest_operand() {
        let Expr::BinaryOp { right, .. } = parse_single("5.08 cm * 1000 in inch").unwrap() else {
            panic!("expected a binary operation");
        };
        assert!(matches!(*right, Expr::Conversion { .. }));
        assert!(matches!(parse_single("(5.08 cm * 1000) in inch").unwrap(),
                         Expr::Conversion { .. }));
    }

    #[test]
    fn unknown_conversion_target() {
        assert!(matches!(parse_single("5 cm in parsec"),
                         Err(ParseError::UnknownUnit { .. })));
    }

    #[test]
    fn index_after_non_identifier() {
        assert!(matches!(parse_single("[1, 2, 3](2)").unwrap(), Expr::Index { .. }));
        assert!(matches!(parse_single("f(1)(2)").unwrap(), Expr::Index { .. }));
        assert!(matches!(parse_single("f(1)").unwrap(), Expr::Call { .. }));
    }

    #[test]
    fn unclosed_group() {
        assert!(matches!(parse_single("(1 + 2"),
                         Err(ParseError::UnmatchedBracket { expected: ')', position: 0 })));
    }
}
