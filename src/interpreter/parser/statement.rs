use std::iter::Peekable;

use crate::{
    ast::{Expr, FunctionDef},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a function definition (`function f(x) = ...`),
/// - an assignment (`a = ...` or `a(i, j) = ...`),
/// - an expression used as a statement.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, position)` pairs.
///
/// # Returns
/// The parsed statement as an [`Expr`].
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Function, position)) = tokens.peek() {
        tokens.next();
        return parse_function_definition(tokens, *position);
    }
    parse_assignment(tokens)
}

/// Parses an expression that may be the target of `=`.
///
/// The left-hand side is parsed as an ordinary expression first and then
/// checked: only a plain name or a name with one or two indices can be
/// assigned. Assignment is right-associative, so `a = b = 2` assigns both.
///
/// Grammar:
/// ```text
///     assignment := expression ("=" assignment)?
/// ```
///
/// # Errors
/// Returns `InvalidAssignmentTarget` at the `=` token if the left-hand side
/// cannot be assigned.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let target = parse_expression(tokens)?;

    let Some((Token::Equals, equals)) = tokens.peek() else {
        return Ok(target);
    };
    tokens.next();
    let value = Box::new(parse_assignment(tokens)?);

    match target {
        Expr::Variable { name, position } => Ok(Expr::Assignment { name,
                                                                   indices: None,
                                                                   value,
                                                                   position }),
        Expr::Call { name,
                     arguments,
                     position, }
            if (1..=2).contains(&arguments.len()) =>
        {
            Ok(Expr::Assignment { name,
                                  indices: Some(arguments),
                                  value,
                                  position })
        },
        _ => Err(ParseError::InvalidAssignmentTarget { position: *equals }),
    }
}

/// Parses the rest of a function definition after the `function` keyword.
///
/// Syntax:
/// ```text
///     function <identifier> "(" <identifier> ("," <identifier>)* ")" "=" <expression>
/// ```
///
/// # Errors
/// Returns `InvalidFunctionDefinition` pointing at the `function` keyword if
/// the name, the parameter list or the `=` is malformed. Errors inside the
/// body are reported as they are.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>, position: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let invalid = |_| ParseError::InvalidFunctionDefinition { position };

    let name = parse_identifier(tokens).map_err(invalid)?;
    let open = match tokens.next() {
        Some((Token::LParen, open)) => *open,
        _ => return Err(ParseError::InvalidFunctionDefinition { position }),
    };
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen, open).map_err(invalid)?;
    match tokens.next() {
        Some((Token::Equals, _)) => {},
        _ => return Err(ParseError::InvalidFunctionDefinition { position }),
    }
    let body = parse_expression(tokens)?;

    Ok(Expr::FunctionDefinition(FunctionDef { name,
                                              params,
                                              body: Box::new(body),
                                              position }))
}

#[cfg(test)]
mod tests {
    use crate::{ast::Expr, error::ParseError, interpreter::parser::core::parse_single};

    #[test]
    fn assignment_targets() {
        assert!(matches!(parse_single("a = 0.75").unwrap(),
                         Expr::Assignment { indices: None, .. }));
        assert!(matches!(parse_single("a(2:3, 2:3) = [10, 11; 12, 13]").unwrap(),
                         Expr::Assignment { indices: Some(ref i), .. } if i.len() == 2));
        assert!(matches!(parse_single("a = b = 2").unwrap(),
                         Expr::Assignment { ref value, .. } if matches!(**value, Expr::Assignment { .. })));
    }

    #[test]
    fn invalid_assignment_targets() {
        assert_eq!(parse_single("2 = 3").unwrap_err(),
                   ParseError::InvalidAssignmentTarget { position: 2 });
        assert!(parse_single("a() = 3").is_err());
        assert!(parse_single("a(1, 2, 3) = 3").is_err());
    }

    #[test]
    fn function_definitions() {
        let Expr::FunctionDefinition(def) = parse_single("function f(x, y) = x * y").unwrap() else {
            panic!("expected a function definition");
        };
        assert_eq!(def.signature(), "f(x,y)");

        assert!(matches!(parse_single("function f x = x"),
                         Err(ParseError::InvalidFunctionDefinition { position: 0 })));
        assert!(matches!(parse_single("function f(1) = 1"),
                         Err(ParseError::InvalidFunctionDefinition { .. })));
        assert!(matches!(parse_single("function f(x) x"),
                         Err(ParseError::InvalidFunctionDefinition { .. })));
    }
}
