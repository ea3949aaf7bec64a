use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses relational and equality operators.
///
/// Handles the left-associative comparison operators
/// `<`, `>`, `<=`, `>=`, `==` and `!=`. Comparison binds looser than the range
/// operator, so `1:3 == 1:3` compares two ranges.
///
/// The rule is: `comparison := range (("==" | "!=" | "<" | ">" | "<=" | ">=")
/// range)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_range(tokens)?;
    while let Some((token, position)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && op.is_comparison()
    {
        tokens.next();
        let right = parse_range(tokens)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                position: *position };
    }
    Ok(left)
}

/// Parses a range expression.
///
/// `a:b` yields the inclusive range from `a` to `b` with step one and
/// `a:s:b` one with step `s`. A third colon is not part of the grammar.
///
/// The rule is: `range := additive (":" additive (":" additive)?)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An `Expr::Range`, or the additive expression when no `:` follows.
pub fn parse_range<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let start = parse_additive(tokens)?;
    let Some((Token::Colon, position)) = tokens.peek() else {
        return Ok(start);
    };
    tokens.next();
    let second = parse_additive(tokens)?;

    if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        let end = parse_additive(tokens)?;
        return Ok(Expr::Range { start:    Box::new(start),
                                step:     Some(Box::new(second)),
                                end:      Box::new(end),
                                position: *position, });
    }

    Ok(Expr::Range { start:    Box::new(start),
                     step:     None,
                     end:      Box::new(second),
                     position: *position, })
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    position: *position };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles the left-associative operators `*` and `/`. Their operands are
/// unary expressions, so `2 * -3` is accepted.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens)?;
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            tokens.next();
            let right = parse_unary(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    position: *position };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to the binary operator it spells, if any.
///
/// `^` is included even though exponentiation is parsed below the unary
/// level.
pub(in crate::interpreter::parser) const fn token_to_binary_operator(token: &Token)
                                                                     -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{BinaryOperator, Expr, UnaryOperator},
        interpreter::parser::core::parse_single,
    };

    fn top_operator(source: &str) -> BinaryOperator {
        match parse_single(source).unwrap() {
            Expr::BinaryOp { op, .. } => op,
            other => panic!("expected a binary operation, found {other:?}"),
        }
    }

    #[test]
    fn additive_is_left_associative() {
        let Expr::BinaryOp { left, op, .. } = parse_single("4 - 2 + 3").unwrap() else {
            panic!("expected a binary operation");
        };
        assert_eq!(op, BinaryOperator::Add);
        assert!(matches!(*left, Expr::BinaryOp { op: BinaryOperator::Sub, .. }));
    }

    #[test]
    fn power_is_right_associative() {
        let Expr::BinaryOp { left, right, .. } = parse_single("2^3^4").unwrap() else {
            panic!("expected a binary operation");
        };
        assert!(matches!(*left, Expr::Literal { .. }));
        assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Pow, .. }));
    }

    #[test]
    fn negation_binds_looser_than_power() {
        let expr = parse_single("-3^2").unwrap();
        assert!(matches!(expr, Expr::UnaryOp { op: UnaryOperator::Negate, .. }));
    }

    #[test]
    fn comparison_binds_looser_than_range() {
        assert_eq!(top_operator("1:3 == 1:3"), BinaryOperator::Equal);
        assert!(matches!(parse_single("1:2+3").unwrap(), Expr::Range { step: None, .. }));
    }

    #[test]
    fn range_with_step() {
        let Expr::Range { step, .. } = parse_single("10:-2:2").unwrap() else {
            panic!("expected a range");
        };
        assert!(step.is_some());
    }
}
