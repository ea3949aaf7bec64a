use std::fmt::Display;

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5`, `2` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Double-quoted string literals. Escapes are not interpreted.
    #[regex(r#""[^"\n]*""#, |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    })]
    Str(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `function`
    #[token("function")]
    Function,
    /// `in`
    #[token("in")]
    In,
    /// Identifier tokens; variable, function or unit names such as `x`,
    /// `sqrt` or `cm`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `'`
    #[token("'")]
    Apostrophe,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// Line breaks separate statements, and rows inside matrix literals.
    #[token("\n")]
    NewLine,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Function => write!(f, "function"),
            Self::In => write!(f, "in"),
            Self::Comment => Ok(()),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Caret => write!(f, "^"),
            Self::Apostrophe => write!(f, "'"),
            Self::Bang => write!(f, "!"),
            Self::Equals => write!(f, "="),
            Self::EqualEqual => write!(f, "=="),
            Self::BangEqual => write!(f, "!="),
            Self::LessEqual => write!(f, "<="),
            Self::GreaterEqual => write!(f, ">="),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
            Self::Colon => write!(f, ":"),
            Self::Comma => write!(f, ","),
            Self::Semicolon => write!(f, ";"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::NewLine => write!(f, "newline"),
        }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the token slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Splits `source` into tokens paired with their byte offsets.
///
/// # Errors
/// Returns [`ParseError::InvalidCharacter`] at the first character that
/// starts no token.
///
/// # Example
/// ```
/// use unitmath::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("5cm + 2").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Number(5.0), 0),
///                 (Token::Identifier("cm".to_string()), 1),
///                 (Token::Plus, 4),
///                 (Token::Number(2.0), 6)]);
///
/// assert!(tokenize("2 # 3").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = lexer.span().start;
        if let Ok(tok) = token {
            tokens.push((tok, position));
        } else {
            let character = lexer.slice().chars().next().unwrap_or('\0');
            return Err(ParseError::InvalidCharacter { character, position });
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn keywords_only_match_whole_words() {
        assert_eq!(kinds("in inch"), vec![Token::In, Token::Identifier("inch".to_string())]);
        assert_eq!(kinds("function functions"),
                   vec![Token::Function, Token::Identifier("functions".to_string())]);
    }

    #[test]
    fn numbers_in_all_notations() {
        assert_eq!(kinds("1 2.5 .5 1e3 2.5E-2"),
                   vec![Token::Number(1.0),
                        Token::Number(2.5),
                        Token::Number(0.5),
                        Token::Number(1000.0),
                        Token::Number(0.025)]);
    }

    #[test]
    fn comments_are_skipped_but_newlines_kept() {
        assert_eq!(kinds("1 // one\n2"),
                   vec![Token::Number(1.0), Token::NewLine, Token::Number(2.0)]);
    }

    #[test]
    fn invalid_character_reports_offset() {
        assert_eq!(tokenize("1 + $").unwrap_err(),
                   ParseError::InvalidCharacter { character: '$',
                                                  position:  4, });
    }

    #[test]
    fn operators_prefer_longest_match() {
        assert_eq!(kinds("a' != b!"),
                   vec![Token::Identifier("a".to_string()),
                        Token::Apostrophe,
                        Token::BangEqual,
                        Token::Identifier("b".to_string()),
                        Token::Bang]);
        assert_eq!(kinds("\"text\""), vec![Token::Str("text".to_string())]);
    }
}
