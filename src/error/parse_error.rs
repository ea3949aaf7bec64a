/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant records the byte offset of the offending input so that a
/// host can point at the failing location. [`ParseError::InvalidCharacter`]
/// is raised by the lexer; all other variants are grammar violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The lexer met a character that starts no token.
    #[error("Error at position {position}: Invalid character '{character}'.")]
    InvalidCharacter {
        /// The character that could not be tokenized.
        character: char,
        /// Byte offset of the character.
        position:  usize,
    },
    /// Found an unexpected token while parsing.
    #[error("Error at position {position}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered, or a description of what was expected.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error at position {position}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Byte offset where more input was expected.
        position: usize,
    },
    /// An opening bracket or parenthesis was never closed.
    #[error("Error at position {position}: Expected closing '{expected}' but none found.")]
    UnmatchedBracket {
        /// The closing delimiter that was expected.
        expected: char,
        /// Byte offset of the opening delimiter.
        position: usize,
    },
    /// The left-hand side of `=` is neither a name nor an indexed name.
    #[error("Error at position {position}: Invalid assignment target. Example: a = 2 or a(1, 2) = 3")]
    InvalidAssignmentTarget {
        /// Byte offset of the `=` token.
        position: usize,
    },
    /// The function definition syntax was invalid.
    #[error("Error at position {position}: Invalid function definition syntax. Example: function f(x) = x * x")]
    InvalidFunctionDefinition {
        /// Byte offset of the `function` keyword.
        position: usize,
    },
    /// The name after `in` is not a known unit.
    #[error("Error at position {position}: Unknown unit '{name}'.")]
    UnknownUnit {
        /// The unit name.
        name:     String,
        /// Byte offset of the unit name.
        position: usize,
    },
    /// Found extra tokens after a complete statement.
    #[error("Error at position {position}: Extra tokens after expression. Check your input: {token}")]
    UnexpectedTrailingTokens {
        /// The extra token.
        token:    String,
        /// Byte offset of the extra token.
        position: usize,
    },
}

impl ParseError {
    /// Returns the byte offset the error points at.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::InvalidCharacter { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::UnmatchedBracket { position, .. }
            | Self::InvalidAssignmentTarget { position }
            | Self::InvalidFunctionDefinition { position }
            | Self::UnknownUnit { position, .. }
            | Self::UnexpectedTrailingTokens { position, .. } => *position,
        }
    }

    /// Points an [`ParseError::UnexpectedEndOfInput`] at the end of the
    /// source. The token parsers do not know the input length, so they
    /// report end-of-input at offset zero and the entry point fixes it up.
    #[must_use]
    pub fn at_end_of(self, source_len: usize) -> Self {
        match self {
            Self::UnexpectedEndOfInput { .. } => Self::UnexpectedEndOfInput { position: source_len },
            other => other,
        }
    }
}
