/// Represents all errors that can occur during evaluation.
///
/// Errors are raised at the point of detection and unwind the current
/// statement. Each variant carries the byte offset of the expression node
/// that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Tried to read a name that is bound to nothing.
    #[error("Error at position {position}: Undefined symbol {name}.")]
    UndefinedSymbol {
        /// The name of the symbol.
        name:     String,
        /// Byte offset of the reference.
        position: usize,
    },
    /// Attempted to mutate a read-only scope.
    #[error("Error at position {position}: Cannot {operation} '{name}': scope is read-only.")]
    ReadOnly {
        /// The attempted mutation, e.g. `assign` or `define function`.
        operation: &'static str,
        /// The name that would have been mutated.
        name:      String,
        /// Byte offset of the mutating expression.
        position:  usize,
    },
    /// An operator was applied to a combination of kinds it does not handle.
    #[error("Error at position {position}: Unsupported type of arguments in '{operator}' ({left}, {right}).")]
    UnsupportedType {
        /// The operator or function name.
        operator: String,
        /// Runtime kind of the left (or only) operand.
        left:     &'static str,
        /// Runtime kind of the right operand.
        right:    &'static str,
        /// Byte offset of the operation.
        position: usize,
    },
    /// A function received an argument of a kind it does not handle.
    #[error("Error at position {position}: Unexpected type of argument in function {function} ({kind}).")]
    UnsupportedArgument {
        /// The function name.
        function: String,
        /// Runtime kind of the offending argument.
        kind:     &'static str,
        /// Byte offset of the call.
        position: usize,
    },
    /// Two units with different base dimensions were combined.
    #[error("Error at position {position}: Cannot combine units with different base ({left} and {right}).")]
    IncompatibleUnits {
        /// Display name of the left unit.
        left:     String,
        /// Display name of the right unit.
        right:    String,
        /// Byte offset of the operation.
        position: usize,
    },
    /// An integer-domain function received a fractional value.
    #[error("Error at position {position}: Parameters in function {function} must be integer numbers, found {value}.")]
    NonIntegerArgument {
        /// The function or operator name.
        function: String,
        /// Display form of the offending value.
        value:    String,
        /// Byte offset of the call.
        position: usize,
    },
    /// Matrix shapes are incompatible for the requested operation.
    #[error("Error at position {position}: Dimension mismatch: {details}.")]
    DimensionMismatch {
        /// Description of the shapes involved.
        details:  String,
        /// Byte offset of the operation.
        position: usize,
    },
    /// A value lies outside the domain accepted by an algorithm.
    #[error("Error at position {position}: {details}.")]
    Range {
        /// Description of the violated precondition.
        details:  String,
        /// Byte offset of the call.
        position: usize,
    },
    /// A function was called with the wrong number of arguments.
    #[error("Error at position {position}: Function {name} expects {expected} arguments, found {found}.")]
    ArgumentCount {
        /// The function name.
        name:     String,
        /// Human readable description of the accepted arity.
        expected: String,
        /// Number of arguments supplied.
        found:    usize,
        /// Byte offset of the call.
        position: usize,
    },
    /// Tried to read a matrix element outside the allowed bounds.
    #[error("Error at position {position}: Index out of range. Valid indices are 1 to {max}, but found {found}.")]
    IndexOutOfBounds {
        /// The largest valid index (1-based).
        max:      usize,
        /// The index that was actually requested.
        found:    i64,
        /// Byte offset of the index expression.
        position: usize,
    },
    /// An `assert` call received `false`.
    #[error("Error at position {position}: Assertion failed.")]
    AssertionFailed {
        /// Byte offset of the call.
        position: usize,
    },
}

impl RuntimeError {
    /// Returns the byte offset the error points at.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UndefinedSymbol { position, .. }
            | Self::ReadOnly { position, .. }
            | Self::UnsupportedType { position, .. }
            | Self::UnsupportedArgument { position, .. }
            | Self::IncompatibleUnits { position, .. }
            | Self::NonIntegerArgument { position, .. }
            | Self::DimensionMismatch { position, .. }
            | Self::Range { position, .. }
            | Self::ArgumentCount { position, .. }
            | Self::IndexOutOfBounds { position, .. }
            | Self::AssertionFailed { position } => *position,
        }
    }
}
