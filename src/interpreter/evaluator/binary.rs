/// Operator dispatch over the value kinds.
///
/// Decides which rule applies to a pair of operands, in a fixed order.
pub mod core;

/// Number, complex and string operands.
pub mod scalar;

/// Unit operands, alone or combined with numbers.
pub mod unit;

/// Element-wise evaluation over matrices and ranges.
pub mod elementwise;

/// Matrix product.
pub mod matmul;

/// Exponentiation of numbers, complex numbers and square matrices.
pub mod power;

/// Relational and equality operators.
pub mod comparison;
