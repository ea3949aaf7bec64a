/// Complex number support.
///
/// Defines the `ComplexNumber` type used for arithmetic with real and imaginary
/// parts, together with the elementary functions the built-in library needs
/// on the complex plane.
pub mod complex;
/// Dense matrix representation.
///
/// Defines the row-major `Matrix` used for matrix literals, expanded ranges
/// and every matrix-valued built-in. Provides block concatenation, transpose
/// and the zero-filling growth used by indexed writes.
pub mod matrix;
/// Lazy numeric ranges (`start:step:end`).
pub mod range;
/// Values carrying a physical unit.
///
/// Defines `UnitValue`, the magnitude-plus-unit pair produced by unit
/// literals such as `5 cm` and by unit arithmetic.
pub mod unit;

/// The `Value` enum and its conversions.
pub mod core;
