/// Elementary numeric functions.
///
/// Trigonometry, logarithms, rounding and the complex-number accessors. All
/// of them map element-wise over matrices and ranges.
pub mod builtin;

/// Integer and operator-style functions.
///
/// `gcd`, `lcm`, `factorial` and the named forms of the arithmetic and
/// comparison operators (`add`, `equal`, `unequal`, ...).
pub mod arithmetic;

/// Matrix construction and decomposition.
///
/// `size`, `transpose`, `zeros`, `ones`, `eye`, `lu` and `det`.
pub mod matrix;

/// Function call resolution and the built-in function table.
pub mod core;
