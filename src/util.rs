/// Numeric conversion and formatting helpers.
///
/// This module provides safe functions for converting between `f64` and the
/// integer types used for indices, exponents and integer-domain functions
/// without silent truncation, plus the shared number formatter used by every
/// `Display` implementation of the value model.
///
/// Conversions return a `Result` that is `Ok` only if the conversion is
/// lossless and the value lies in the accepted domain.
pub mod num;
