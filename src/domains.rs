//! Number domains.
//!
//! - [RationalNumber](rational::RationalNumber) is an exact fraction of two
//!   arbitrary-precision integers.
//! - The [float] module converts between rational numbers and `f64` without loss.
pub mod float;
pub mod rational;
