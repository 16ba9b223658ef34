//! Methods for linear algebra over exact rational numbers.

pub mod matrix;
