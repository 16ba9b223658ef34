//! Ratmat provides exact rational numbers and square matrices over them.
//!
//! Every operation is carried out on arbitrary-precision fractions, so determinants,
//! inverses and matrix powers are free of rounding errors.
//!
//! For example:
//!
//! ```
//! use ratmat::{domains::rational::RationalNumber, tensors::matrix::RationalMatrix};
//!
//! let a = RationalMatrix::from_grid(&[[2, 1], [7, 4]]).unwrap();
//! let inv = a.inverse();
//! assert_eq!(a.checked_mul(&inv).unwrap(), RationalMatrix::identity(2));
//!
//! let third: RationalNumber = "1/3".parse().unwrap();
//! assert_eq!(third.to_f64(), 1. / 3.);
//! ```
//!
//! Library code reports its decisions through [tracing] at the `debug` and `trace`
//! levels; install a subscriber to see them.

pub mod domains;
pub mod printer;
pub mod tensors;
