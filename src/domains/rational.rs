use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    iter::{Product, Sum},
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
};

use rand::Rng;
use rug::{ops::Pow, Integer};

use crate::printer::{PrintOptions, RationalPrinter};

/// Errors that can occur when operating on rational numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RationalError {
    /// A nonzero rational number was divided by zero.
    DivisionByZero,
    /// The input could not be parsed as a rational number.
    Parse { input: String, reason: String },
    /// The argument has no rational counterpart, for example an infinite float.
    InvalidArgument(String),
}

impl Display for RationalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RationalError::DivisionByZero => write!(f, "Division by zero"),
            RationalError::Parse { input, reason } => {
                write!(f, "Could not parse '{}' as a rational number: {}", input, reason)
            }
            RationalError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for RationalError {}

/// An exact rational number with arbitrary-precision numerator and denominator.
///
/// Nonzero values are always kept in lowest terms with a positive denominator.
/// A value with a zero numerator is stored exactly as constructed, so `0/5` keeps its
/// denominator. A nonzero numerator over a zero denominator is the not-a-number value,
/// which is what the reciprocal of zero produces.
///
/// Equality and ordering follow the sign of the cross product `a.n * b.d - b.n * a.d`,
/// so `0/5 == 0/1`.
#[derive(Clone, Debug)]
pub struct RationalNumber {
    numerator: Integer,
    denominator: Integer,
}

impl RationalNumber {
    /// Create a new rational number `numerator/denominator` in lowest terms.
    pub fn new(numerator: impl Into<Integer>, denominator: impl Into<Integer>) -> RationalNumber {
        let (mut numerator, mut denominator) = (numerator.into(), denominator.into());

        if numerator != 0 {
            let g = Integer::from(numerator.gcd_ref(&denominator));
            if g != 1 {
                numerator.div_exact_mut(&g);
                denominator.div_exact_mut(&g);
            }

            if denominator < 0 {
                numerator = -numerator;
                denominator = -denominator;
            }
        }

        RationalNumber {
            numerator,
            denominator,
        }
    }

    /// Create a rational number without normalizing it. The caller
    /// guarantees that `numerator/denominator` is already in lowest terms.
    pub(crate) fn from_unchecked(numerator: Integer, denominator: Integer) -> RationalNumber {
        RationalNumber {
            numerator,
            denominator,
        }
    }

    pub fn zero() -> RationalNumber {
        RationalNumber {
            numerator: Integer::new(),
            denominator: Integer::from(1),
        }
    }

    pub fn one() -> RationalNumber {
        RationalNumber {
            numerator: Integer::from(1),
            denominator: Integer::from(1),
        }
    }

    /// The not-a-number value `1/0`.
    pub fn nan() -> RationalNumber {
        RationalNumber {
            numerator: Integer::from(1),
            denominator: Integer::new(),
        }
    }

    pub fn numerator(&self) -> Integer {
        self.numerator.clone()
    }

    pub fn denominator(&self) -> Integer {
        self.denominator.clone()
    }

    pub fn numerator_ref(&self) -> &Integer {
        &self.numerator
    }

    pub fn denominator_ref(&self) -> &Integer {
        &self.denominator
    }

    pub fn into_numer_denom(self) -> (Integer, Integer) {
        (self.numerator, self.denominator)
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn is_one(&self) -> bool {
        self.numerator == 1 && self.denominator == 1
    }

    pub fn is_nan(&self) -> bool {
        self.numerator != 0 && self.denominator == 0
    }

    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    /// Return `-1`, `0` or `1` depending on the sign of the number.
    pub fn signum(&self) -> i32 {
        match self.numerator.cmp0() {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub fn abs(&self) -> RationalNumber {
        RationalNumber::new(
            Integer::from(self.numerator.abs_ref()),
            Integer::from(self.denominator.abs_ref()),
        )
    }

    /// Compute the reciprocal. The reciprocal of zero is not-a-number.
    pub fn inv(&self) -> RationalNumber {
        RationalNumber::new(self.denominator.clone(), self.numerator.clone())
    }

    /// Divide `self` by `other`.
    ///
    /// Zero divided by anything, including zero, is zero. Any other number
    /// divided by zero yields [RationalError::DivisionByZero].
    pub fn checked_div(&self, other: &RationalNumber) -> Result<RationalNumber, RationalError> {
        if self.is_zero() {
            return Ok(RationalNumber::zero());
        }

        if other.is_zero() {
            return Err(RationalError::DivisionByZero);
        }

        Ok(RationalNumber::new(
            Integer::from(&self.numerator * &other.denominator),
            Integer::from(&self.denominator * &other.numerator),
        ))
    }

    /// Raise the number to the power `e`. A negative power raises the reciprocal.
    pub fn pow(&self, e: i32) -> RationalNumber {
        match e.cmp(&0) {
            Ordering::Greater => {
                // powers of a number in lowest terms are in lowest terms
                let e = e as u32;
                RationalNumber::from_unchecked(
                    self.numerator.clone().pow(e),
                    self.denominator.clone().pow(e),
                )
            }
            Ordering::Equal => RationalNumber::one(),
            Ordering::Less => {
                let inv = self.inv();
                let e = e.unsigned_abs();
                RationalNumber::from_unchecked(
                    inv.numerator.pow(e),
                    inv.denominator.pow(e),
                )
            }
        }
    }

    /// Compare two rational numbers by the sign of `self.n * other.d - other.n * self.d`.
    pub fn compare(&self, other: &RationalNumber) -> Ordering {
        if self.denominator == other.denominator && self.denominator != 0 {
            return self.numerator.cmp(&other.numerator);
        }

        let a = Integer::from(&self.numerator * &other.denominator);
        let b = Integer::from(&other.numerator * &self.denominator);
        a.cmp(&b)
    }

    /// Sample a random rational number with numerator in `range` and a
    /// positive denominator no larger than the magnitude of the range bounds.
    pub fn sample(rng: &mut impl rand::RngCore, range: (i64, i64)) -> RationalNumber {
        let numerator = rng.gen_range(range.0..range.1);
        let max_den = range.0.unsigned_abs().max(range.1.unsigned_abs()).max(1);
        let denominator = rng.gen_range(1..=max_den);
        RationalNumber::new(numerator, denominator)
    }

    /// Convert to a multi-precision rational. Returns `None` for values with a zero denominator.
    pub fn to_multi_prec(&self) -> Option<rug::Rational> {
        if self.denominator == 0 {
            return None;
        }

        Some(rug::Rational::from((
            self.numerator.clone(),
            self.denominator.clone(),
        )))
    }

    /// Create a printer for the number with custom print options.
    pub fn printer(&self, opts: PrintOptions) -> RationalPrinter<'_> {
        RationalPrinter::new_with_options(self, opts)
    }
}

impl Default for RationalNumber {
    fn default() -> Self {
        RationalNumber::zero()
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RationalNumber {
                #[inline]
                fn from(value: $t) -> Self {
                    RationalNumber {
                        numerator: value.into(),
                        denominator: Integer::from(1),
                    }
                }
            }
        )*
    };
}

impl_from_primitive!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<Integer> for RationalNumber {
    fn from(value: Integer) -> Self {
        RationalNumber {
            numerator: value,
            denominator: Integer::from(1),
        }
    }
}

impl From<&Integer> for RationalNumber {
    fn from(value: &Integer) -> Self {
        RationalNumber {
            numerator: value.clone(),
            denominator: Integer::from(1),
        }
    }
}

impl<T: Into<Integer>> From<(T, T)> for RationalNumber {
    #[inline]
    fn from((num, den): (T, T)) -> Self {
        RationalNumber::new(num, den)
    }
}

impl From<rug::Rational> for RationalNumber {
    fn from(value: rug::Rational) -> Self {
        let (num, den) = value.into_numer_denom();
        RationalNumber::from_unchecked(num, den)
    }
}

fn parse_integer(input: &str, part: &str) -> Result<Integer, RationalError> {
    part.trim()
        .parse::<Integer>()
        .map_err(|e| RationalError::Parse {
            input: input.to_owned(),
            reason: e.to_string(),
        })
}

impl FromStr for RationalNumber {
    type Err = RationalError;

    /// Parse an integer `n`, a fraction `n/d` or a decimal number containing a `.`.
    /// Decimal numbers go through `f64` and are therefore limited to double precision.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.find('/') {
            Some(index) if index > 0 => {
                let (num, den) = (&s[..index], &s[index + 1..]);
                if den.contains('/') {
                    return Err(RationalError::Parse {
                        input: s.to_owned(),
                        reason: "more than one '/'".to_owned(),
                    });
                }

                Ok(RationalNumber::new(
                    parse_integer(s, num)?,
                    parse_integer(s, den)?,
                ))
            }
            _ if s.contains('.') => {
                let f: f64 = s.trim().parse().map_err(|e: std::num::ParseFloatError| {
                    RationalError::Parse {
                        input: s.to_owned(),
                        reason: e.to_string(),
                    }
                })?;

                RationalNumber::try_from(f).map_err(|e| RationalError::Parse {
                    input: s.to_owned(),
                    reason: e.to_string(),
                })
            }
            _ => Ok(RationalNumber::from(parse_integer(s, s)?)),
        }
    }
}

impl Display for RationalNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        RationalPrinter::new_with_options(self, PrintOptions::from_fmt(f)).fmt(f)
    }
}

impl PartialEq for RationalNumber {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl PartialOrd for RationalNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl<'a, 'b> Add<&'a RationalNumber> for &'b RationalNumber {
    type Output = RationalNumber;

    fn add(self, other: &'a RationalNumber) -> Self::Output {
        RationalNumber::new(
            Integer::from(&self.numerator * &other.denominator)
                + Integer::from(&other.numerator * &self.denominator),
            Integer::from(&self.denominator * &other.denominator),
        )
    }
}

impl<'a, 'b> Sub<&'a RationalNumber> for &'b RationalNumber {
    type Output = RationalNumber;

    fn sub(self, other: &'a RationalNumber) -> Self::Output {
        self + &(-other)
    }
}

impl<'a, 'b> Mul<&'a RationalNumber> for &'b RationalNumber {
    type Output = RationalNumber;

    fn mul(self, other: &'a RationalNumber) -> Self::Output {
        RationalNumber::new(
            Integer::from(&self.numerator * &other.numerator),
            Integer::from(&self.denominator * &other.denominator),
        )
    }
}

impl Neg for &RationalNumber {
    type Output = RationalNumber;

    fn neg(self) -> Self::Output {
        RationalNumber::from_unchecked(Integer::from(-&self.numerator), self.denominator.clone())
    }
}

impl Neg for RationalNumber {
    type Output = RationalNumber;

    fn neg(self) -> Self::Output {
        RationalNumber::from_unchecked(-self.numerator, self.denominator)
    }
}

impl Add<RationalNumber> for RationalNumber {
    type Output = RationalNumber;

    fn add(self, other: RationalNumber) -> Self::Output {
        &self + &other
    }
}

impl Sub<RationalNumber> for RationalNumber {
    type Output = RationalNumber;

    fn sub(self, other: RationalNumber) -> Self::Output {
        &self - &other
    }
}

impl Mul<RationalNumber> for RationalNumber {
    type Output = RationalNumber;

    fn mul(self, other: RationalNumber) -> Self::Output {
        &self * &other
    }
}

impl<'a> Add<&'a RationalNumber> for RationalNumber {
    type Output = RationalNumber;

    fn add(self, other: &'a RationalNumber) -> Self::Output {
        &self + other
    }
}

impl<'a> Sub<&'a RationalNumber> for RationalNumber {
    type Output = RationalNumber;

    fn sub(self, other: &'a RationalNumber) -> Self::Output {
        &self - other
    }
}

impl<'a> Mul<&'a RationalNumber> for RationalNumber {
    type Output = RationalNumber;

    fn mul(self, other: &'a RationalNumber) -> Self::Output {
        &self * other
    }
}

impl<'a> Sum<&'a RationalNumber> for RationalNumber {
    fn sum<I: Iterator<Item = &'a RationalNumber>>(iter: I) -> Self {
        iter.fold(RationalNumber::zero(), |a, b| a + b)
    }
}

impl Sum<RationalNumber> for RationalNumber {
    fn sum<I: Iterator<Item = RationalNumber>>(iter: I) -> Self {
        iter.fold(RationalNumber::zero(), |a, b| a + b)
    }
}

impl<'a> Product<&'a RationalNumber> for RationalNumber {
    fn product<I: Iterator<Item = &'a RationalNumber>>(iter: I) -> Self {
        iter.fold(RationalNumber::one(), |a, b| a * b)
    }
}

impl Product<RationalNumber> for RationalNumber {
    fn product<I: Iterator<Item = RationalNumber>>(iter: I) -> Self {
        iter.fold(RationalNumber::one(), |a, b| a * b)
    }
}
