//! Lossless conversions between [RationalNumber] and `f64`.
//!
//! Both directions walk the Stern–Brocot tree, starting from the bounds `0/1` and `1/0`
//! and narrowing the interval with mediants. Consecutive steps in the same direction
//! are taken in a single jump, whose length is found with a galloping search.

use std::cmp::Ordering;

use rug::Integer;
use tracing::debug;

use super::rational::{RationalError, RationalNumber};

/// Round the non-negative ratio `num/den` to the nearest `f64`, with ties to even.
/// A zero denominator with a nonzero numerator rounds to infinity.
pub(crate) fn round_ratio(num: &Integer, den: &Integer) -> f64 {
    if *num == 0 {
        return 0.0;
    }
    if *den == 0 {
        return f64::INFINITY;
    }

    // scale such that the integer quotient has 55 or 56 significant bits
    let shift = 55 - (num.significant_bits() as i64 - den.significant_bits() as i64);
    let (q, r) = if shift >= 0 {
        Integer::from(num << shift as u32).div_rem(den.clone())
    } else {
        num.clone().div_rem(Integer::from(den << (-shift) as u32))
    };

    // num/den = (q + r/den') * 2^-shift
    let q_bits = q.significant_bits() as i64;
    let exponent = q_bits - 1 - shift;
    if exponent > 1023 {
        return f64::INFINITY;
    }

    // bits of q below the last bit of the mantissa
    let drop = if exponent >= -1022 {
        q_bits - 53
    } else {
        shift - 1074
    };

    if drop > q_bits + 1 {
        return 0.0;
    }

    let drop = drop as u32;
    let mut mantissa = Integer::from(&q >> drop);
    let rest = q.keep_bits(drop);
    let half = Integer::from(1) << (drop - 1);
    match rest.cmp(&half) {
        Ordering::Greater => mantissa += 1,
        Ordering::Equal if r != 0 || mantissa.is_odd() => mantissa += 1,
        _ => {}
    }

    mantissa.to_f64() * pow2(drop as i64 - shift)
}

/// Compute `2^k` exactly for `-1074 <= k <= 1023`.
fn pow2(k: i64) -> f64 {
    if k >= -1022 {
        f64::from_bits(((k + 1023) as u64) << 52)
    } else {
        f64::from_bits(1u64 << (k + 1074))
    }
}

/// A bound in the Stern–Brocot tree.
#[derive(Clone, Debug)]
struct Bound {
    num: Integer,
    den: Integer,
}

impl Bound {
    /// Compute `self + k * step`, taking numerators and denominators separately.
    fn step(&self, step: &Bound, k: &Integer) -> Bound {
        Bound {
            num: Integer::from(&step.num * k) + &self.num,
            den: Integer::from(&step.den * k) + &self.den,
        }
    }

    fn mediant(&self, other: &Bound) -> Bound {
        Bound {
            num: Integer::from(&self.num + &other.num),
            den: Integer::from(&self.den + &other.den),
        }
    }

    fn to_f64(&self) -> f64 {
        round_ratio(&self.num, &self.den)
    }
}

/// Find the largest `k >= 1` for which `pred(k)` holds, given that `pred(1)` holds
/// and that `pred` is monotonically decreasing.
fn gallop(pred: impl Fn(&Integer) -> bool) -> Integer {
    let mut low = Integer::from(1);
    let mut high = Integer::from(2);
    while pred(&high) {
        low = high.clone();
        high <<= 1u32;
    }

    while Integer::from(&high - &low) > 1 {
        let mid = Integer::from(&low + &high) >> 1u32;
        if pred(&mid) {
            low = mid;
        } else {
            high = mid;
        }
    }

    low
}

/// The outcome of a Stern–Brocot walk.
enum Walk {
    /// A mediant hit the target.
    Found(Bound),
    /// The walk was stopped early with the given interval.
    Stopped(Bound, Bound),
}

/// Walk the Stern–Brocot tree of positive rationals. `direction` compares the target
/// with a node: `Greater` means the target lies to the right. After every jump, `stop`
/// may end the walk early.
fn stern_brocot(
    direction: impl Fn(&Bound) -> Ordering,
    stop: impl Fn(&Bound, &Bound) -> bool,
) -> Walk {
    let mut lo = Bound {
        num: Integer::new(),
        den: Integer::from(1),
    };
    let mut hi = Bound {
        num: Integer::from(1),
        den: Integer::new(),
    };

    let mut runs = 0usize;
    loop {
        let mediant = lo.mediant(&hi);
        match direction(&mediant) {
            Ordering::Equal => {
                debug!("Stern-Brocot walk reached its target after {} runs", runs);
                return Walk::Found(mediant);
            }
            Ordering::Greater => {
                let k = gallop(|k| direction(&lo.step(&hi, k)) == Ordering::Greater);
                lo = lo.step(&hi, &k);
            }
            Ordering::Less => {
                let k = gallop(|k| direction(&hi.step(&lo, k)) == Ordering::Less);
                hi = hi.step(&lo, &k);
            }
        }
        runs += 1;

        if stop(&lo, &hi) {
            debug!("Stern-Brocot walk stopped after {} runs", runs);
            return Walk::Stopped(lo, hi);
        }
    }
}

impl RationalNumber {
    /// Convert the rational number to the nearest `f64`.
    ///
    /// The not-a-number value maps to `f64::NAN` and values beyond the range of `f64`
    /// map to infinity.
    pub fn to_f64(&self) -> f64 {
        if self.is_nan() {
            return f64::NAN;
        }
        if self.is_zero() {
            return 0.0;
        }

        let target = self.abs();
        let (num, den) = (target.numerator_ref(), target.denominator_ref());

        let res = match stern_brocot(
            |b| Integer::from(num * &b.den).cmp(&Integer::from(&b.num * den)),
            |lo, hi| lo.to_f64() == hi.to_f64(),
        ) {
            Walk::Found(b) => b.to_f64(),
            Walk::Stopped(lo, _) => lo.to_f64(),
        };

        if self.is_negative() {
            -res
        } else {
            res
        }
    }
}

impl TryFrom<f64> for RationalNumber {
    type Error = RationalError;

    /// Convert a float to the simplest rational number that rounds back to it.
    ///
    /// Not-a-number maps to the rational not-a-number value. Infinite
    /// floats cannot be converted.
    fn try_from(f: f64) -> Result<Self, Self::Error> {
        if f.is_nan() {
            return Ok(RationalNumber::nan());
        }
        if f.is_infinite() {
            return Err(RationalError::InvalidArgument(format!(
                "cannot convert {} to a rational number",
                f
            )));
        }
        if f == 0.0 {
            return Ok(RationalNumber::zero());
        }

        let target = f.abs();
        let b = match stern_brocot(|b| target.total_cmp(&b.to_f64()), |_, _| false) {
            Walk::Found(b) => b,
            Walk::Stopped(lo, _) => lo,
        };

        // nodes of the Stern–Brocot tree are in lowest terms
        let r = RationalNumber::from_unchecked(b.num, b.den);
        Ok(if f < 0.0 { -r } else { r })
    }
}

impl TryFrom<f32> for RationalNumber {
    type Error = RationalError;

    fn try_from(f: f32) -> Result<Self, Self::Error> {
        RationalNumber::try_from(f as f64)
    }
}

#[cfg(test)]
mod test {
    use rug::Integer;

    use super::round_ratio;
    use crate::domains::rational::{RationalError, RationalNumber};

    #[test]
    fn rounding() {
        assert_eq!(round_ratio(&1.into(), &3.into()), 1. / 3.);
        assert_eq!(round_ratio(&2.into(), &3.into()), 2. / 3.);
        assert_eq!(round_ratio(&1.into(), &10.into()), 0.1);
        assert_eq!(round_ratio(&7.into(), &1.into()), 7.);

        // 2^53 + 1 is a tie between 2^53 and 2^53 + 2 and rounds to even
        let n = Integer::from(1) << 53u32;
        assert_eq!(round_ratio(&(n.clone() + 1u32), &1.into()), 9007199254740992.);
        assert_eq!(round_ratio(&(n + 3u32), &1.into()), 9007199254740996.);

        // beyond the largest float
        let big = Integer::from(1) << 1024u32;
        assert_eq!(round_ratio(&big, &1.into()), f64::INFINITY);

        // smallest subnormal and below
        let tiny = Integer::from(1) << 1074u32;
        assert_eq!(round_ratio(&1.into(), &tiny), f64::from_bits(1));
        assert_eq!(round_ratio(&1.into(), &Integer::from(&tiny << 2u32)), 0.);
        assert_eq!(round_ratio(&3.into(), &Integer::from(&tiny << 1u32)), f64::from_bits(2));
    }

    #[test]
    fn from_float() {
        assert_eq!(RationalNumber::try_from(0.5).unwrap(), (1, 2).into());
        assert_eq!(RationalNumber::try_from(-3.0).unwrap(), (-3).into());
        assert_eq!(RationalNumber::try_from(0.1).unwrap(), (1, 10).into());
        assert_eq!(RationalNumber::try_from(1.0 / 3.0).unwrap(), (1, 3).into());
        assert_eq!(RationalNumber::try_from(0.0).unwrap(), RationalNumber::zero());
        assert!(RationalNumber::try_from(f64::NAN).unwrap().is_nan());
        assert!(matches!(
            RationalNumber::try_from(f64::INFINITY),
            Err(RationalError::InvalidArgument(_))
        ));
    }

    #[test]
    fn to_float() {
        assert_eq!(RationalNumber::from((1, 3)).to_f64(), 1. / 3.);
        assert_eq!(RationalNumber::from((-5, 4)).to_f64(), -1.25);
        assert_eq!(RationalNumber::from(12345).to_f64(), 12345.);
        assert_eq!(RationalNumber::zero().to_f64(), 0.);
        assert!(RationalNumber::nan().to_f64().is_nan());

        let huge = RationalNumber::from(Integer::from(1) << 2000u32);
        assert_eq!(huge.to_f64(), f64::INFINITY);
    }

    #[test]
    fn round_trip() {
        for &x in &[
            0.1,
            -0.1,
            std::f64::consts::PI,
            1e300,
            -2.5e-300,
            f64::MAX,
            f64::MIN_POSITIVE,
            f64::from_bits(1),
            f64::from_bits(0x000f_ffff_ffff_ffff),
            123456789.123456789,
        ] {
            let r = RationalNumber::try_from(x).unwrap();
            assert_eq!(r.to_f64().to_bits(), x.to_bits(), "{}", x);
        }
    }
}
