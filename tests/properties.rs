use rand::{rngs::StdRng, Rng, SeedableRng};
use ratmat::{domains::rational::RationalNumber, tensors::matrix::RationalMatrix};

const RANGE: (i64, i64) = (-50, 50);

#[test]
fn normalization() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..500 {
        let n: i64 = rng.gen_range(-1000..1000);
        let d: i64 = rng.gen_range(-1000..1000);
        if n == 0 || d == 0 {
            continue;
        }

        let r = RationalNumber::new(n, d);
        let g = r.numerator().gcd(&r.denominator());
        assert_eq!(g, 1);
        assert!(*r.denominator_ref() > 0);
        assert_eq!(r, RationalNumber::new(n * 3, d * 3));
    }
}

#[test]
fn field_laws() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..200 {
        let a = RationalNumber::sample(&mut rng, RANGE);
        let b = RationalNumber::sample(&mut rng, RANGE);
        let c = RationalNumber::sample(&mut rng, RANGE);

        assert_eq!(&a + &b, &b + &a);
        assert_eq!(&a * &b, &b * &a);
        assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
        assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        assert!((&a + &(-&a)).is_zero());

        if !a.is_zero() {
            assert!((&a * &a.inv()).is_one());
            assert_eq!(b.checked_div(&a).unwrap(), &b * &a.inv());
        }
    }
}

#[test]
fn comparison_consistency() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let a = RationalNumber::sample(&mut rng, (-5, 5));
        let b = RationalNumber::sample(&mut rng, (-5, 5));

        let cross = RationalNumber::from(
            a.numerator() * b.denominator() - b.numerator() * a.denominator(),
        );
        assert_eq!(a.compare(&b) as i32, cross.signum());
        assert_eq!(a == b, cross.is_zero());
        assert_eq!(a < b, (&a - &b).is_negative());
    }
}

#[test]
fn float_round_trip() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..300 {
        let x = f64::from_bits(rng.gen::<u64>());
        if !x.is_finite() {
            continue;
        }

        let r = RationalNumber::try_from(x).unwrap();
        assert_eq!(r.to_f64().to_bits(), x.to_bits(), "{:e}", x);
    }

    for _ in 0..300 {
        let x: f64 = rng.gen_range(-1e6..1e6);
        let r = RationalNumber::try_from(x).unwrap();
        assert_eq!(r.to_f64(), x);
    }
}

#[test]
fn rational_to_float_is_nearest() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..300 {
        let r = RationalNumber::sample(&mut rng, (-1_000_000, 1_000_000));
        if r.is_zero() {
            continue;
        }

        let exact = r.to_multi_prec().unwrap();
        let f = r.to_f64();

        // no neighbouring float is closer
        let err = (exact.clone() - rug::Rational::from_f64(f).unwrap()).abs();
        for g in [f64::from_bits(f.to_bits() + 1), f64::from_bits(f.to_bits() - 1)] {
            if let Some(g) = rug::Rational::from_f64(g) {
                assert!((exact.clone() - g).abs() >= err, "{}", r);
            }
        }
    }
}

#[test]
fn determinant_is_multiplicative() {
    let mut rng = StdRng::seed_from_u64(6);
    for dim in 1..=4 {
        for _ in 0..10 {
            let a = RationalMatrix::sample(dim, &mut rng, (-9, 9));
            let b = RationalMatrix::sample(dim, &mut rng, (-9, 9));
            let ab = a.checked_mul(&b).unwrap();
            assert_eq!(ab.det(), &a.det() * &b.det());
        }
    }
}

#[test]
fn determinant_agrees_with_cofactor_expansion() {
    let mut rng = StdRng::seed_from_u64(7);
    for dim in 2..=5 {
        let a = RationalMatrix::sample(dim, &mut rng, (-9, 9));
        let cf = a.cofactor_matrix();
        let expansion: RationalNumber = (0..dim).map(|j| &a[(0, j)] * &cf[(0, j)]).sum();
        assert_eq!(a.det(), expansion);
        assert_eq!(a.transpose().det(), a.det());
    }
}

#[test]
fn inverse_law() {
    let mut rng = StdRng::seed_from_u64(8);
    for dim in 1..=4 {
        for _ in 0..10 {
            let a = RationalMatrix::sample(dim, &mut rng, (-9, 9));
            let inv = a.inverse();
            if a.det().is_zero() {
                assert!(inv.is_zero());
            } else {
                assert!(a.checked_mul(&inv).unwrap().is_identity());
                assert_eq!(inv.det(), a.det().inv());
            }
        }
    }
}

#[test]
fn power_identities() {
    let mut rng = StdRng::seed_from_u64(9);
    for dim in 1..=3 {
        let a = RationalMatrix::sample(dim, &mut rng, (-4, 4));
        assert!(a.pow(0).unwrap().is_identity());
        assert_eq!(a.pow(1).unwrap(), a);

        for (m, n) in [(1, 2), (2, 3), (0, 5)] {
            assert_eq!(
                a.pow(m + n).unwrap(),
                a.pow(m).unwrap().checked_mul(&a.pow(n).unwrap()).unwrap()
            );
        }

        // repeated multiplication
        let mut p = RationalMatrix::identity(dim);
        for _ in 0..5 {
            p = p.checked_mul(&a).unwrap();
        }
        assert_eq!(a.pow(5).unwrap(), p);
    }
}
