use ratmat::{
    domains::rational::{RationalError, RationalNumber},
    tensors::matrix::{MatrixError, RationalMatrix},
};

#[test]
fn sum_of_fractions() {
    let a = RationalNumber::new(1, 2);
    let b = RationalNumber::new(1, 3);
    assert_eq!(&a + &b, RationalNumber::new(5, 6));
}

#[test]
fn inverse_of_diagonal() {
    let a = RationalMatrix::from_grid(&[[2, 0], [0, 2]]).unwrap();
    let half: RationalNumber = "1/2".parse().unwrap();
    let expected = RationalMatrix::from_nested_vec(vec![
        vec![half.clone(), RationalNumber::zero()],
        vec![RationalNumber::zero(), half],
    ])
    .unwrap();
    assert_eq!(a.inverse(), expected);
}

#[test]
fn determinant_of_identity() {
    assert_eq!(RationalMatrix::identity(3).det(), RationalNumber::one());
}

#[test]
fn tenth() {
    let r = RationalNumber::try_from(0.1).unwrap();
    assert_eq!(r.to_f64(), 0.1);
}

#[test]
fn zero_over_zero() {
    let zero = RationalNumber::new(0, 1);
    let r = zero.checked_div(&zero).unwrap();
    assert!(r.is_zero());
    assert_eq!(
        RationalNumber::one().checked_div(&zero),
        Err(RationalError::DivisionByZero)
    );
}

#[test]
fn singular_inverse() {
    let a = RationalMatrix::from_grid(&[[1, 2], [2, 4]]).unwrap();
    assert_eq!(a.det(), RationalNumber::zero());
    assert_eq!(a.inverse(), RationalMatrix::zero(2));
}

#[test]
fn floating_grid() {
    let a = RationalMatrix::from_grid(&[[0.5, 0.25], [0.1, 3.]]).unwrap();
    assert_eq!(a[(1, 0)], RationalNumber::new(1, 10));
    assert_eq!(a.det(), RationalNumber::new(59, 40));

    assert!(matches!(
        RationalMatrix::from_grid(&[vec![0.5, 0.25], vec![0.1]]),
        Err(MatrixError::DimensionMismatch {
            expected: 2,
            found: 1
        })
    ));
}

#[test]
fn printing() {
    let a = RationalMatrix::from_nested_vec(vec![
        vec![RationalNumber::new(1, 2), RationalNumber::nan()],
        vec![RationalNumber::new(0, 3), RationalNumber::from(-4)],
    ])
    .unwrap();

    assert_eq!(a.to_string(), "[\n [ 1/2 , NaN ],\n [ 0 , -4 ]\n]\n");
}

#[test]
fn errors_display() {
    let e = "1/".parse::<RationalNumber>().unwrap_err();
    assert!(e.to_string().starts_with("Could not parse '1/'"));

    let e = RationalMatrix::identity(1).pow(-2).unwrap_err();
    assert_eq!(
        e.to_string(),
        "Invalid argument: Matrix power must be non-negative, got -2"
    );

    let e: MatrixError = RationalError::DivisionByZero.into();
    assert_eq!(e.to_string(), "Arithmetic error: Division by zero");
    assert!(std::error::Error::source(&e).is_some());
}
