use ratmat::tensors::matrix::RationalMatrix;
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("RATMAT_LOG"))
        .init();

    let a = RationalMatrix::from_grid(&[[0, 2, 1], [3, 0, 4], [1, 5, 9]]).unwrap();

    println!("> A =\n{}", a);
    println!("> det(A) = {}", a.det());
    println!("> adj(A) =\n{}", a.adjoint());

    let inv = a.inverse();
    println!("> A^-1 =\n{}", inv);
    println!("> A * A^-1 =\n{}", a.checked_mul(&inv).unwrap());

    let singular = RationalMatrix::from_grid(&[[1, 2], [2, 4]]).unwrap();
    println!("> inverse of the singular matrix {:#} = {:#}", singular, singular.inverse());
}
