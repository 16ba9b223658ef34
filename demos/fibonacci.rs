use ratmat::{printer::PrintOptions, tensors::matrix::RationalMatrix};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("RATMAT_LOG"))
        .init();

    // [[1, 1], [1, 0]]^n = [[F(n+1), F(n)], [F(n), F(n-1)]]
    let q = RationalMatrix::from_grid(&[[1, 1], [1, 0]]).unwrap();

    let n = 300;
    let p = q.pow(n).unwrap();
    println!(
        "> F({}) = {}",
        n,
        p[(0, 1)].printer(PrintOptions::new().with_thousands_separator(','))
    );
    println!("> Q^{} = {}", n, p.printer(PrintOptions::latex()));
}
