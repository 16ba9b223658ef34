use ratmat::domains::rational::RationalNumber;
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("RATMAT_LOG"))
        .init();

    for x in [0.1, 1. / 3., std::f64::consts::PI, -2.5e-10, 6.02214076e23] {
        let r = RationalNumber::try_from(x).unwrap();
        println!("> {} = {} -> {}", x, r, r.to_f64());
    }

    let third: RationalNumber = "1/3".parse().unwrap();
    let sum = [third.clone(), third.clone(), third]
        .iter()
        .sum::<RationalNumber>();
    println!("> 1/3 + 1/3 + 1/3 = {}", sum);

    match "22/7/1".parse::<RationalNumber>() {
        Ok(r) => println!("> parsed {}", r),
        Err(e) => println!("> {}", e),
    }
}
