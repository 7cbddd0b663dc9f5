//! Aggregation timing demo: repeated weighted sums over fixture ciphertexts.

use csv::Writer;
use paillier_agg::{ops, PublicKey};
use rand::{thread_rng, Rng};
use std::error::Error;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const PUB_KEY: &str = "95812e8c3bafc54adae58e01e2777a3de717312e2efe8b764c3a684a46106db7";
const FIXTURES: [&str; 3] = [
    "3332efac4d4e0dae3f8f6aa2adac08a367fcbb445e23f895c4f1e851a29e449c3a9fecd2aef21d71a4d8fd176b45d283360a921b761370335895eee4de1fb863",
    "22923c0e2999842a9802cdd28804bf6ead5ba99c3e17ffbda7ef9dfc5ad2e3074ff6ac88be64705f64e4799f2a925093f5b113096ffc76313b39a1662ee7eb2f",
    "2452d327ba5100ae18aceb72fa2e360d7a2127f63b7cb922d59d90a98918bc21ce707c5ab9db6b774c3942decc8542501910393d09e24d9a5ce7c9e08ab9368c",
];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut wtr = Writer::from_path("agg_stats.csv")?;
    wtr.write_record(["index", "time_ms", "inputs"])?;

    let rounds = 200;
    let max_inputs = 64;
    let key = PublicKey::from_hex(PUB_KEY)?;
    println!("modulus bits = {}, rounds = {}", key.modulus().bits(), rounds);

    let mut rng = thread_rng();
    let mut times = Vec::with_capacity(rounds);

    // Each round's input grows the pool, so later rounds aggregate fresh ciphertexts.
    let mut pool: Vec<String> = FIXTURES.iter().map(|s| s.to_string()).collect();
    let start = Instant::now();

    for i in 0..rounds {
        let inputs = rng.gen_range(1..=max_inputs.min(pool.len()));
        let picked: Vec<&str> = (0..inputs)
            .map(|_| pool[rng.gen_range(0..pool.len())].as_str())
            .collect();
        let weights: Vec<u64> = (0..inputs).map(|_| rng.gen_range(0..1_000)).collect();

        let t = Instant::now();
        let sum = ops::weighted_add(&picked, &weights, PUB_KEY)?;
        let elapsed = t.elapsed();
        times.push(elapsed);

        wtr.write_record(&[
            i.to_string(),
            format!("{:.6}", elapsed.as_secs_f64() * 1000.0),
            inputs.to_string(),
        ])?;
        pool.push(sum);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    if let (Some(max), Some(min)) = (times.iter().max(), times.iter().min()) {
        let avg = times.iter().sum::<Duration>() / times.len() as u32;
        println!("Average: {avg:?}  Max: {max:?}  Min: {min:?}");
    }
    wtr.flush()?;
    Ok(())
}
