//! Time both selectors on generated datasets of growing size and optionally
//! append one line per size to a log file for trend tracking.
//!
//! Usage:
//!   cargo run --release --bin benchmark_selectors
//!   cargo run --release --bin benchmark_selectors -- --log
//!
//! --log  Append rows to selector_benchmark_log.csv
//!        (date, assets, exhaustive_secs, greedy_secs, profit_gap).

use std::fs::OpenOptions;
use std::io::Write;

use folio::data::generate::{generate_assets, GeneratorConfig};
use folio::optimizer::{compare, Algorithm, AlgorithmChoice, DEFAULT_MAX_EXHAUSTIVE_ASSETS};

const LOG_PATH: &str = "selector_benchmark_log.csv";
const BUDGET: f64 = 5_000.0;
const SIZES: [usize; 5] = [4, 8, 12, 16, 20];

fn main() {
    let log = std::env::args().any(|a| a == "--log");
    let mut rows = Vec::with_capacity(SIZES.len());

    println!("Selector benchmark (budget {BUDGET}):");
    println!(
        "  {:>6}  {:>14}  {:>14}  {:>10}",
        "assets", "exhaustive s", "greedy s", "gap"
    );
    for count in SIZES {
        let assets = generate_assets(
            &GeneratorConfig {
                count,
                ..GeneratorConfig::default()
            },
            7,
        );
        let outcome = compare(
            &assets,
            BUDGET,
            AlgorithmChoice::Both,
            DEFAULT_MAX_EXHAUSTIVE_ASSETS,
        );
        let report = match outcome {
            Ok(report) => report,
            Err(err) => {
                eprintln!("benchmark failed for {count} assets: {err}");
                std::process::exit(1);
            }
        };
        let secs = |algorithm| {
            report
                .run(algorithm)
                .map(|run| run.elapsed.as_secs_f64())
                .unwrap_or(f64::NAN)
        };
        let exhaustive_secs = secs(Algorithm::Exhaustive);
        let greedy_secs = secs(Algorithm::Greedy);
        let gap = report
            .comparison
            .map(|comparison| comparison.profit_delta)
            .unwrap_or(f64::NAN);
        println!("  {count:>6}  {exhaustive_secs:>14.6}  {greedy_secs:>14.6}  {gap:>10.2}");
        rows.push((count, exhaustive_secs, greedy_secs, gap));
    }

    if log {
        let date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(LOG_PATH)
            .expect("open selector_benchmark_log.csv for append");
        if file.metadata().map(|m| m.len() == 0).unwrap_or(true) {
            let _ = file.write_all(b"date,assets,exhaustive_secs,greedy_secs,profit_gap\n");
        }
        for (count, exhaustive_secs, greedy_secs, gap) in rows {
            let line = format!("{date},{count},{exhaustive_secs:.6},{greedy_secs:.6},{gap:.4}\n");
            file.write_all(line.as_bytes())
                .expect("write selector_benchmark_log.csv");
        }
        file.flush().expect("flush selector_benchmark_log.csv");
        println!("Appended to {LOG_PATH}");
    }
}
