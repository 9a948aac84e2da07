//! Write a synthetic benchmark report in every input layout.
//!
//! ```text
//! generate_sample [OUT_DIR] [UNIT]
//! ```
//!
//! Produces `runtime_report.txt` (legacy, seconds), `runtime_report.csv` and
//! `runtime_report.json` (in `UNIT`, default `ms`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Serialize;

/// Time units and their length in seconds.
const UNITS: &[(&str, f64)] = &[
    ("ns", 1e-9),
    ("μs", 1e-6),
    ("ms", 1e-3),
    ("s", 1.0),
    ("min", 60.0),
    ("h", 3600.0),
];

/// Column order matches the reports the benchmark harness writes.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    sample_id: usize,
    time_unit: &'a str,
    time_value: f64,
    sample_size: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Geometric ladder from 1 000 to roughly 5 000 000 elements.
fn sample_sizes() -> Vec<u64> {
    (0..13)
        .map(|i| (1000.0 * 2f64.powf(i as f64 * 0.71)).round() as u64)
        .collect()
}

/// Seconds for an `n log n` sort with ±5 % jitter.
fn simulated_seconds(n: u64, rng: &mut SimpleRng) -> f64 {
    let n = n as f64;
    let jitter = 1.0 + (rng.next_f64() - 0.5) * 0.1;
    4e-9 * n * n.log2() * jitter
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let unit = args.next().unwrap_or_else(|| "ms".to_string());

    let Some(&(unit, per_unit)) = UNITS.iter().find(|(sym, _)| *sym == unit) else {
        bail!(
            "unknown unit '{unit}', expected one of {}",
            UNITS.iter().map(|(s, _)| *s).collect::<Vec<_>>().join(", ")
        );
    };

    std::fs::create_dir_all(&out_dir).context("creating output directory")?;

    let mut rng = SimpleRng::new(42);
    let measurements: Vec<(u64, f64)> = sample_sizes()
        .into_iter()
        .map(|n| (n, simulated_seconds(n, &mut rng)))
        .collect();

    // Legacy text: `<size> <seconds>`
    let txt_path = out_dir.join("runtime_report.txt");
    let mut txt = BufWriter::new(File::create(&txt_path).context("creating text report")?);
    for (n, secs) in &measurements {
        writeln!(txt, "{n} {secs}")?;
    }
    txt.flush()?;

    let rows: Vec<ReportRow> = measurements
        .iter()
        .enumerate()
        .map(|(i, &(n, secs))| ReportRow {
            sample_id: i + 1,
            time_unit: unit,
            time_value: secs / per_unit,
            sample_size: n,
        })
        .collect();

    let csv_path = out_dir.join("runtime_report.csv");
    let mut writer = csv::Writer::from_path(&csv_path).context("creating CSV report")?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let json_path = out_dir.join("runtime_report.json");
    let json = BufWriter::new(File::create(&json_path).context("creating JSON report")?);
    serde_json::to_writer_pretty(json, &rows).context("writing JSON report")?;

    println!(
        "Wrote {} samples to {}, {} and {}",
        rows.len(),
        txt_path.display(),
        csv_path.display(),
        json_path.display()
    );
    Ok(())
}
