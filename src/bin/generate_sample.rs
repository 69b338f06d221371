//! Writes a synthetic `Cantor_BNP_Repo_Market_Data_with_DFF.csv` next to
//! `Cargo.toml`, with the same column layout as the real snapshot and the
//! same kinds of bad cells (blanks and `#DIV/0!`).

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

const OUTPUT_FILE: &str = "Cantor_BNP_Repo_Market_Data_with_DFF.csv";
const START: (i32, u32, u32) = (2025, 1, 2);
const BUSINESS_DAYS: usize = 125;

const TENORS: [&str; 7] = ["2Y", "3Y", "5Y", "7Y", "10Y", "20Y", "30Y"];
/// How far below GC each tenor trades when on the run (percentage points).
const SPECIALNESS: [f64; 7] = [0.25, 0.20, 0.35, 0.30, 0.60, 0.15, 0.40];
/// Specialness fades with each older issue: base, O, OO, OOO.
const VARIANTS: [(&str, f64); 4] = [("", 1.0), ("O", 0.5), ("OO", 0.25), ("OOO", 0.1)];

const P_BLANK: f64 = 0.02;
const P_DIV0: f64 = 0.01;

/// Seeded SplitMix64 stream; keeps the sample file identical across runs.
struct SampleRng {
    state: u64,
    /// Second normal draw of the last Box-Muller pair.
    spare: Option<f64>,
}

impl SampleRng {
    fn seeded(seed: u64) -> Self {
        SampleRng { state: seed, spare: None }
    }

    fn next_bits(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        (self.next_bits() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z = match self.spare.take() {
            Some(z) => z,
            None => {
                let radius = (-2.0 * (1.0 - self.uniform()).ln()).sqrt();
                let (sin, cos) = (std::f64::consts::TAU * self.uniform()).sin_cos();
                self.spare = Some(radius * sin);
                radius * cos
            }
        };
        mean + std_dev * z
    }
}

fn business_days(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(n);
    let mut day = start;
    while days.len() < n {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(day);
        }
        day += Duration::days(1);
    }
    days
}

/// Last business day of its month.
fn is_month_end(day: NaiveDate, next: Option<NaiveDate>) -> bool {
    next.map_or(true, |n| n.month() != day.month())
}

fn header() -> Vec<String> {
    let mut cols = vec!["time".to_string(), "DFF".to_string(), "GC".to_string()];
    for (prefix, _) in VARIANTS {
        for tenor in TENORS {
            cols.push(format!("{prefix}{tenor}"));
        }
    }
    cols
}

/// Format a rate, occasionally replacing it with a blank or an error token.
fn cell(rng: &mut SampleRng, rate: f64) -> String {
    let u = rng.uniform();
    if u < P_BLANK {
        String::new()
    } else if u < P_BLANK + P_DIV0 {
        "#DIV/0!".to_string()
    } else {
        format!("{rate:.3}")
    }
}

fn main() -> Result<()> {
    let mut rng = SampleRng::seeded(42);
    let (y, m, d) = START;
    let start = NaiveDate::from_ymd_opt(y, m, d).context("invalid start date")?;
    let days = business_days(start, BUSINESS_DAYS);

    let output_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(OUTPUT_FILE);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(header())?;

    let mut dff: f64 = 4.33;
    for (i, &day) in days.iter().enumerate() {
        // Fed funds moves rarely and in single basis points.
        if rng.uniform() < 0.05 {
            dff += if rng.uniform() < 0.5 { -0.01 } else { 0.01 };
        }
        let month_end = is_month_end(day, days.get(i + 1).copied());
        let gc = dff + rng.normal(0.02, 0.03) + if month_end { 0.15 } else { 0.0 };

        let mut record = vec![
            day.format("%Y-%m-%d").to_string(),
            format!("{dff:.2}"),
            cell(&mut rng, gc),
        ];
        for (_, fade) in VARIANTS {
            for special in SPECIALNESS {
                let rate = gc - special * fade + rng.normal(0.0, 0.04 * fade.max(0.25));
                record.push(cell(&mut rng, rate));
            }
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!(
        "Wrote {} days x {} rate columns to {}",
        days.len(),
        header().len() - 1,
        output_path.display()
    );
    Ok(())
}
