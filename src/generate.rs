//! Synthetic sample generator: produces a raw dataset with deliberately
//! injected quality defects so the pipeline has something to demonstrate
//! against. All randomness flows through one explicitly seeded source, so
//! the same seed and row count reproduce the file byte-for-byte.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::io_utils;

/// Raw header row, display case, as the loader expects to find it.
pub const RAW_HEADERS: [&str; 9] = [
    "Customer ID",
    "Name",
    "Gender",
    "Country",
    "Signup Date",
    "Last Purchase",
    "Age",
    "Purchase Amount",
    "Email",
];

/// Number of exact-duplicate rows appended after the generated set.
pub const DUPLICATE_ROWS: usize = 5;

const GENDER_POOL: &[&str] = &[
    "Male", "male", "M", "Female", "female", "F", "Other", "other", "",
];
const COUNTRY_POOL: &[&str] = &[
    "USA",
    "United States",
    "US",
    "India",
    "IN",
    "india",
    "UK",
    "United Kingdom",
    "U.K.",
    "Australia",
    "AU",
    "",
];
const AGE_SENTINELS: &[f64] = &[150.0, -5.0, 200.0, 0.0, 120.0];
const PURCHASE_SENTINELS: &[f64] = &[5000.0, -100.0, 10000.0];
const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%B %d, %Y"];

/// Writes `rows` synthetic records plus [`DUPLICATE_ROWS`] exact duplicates
/// (sampled with replacement) to `path`.
pub fn write_sample(path: &Path, rows: usize, seed: u64, delimiter: u8) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let signup_start = NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid calendar date");
    let signup_end = NaiveDate::from_ymd_opt(2023, 12, 31).expect("valid calendar date");
    let purchase_start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid calendar date");
    let purchase_end = NaiveDate::from_ymd_opt(2025, 7, 31).expect("valid calendar date");

    // Column vectors are built in a fixed call order so the rng stream, and
    // with it the output file, is fully determined by the seed.
    let signup_dates: Vec<String> = (0..rows)
        .map(|_| random_date(&mut rng, signup_start, signup_end))
        .collect();
    let purchase_dates: Vec<String> = (0..rows)
        .map(|_| random_date(&mut rng, purchase_start, purchase_end))
        .collect();

    let mut ages: Vec<Option<f64>> = (0..rows)
        .map(|_| Some(normal(&mut rng, 35.0, 12.0)))
        .collect();
    for idx in distinct_indices(&mut rng, rows, 5) {
        ages[idx] = Some(pick(&mut rng, AGE_SENTINELS));
    }
    for idx in distinct_indices(&mut rng, rows, 10) {
        ages[idx] = None;
    }

    let mut purchases: Vec<f64> = (0..rows)
        .map(|_| round2(normal(&mut rng, 200.0, 80.0)))
        .collect();
    for idx in distinct_indices(&mut rng, rows, 5) {
        purchases[idx] = pick(&mut rng, PURCHASE_SENTINELS);
    }

    let mut emails: Vec<String> = (0..rows).map(|i| format!("user{i}@example.com")).collect();
    for idx in distinct_indices(&mut rng, rows, 15) {
        let source = rng.gen_range(0..rows);
        emails[idx] = emails[source].clone();
    }

    let genders: Vec<&str> = (0..rows).map(|_| pick(&mut rng, GENDER_POOL)).collect();
    let countries: Vec<&str> = (0..rows).map(|_| pick(&mut rng, COUNTRY_POOL)).collect();

    let mut records: Vec<Vec<String>> = (0..rows)
        .map(|i| {
            vec![
                format!("C{}", 1000 + i),
                format!("User_{i}"),
                genders[i].to_string(),
                countries[i].to_string(),
                signup_dates[i].clone(),
                purchase_dates[i].clone(),
                ages[i].map(|age| age.to_string()).unwrap_or_default(),
                purchases[i].to_string(),
                emails[i].clone(),
            ]
        })
        .collect();
    if rows > 0 {
        for _ in 0..DUPLICATE_ROWS {
            let idx = rng.gen_range(0..records.len());
            records.push(records[idx].clone());
        }
    }

    let mut writer = io_utils::open_csv_writer_to_path(path, delimiter)?;
    writer
        .write_record(RAW_HEADERS)
        .context("Writing raw header row")?;
    for (idx, record) in records.iter().enumerate() {
        writer
            .write_record(record)
            .with_context(|| format!("Writing raw row {}", idx + 2))?;
    }
    writer.flush().context("Flushing raw dataset writer")?;

    info!(
        "Generated synthetic raw dataset with {} row(s) to '{}'",
        records.len(),
        path.display()
    );
    Ok(())
}

fn random_date(rng: &mut StdRng, start: NaiveDate, end: NaiveDate) -> String {
    let span = (end - start).num_days();
    let date = start + Duration::days(rng.gen_range(0..=span));
    let format = pick(rng, DATE_FORMATS);
    date.format(format).to_string()
}

/// Standard normal deviate via the Box-Muller transform over the seeded
/// uniform source, scaled to `mean`/`std_dev`.
fn normal(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen_range(0.0f64..1.0).max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen_range(0.0f64..1.0);
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

fn pick<T: Copy>(rng: &mut StdRng, pool: &[T]) -> T {
    pool[rng.gen_range(0..pool.len())]
}

fn distinct_indices(rng: &mut StdRng, len: usize, want: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, len, want.min(len)).into_vec()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_deviates_follow_the_requested_location() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples: Vec<f64> = (0..10_000).map(|_| normal(&mut rng, 35.0, 12.0)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 35.0).abs() < 1.0, "sample mean was {mean}");
    }

    #[test]
    fn distinct_indices_never_repeat_and_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = distinct_indices(&mut rng, 200, 15);
        assert_eq!(picked.len(), 15);
        let mut unique = picked.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 15);
        assert!(picked.iter().all(|idx| *idx < 200));
        // a short table caps the request instead of panicking
        assert_eq!(distinct_indices(&mut rng, 3, 15).len(), 3);
    }

    #[test]
    fn round2_keeps_two_decimal_places() {
        assert_eq!(round2(123.456), 123.46);
        assert_eq!(round2(199.9), 199.9);
        assert_eq!(round2(42.0), 42.0);
    }
}
