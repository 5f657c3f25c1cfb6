//! Column repair stages: age, gender, country, and purchase amount. Each
//! stage owns one column, applies its detection + repair policy to every
//! row, and reports what it changed.

use std::collections::BTreeSet;

use log::debug;

use crate::{error::CleanError, stats, table::Table};

/// Band used only to compute the fill/repair median.
const AGE_PLAUSIBLE: std::ops::RangeInclusive<f64> = 1.0..=100.0;
/// Band every final age must satisfy; being outside it triggers replacement.
const AGE_ACCEPTABLE: std::ops::RangeInclusive<f64> = 18.0..=100.0;

const COUNTRY_SYNONYMS: &[(&str, &str)] = &[
    ("usa", "United States"),
    ("united states", "United States"),
    ("us", "United States"),
    ("india", "India"),
    ("in", "India"),
    ("uk", "United Kingdom"),
    ("united kingdom", "United Kingdom"),
    ("u.k.", "United Kingdom"),
    ("australia", "Australia"),
    ("au", "Australia"),
];

#[derive(Debug, Default)]
pub struct AgeOutcome {
    pub filled: usize,
    pub outliers_replaced: usize,
}

/// Coerces ages to numeric, fills missing values with the plausible-band
/// median, and replaces values outside the acceptable adult band with the
/// same median. Final values are rounded to whole years.
pub fn repair_ages(table: &mut Table) -> Result<AgeOutcome, CleanError> {
    let coerced: Vec<Option<f64>> = table
        .records
        .iter()
        .map(|record| stats::coerce_numeric(&record.age))
        .collect();
    let plausible: Vec<f64> = coerced
        .iter()
        .flatten()
        .copied()
        .filter(|age| AGE_PLAUSIBLE.contains(age))
        .collect();
    let median = stats::median(&plausible).ok_or_else(|| CleanError::Repair {
        column: "age",
        reason: "no value inside the plausible band [1, 100], fill median undefined".to_string(),
    })?;
    debug!("Age fill median: {median}");

    let mut outcome = AgeOutcome::default();
    for (record, age) in table.records.iter_mut().zip(coerced) {
        let repaired = match age {
            None => {
                outcome.filled += 1;
                median
            }
            Some(value) if !AGE_ACCEPTABLE.contains(&value) => {
                outcome.outliers_replaced += 1;
                median
            }
            Some(value) => value,
        };
        record.age = format!("{}", repaired.round() as i64);
    }
    Ok(outcome)
}

/// Standardizes the gender column and returns the final category set.
/// Unrecognized non-empty values pass through capitalized.
pub fn standardize_genders(table: &mut Table) -> BTreeSet<String> {
    let mut categories = BTreeSet::new();
    for record in &mut table.records {
        let lowered = record.gender.trim().to_lowercase();
        let canonical = match lowered.as_str() {
            "m" => "male",
            "f" => "female",
            "" | "none" | "nan" => "unknown",
            other => other,
        };
        record.gender = capitalize(canonical);
        categories.insert(record.gender.clone());
    }
    categories
}

/// Standardizes the country column through the synonym map and returns the
/// final category set. Unmapped non-empty values pass through as lowercased
/// text; blank/absent values and the literal `unknown` become the reserved
/// `Unknown` sentinel.
pub fn standardize_countries(table: &mut Table) -> BTreeSet<String> {
    let mut categories = BTreeSet::new();
    for record in &mut table.records {
        let lowered = record.country.trim().to_lowercase();
        record.country = match lowered.as_str() {
            "" | "none" | "nan" | "unknown" => "Unknown".to_string(),
            other => COUNTRY_SYNONYMS
                .iter()
                .find(|(synonym, _)| *synonym == other)
                .map(|(_, canonical)| (*canonical).to_string())
                .unwrap_or_else(|| other.to_string()),
        };
        categories.insert(record.country.clone());
    }
    categories
}

#[derive(Debug)]
pub struct PurchaseOutcome {
    pub fixed: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Replaces missing and non-positive purchase amounts with the median of
/// strictly positive values, then clips the whole column into
/// `[Q1 - 1.5 * IQR, Q3 + 1.5 * IQR]` computed over the post-replacement
/// distribution.
pub fn repair_purchase_amounts(table: &mut Table) -> Result<PurchaseOutcome, CleanError> {
    let coerced: Vec<Option<f64>> = table
        .records
        .iter()
        .map(|record| stats::coerce_numeric(&record.purchase_amount))
        .collect();
    let positive: Vec<f64> = coerced
        .iter()
        .flatten()
        .copied()
        .filter(|amount| *amount > 0.0)
        .collect();
    let median = stats::median(&positive).ok_or_else(|| CleanError::Repair {
        column: "purchase_amount",
        reason: "no strictly positive value, replacement median undefined".to_string(),
    })?;

    let mut fixed = 0usize;
    let values: Vec<f64> = coerced
        .into_iter()
        .map(|amount| match amount {
            Some(value) if value > 0.0 => value,
            // missing and non-positive alike take the median
            _ => {
                fixed += 1;
                median
            }
        })
        .collect();

    let q1 = stats::quantile(&values, 0.25).ok_or_else(|| CleanError::Repair {
        column: "purchase_amount",
        reason: "column is empty".to_string(),
    })?;
    let q3 = stats::quantile(&values, 0.75).ok_or_else(|| CleanError::Repair {
        column: "purchase_amount",
        reason: "column is empty".to_string(),
    })?;
    let iqr = q3 - q1;
    let lower_bound = q1 - 1.5 * iqr;
    let upper_bound = q3 + 1.5 * iqr;
    debug!("Purchase IQR bounds: [{lower_bound}, {upper_bound}]");

    for (record, value) in table.records.iter_mut().zip(values) {
        record.purchase_amount = value.clamp(lower_bound, upper_bound).to_string();
    }
    Ok(PurchaseOutcome {
        fixed,
        lower_bound,
        upper_bound,
    })
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
