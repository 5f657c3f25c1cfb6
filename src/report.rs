//! Aggregated cleaning statistics and the plain-text summary rendering.

use std::collections::BTreeSet;

use itertools::Itertools;

/// Accumulator for per-stage counts and bounds. Each stage contributes its
/// fields once; the reporter only reads.
#[derive(Debug, Default)]
pub struct CleaningStats {
    pub rows_before: usize,
    pub rows_after: usize,
    pub ages_filled: usize,
    pub age_outliers_replaced: usize,
    pub gender_categories: BTreeSet<String>,
    pub country_categories: BTreeSet<String>,
    pub purchase_fixed: usize,
    pub iqr_lower: f64,
    pub iqr_upper: f64,
    pub email_dups_flagged: usize,
}

pub const SUMMARY_HEADER: &str = "Summary of Cleaning Task:";

impl CleaningStats {
    pub fn duplicates_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }

    /// One finding per line, in reporting order.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!(
                "Initial rows (including exact duplicates): {}",
                self.rows_before
            ),
            format!(
                "Rows after removing exact duplicates: {} (duplicates removed: {})",
                self.rows_after,
                self.duplicates_removed()
            ),
            format!(
                "Missing/invalid ages filled with median of realistic ages: {}",
                self.ages_filled
            ),
            format!(
                "Outlier ages (outside 18-100) replaced: {}",
                self.age_outliers_replaced
            ),
            format!(
                "Standardized gender values: {}",
                self.gender_categories.iter().join(", ")
            ),
            format!(
                "Standardized countries: {}",
                self.country_categories.iter().join(", ")
            ),
            format!(
                "Purchase amount negative/zero fixed count: {}",
                self.purchase_fixed
            ),
            format!(
                "IQR capping applied with bounds: lower={:.2}, upper={:.2}",
                self.iqr_lower, self.iqr_upper
            ),
            format!("Duplicate emails flagged: {}", self.email_dups_flagged),
        ]
    }

    pub fn render(&self) -> String {
        let mut output = String::from(SUMMARY_HEADER);
        output.push('\n');
        for line in self.summary_lines() {
            output.push_str("- ");
            output.push_str(&line);
            output.push('\n');
        }
        output
    }
}
