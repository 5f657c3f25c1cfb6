//! Date unification: best-effort parsing of free-text dates followed by a
//! carry-forward fold over row order.

use chrono::NaiveDate;

use crate::{error::CleanError, table::Table};

/// Accepted input formats, tried in order; first success wins.
pub const INPUT_FORMATS: &[&str] = &["%d-%m-%Y", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%B %d, %Y"];

/// Every date cell is rendered in this one format after unification.
pub const OUTPUT_FORMAT: &str = "%d-%m-%Y";

pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Unifies both date columns independently.
pub fn unify_dates(table: &mut Table) -> Result<(), CleanError> {
    let mut signup: Vec<&mut String> = table
        .records
        .iter_mut()
        .map(|record| &mut record.signup_date)
        .collect();
    unify_cells(&mut signup, "signup_date")?;

    let mut last_purchase: Vec<&mut String> = table
        .records
        .iter_mut()
        .map(|record| &mut record.last_purchase)
        .collect();
    unify_cells(&mut last_purchase, "last_purchase")?;
    Ok(())
}

/// Stateful fold over row order: a parsed cell updates the carried value,
/// an unparsable cell inherits it. Rows ahead of the first successful parse
/// are backfilled from that first parse; a column with no parseable value
/// at all is unrepairable.
fn unify_cells(cells: &mut [&mut String], column: &'static str) -> Result<(), CleanError> {
    if cells.is_empty() {
        return Ok(());
    }
    let parsed: Vec<Option<NaiveDate>> = cells.iter().map(|cell| parse_flexible_date(cell)).collect();
    let mut carried = parsed
        .iter()
        .flatten()
        .next()
        .copied()
        .ok_or_else(|| CleanError::Repair {
            column,
            reason: "no value matches any supported date format".to_string(),
        })?;
    for (cell, value) in cells.iter_mut().zip(parsed) {
        if let Some(date) = value {
            carried = date;
        }
        **cell = carried.format(OUTPUT_FORMAT).to_string();
    }
    Ok(())
}
