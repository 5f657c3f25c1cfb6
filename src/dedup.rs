//! Row-level duplicate handling: exact-duplicate removal and the
//! shared-email flag.

use std::collections::{HashMap, HashSet};

use crate::table::Table;

/// Drops rows that are identical across every raw column, keeping the first
/// occurrence and preserving row order. Returns the number removed.
/// Idempotent: a second pass over the result removes nothing.
pub fn remove_exact_duplicates(table: &mut Table) -> usize {
    let before = table.records.len();
    let mut seen = HashSet::new();
    table.records.retain(|record| seen.insert(record.clone()));
    before - table.records.len()
}

/// Sets `email_dup_flag` on every row whose email occurs more than once in
/// the table; all members of a duplicate group are flagged. Returns the
/// number of rows flagged.
pub fn flag_duplicate_emails(table: &mut Table) -> usize {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in &table.records {
        *counts.entry(record.email.clone()).or_default() += 1;
    }
    let mut flagged = 0usize;
    for record in &mut table.records {
        record.email_dup_flag = counts.get(&record.email).copied().unwrap_or(0) > 1;
        if record.email_dup_flag {
            flagged += 1;
        }
    }
    flagged
}
