//! The in-memory table: one `Record` per row, nine raw columns plus the
//! duplicate-email flag appended by the cleaning pipeline.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::{error::CleanError, io_utils};

/// Canonical column identifiers, in output order. Raw headers are matched
/// against these after canonicalization, so any casing/spacing and any
/// column order is accepted on input.
pub const CANONICAL_HEADERS: [&str; 9] = [
    "customer_id",
    "name",
    "gender",
    "country",
    "signup_date",
    "last_purchase",
    "age",
    "purchase_amount",
    "email",
];

/// One row. Cells stay raw text until the matching repair stage rewrites
/// them to canonical form; numeric coercion happens inside the stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    pub customer_id: String,
    pub name: String,
    pub gender: String,
    pub country: String,
    pub signup_date: String,
    pub last_purchase: String,
    pub age: String,
    pub purchase_amount: String,
    pub email: String,
    pub email_dup_flag: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub records: Vec<Record>,
}

/// Maps a raw header to its canonical identifier: trim, lowercase,
/// spaces to underscores. Pure rename; cell values are untouched.
pub fn canonical_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

impl Table {
    /// Reads a nine-column raw CSV. Unparseable input surfaces as
    /// [`CleanError::Load`]; a required column missing after header
    /// canonicalization surfaces as [`CleanError::Schema`].
    pub fn load(path: &Path, delimiter: u8) -> Result<Self> {
        let mut reader = io_utils::open_csv_reader_from_path(path, delimiter, true)?;
        let headers = reader
            .headers()
            .map_err(|source| CleanError::Load {
                path: path.to_path_buf(),
                source,
            })?
            .clone();
        let canonical: Vec<String> = headers.iter().map(canonical_header).collect();

        let mut indices = [0usize; 9];
        for (slot, name) in indices.iter_mut().zip(CANONICAL_HEADERS) {
            *slot = canonical
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| CleanError::Schema {
                    column: name.to_string(),
                    path: path.to_path_buf(),
                })?;
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|source| CleanError::Load {
                path: path.to_path_buf(),
                source,
            })?;
            let field = |column: usize| row.get(indices[column]).unwrap_or("").to_string();
            records.push(Record {
                customer_id: field(0),
                name: field(1),
                gender: field(2),
                country: field(3),
                signup_date: field(4),
                last_purchase: field(5),
                age: field(6),
                purchase_amount: field(7),
                email: field(8),
                email_dup_flag: false,
            });
        }
        Ok(Self { records })
    }

    /// Serializes the table with canonical snake_case headers plus the
    /// appended `email_dup_flag` column, preserving row order.
    pub fn to_csv_bytes(&self, delimiter: u8) -> Result<Vec<u8>> {
        let mut builder = csv::WriterBuilder::new();
        builder.delimiter(delimiter).double_quote(true);
        let mut writer = builder.from_writer(Vec::new());
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        writer
            .into_inner()
            .map_err(|err| anyhow::anyhow!("Finalizing CSV output: {err}"))
    }
}
