//! I/O utilities for CSV reading, writing, and delimiter resolution.
//!
//! All file I/O in csv-cleanse flows through this module: extension-based
//! delimiter auto-detection (`.csv` → comma, `.tsv` → tab) with manual
//! override, buffered reader/writer construction, and atomic publication of
//! output files. Everything is UTF-8.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn open_csv_reader_from_path(
    path: &Path,
    delimiter: u8,
    has_headers: bool,
) -> Result<csv::Reader<BufReader<File>>> {
    let reader =
        BufReader::new(File::open(path).with_context(|| format!("Opening input file {path:?}"))?);
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false);
    Ok(builder.from_reader(reader))
}

pub fn open_csv_writer_to_path(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Writer<BufWriter<File>>> {
    let writer = BufWriter::new(
        File::create(path).with_context(|| format!("Creating output file {path:?}"))?,
    );
    let mut builder = csv::WriterBuilder::new();
    builder.delimiter(delimiter).double_quote(true);
    Ok(builder.from_writer(writer))
}

/// Writes `bytes` to a staging sibling and renames it over `path`, so a
/// failure mid-pipeline never leaves a partially written output behind.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let staged = path.with_extension("tmp");
    fs::write(&staged, bytes).with_context(|| format!("Writing staged output {staged:?}"))?;
    fs::rename(&staged, path).with_context(|| format!("Publishing output to {path:?}"))?;
    Ok(())
}
