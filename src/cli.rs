use std::path::PathBuf;

use clap::Parser;

/// Every option carries a default so a bare invocation runs the full
/// pipeline: `raw_dataset.csv` is cleaned (and generated first when absent)
/// into `cleaned_dataset.csv` plus a plain-text summary.
#[derive(Debug, Parser)]
#[command(author, version, about = "Repair common data-quality defects in CSV datasets", long_about = None)]
pub struct Cli {
    /// Raw input CSV (a synthetic sample is generated here when missing)
    #[arg(short = 'i', long = "input", default_value = "raw_dataset.csv")]
    pub input: PathBuf,
    /// Destination for the cleaned CSV
    #[arg(short = 'o', long = "output", default_value = "cleaned_dataset.csv")]
    pub output: PathBuf,
    /// Destination for the plain-text cleaning summary
    #[arg(short = 's', long = "summary", default_value = "cleaning_summary.txt")]
    pub summary: PathBuf,
    /// Number of synthetic rows to generate when the input is missing
    #[arg(long, default_value_t = 200)]
    pub rows: usize,
    /// Seed for the synthetic sample generator
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_accepts_names_and_literals() {
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("|").unwrap(), b'|');
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
