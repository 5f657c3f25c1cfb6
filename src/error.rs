use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline errors. Every variant aborts the run outright; there is no
/// partial or degraded-output mode.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("failed to parse '{}' as CSV: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("required column '{column}' missing from '{}'", .path.display())]
    Schema { column: String, path: PathBuf },

    #[error("column '{column}' cannot be repaired: {reason}")]
    Repair { column: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
