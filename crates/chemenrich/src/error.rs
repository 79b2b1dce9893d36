//! Error types for the chemenrich library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for chemenrich operations.
///
/// Per-row lookup failures are never reported through this type; they are
/// recorded as a [`LookupResult`](crate::LookupResult) in the output column.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no rows to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// The requested column does not exist in the table.
    #[error("Column '{column}' not found (available: {available})")]
    MissingColumn { column: String, available: String },

    /// Input that cannot be read as a CAS Registry Number at all.
    #[error("Invalid CAS number format '{input}': {reason}")]
    InvalidCas { input: String, reason: String },

    /// Configuration error (bad URL, HTTP client construction, config file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EnrichError {
    pub(crate) fn missing_column(column: &str, headers: &[String]) -> Self {
        EnrichError::MissingColumn {
            column: column.to_string(),
            available: headers.join(", "),
        }
    }
}

/// Result type alias for chemenrich operations.
pub type Result<T> = std::result::Result<T, EnrichError>;
