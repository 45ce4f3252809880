//! Error types for the blotter library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for blotter operations.
#[derive(Debug, Error)]
pub enum BlotterError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column index not covered by every row of the file.
    ///
    /// `row` is the 1-based data row (0 means the header row).
    #[error("column index {column} out of range: row {row} has {width} fields")]
    ColumnOutOfRange {
        column: usize,
        width: usize,
        row: usize,
    },

    /// A column with no values where at least one is required.
    #[error("Empty column: {0}")]
    EmptyColumn(String),

    /// Empty file or no data to profile.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column name not present in the header.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// A provisioning plan that cannot be executed as given.
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error surfaced by the database driver. Never retried.
    #[error("Database error: {0}")]
    Sql(#[from] sqlx::Error),
}

/// Result type alias for blotter operations.
pub type Result<T> = std::result::Result<T, BlotterError>;
