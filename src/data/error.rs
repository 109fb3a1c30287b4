//! Data loading error types
//!
//! Every variant is fatal at startup: the dashboard cannot render without data.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the sample CSV
#[derive(Error, Debug)]
pub enum LoadError {
    /// File missing or unreadable
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV structure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A sample date could not be parsed
    #[error("Line {line}: invalid date {value:?}")]
    InvalidDate { line: u64, value: String },

    /// A numeric column holds a non-numeric value
    #[error("Line {line}: invalid number {value:?} in column {column}")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    /// The file has no usable rows
    #[error("Dataset contains no usable samples")]
    Empty,
}

/// Result type alias for loading operations
pub type LoadResult<T> = Result<T, LoadError>;
