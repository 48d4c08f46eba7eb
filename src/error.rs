//! Error types for the data layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, preprocessing or aggregating a passenger table.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The data source does not exist.
    #[error("file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    /// Error reading or accessing a file that does exist.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parquet reader error.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow decoding error.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// The file parsed but does not have a tabular shape.
    #[error("Malformed data: {0}")]
    Malformed(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A grouping or statistics request named a column the table lacks.
    #[error("column '{0}' not found in data")]
    InvalidColumn(String),

    /// A fill value was requested for a column with no present values.
    #[error("column '{column}' has no values to compute a median from")]
    AllValuesMissing { column: String },
}

/// Result type alias for data-layer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;
