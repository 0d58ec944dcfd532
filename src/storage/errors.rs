//! Storage error types
//!
//! Dataset ingestion errors. Any of them aborts the load; a cellar is
//! never built from a partially read file.

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Dataset ingestion errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Dataset file could not be opened
    #[error("Failed to open dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV structure
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// A required column header is absent
    #[error("Dataset {path} has no '{column}' column")]
    MissingColumn { path: String, column: String },

    /// A cell is not a number
    #[error("Dataset {path} row {row}: invalid {column} value '{value}'")]
    InvalidValue {
        path: String,
        row: usize,
        column: String,
        value: String,
    },

    /// A sample was filed under the other base type
    #[error("Sample {id} does not belong to the {expected} partition")]
    WrongPartition { id: u32, expected: &'static str },

    /// A sample was tagged with the ALL selector instead of a base type
    #[error("Sample {id} must be RED or WHITE, not ALL")]
    UntypedSample { id: u32 },

    /// The same id was given to two samples
    #[error("Sample id {id} is used more than once")]
    DuplicateId { id: u32 },

    /// Sample ids would overflow
    #[error("Too many samples: id space exhausted")]
    IdOverflow,
}
