//! Schema error types
//!
//! Raised only while building a column-code table. Loading a bad table
//! aborts startup; there is no partially valid table.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Column-code table errors
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Code table file could not be read
    #[error("Failed to read column code table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Code table file is not a JSON object of strings
    #[error("Invalid column code table {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A table entry names a column that does not exist
    #[error("Code '{code}' maps to unknown column '{name}'")]
    UnknownColumn { code: String, name: String },

    /// The same column is reachable through two codes
    #[error("Column '{0}' has more than one code")]
    DuplicateColumn(String),

    /// The same code is listed twice
    #[error("Code '{0}' is listed more than once")]
    DuplicateCode(String),

    /// A column has no code
    #[error("Column '{0}' has no code")]
    MissingColumn(String),

    /// Empty or whitespace-bearing code
    #[error("Invalid column code '{0}'")]
    InvalidCode(String),
}
