//! Executor error types
//!
//! Error codes:
//! - WINE_EMPTY_INPUT
//!
//! An aggregate over zero samples has no value. It is reported as an
//! error rather than 0 or NaN.

use std::fmt;

use crate::schema::Column;

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// Aggregate requested over an empty subset
    EmptyInput,
}

impl ExecutorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::EmptyInput => "WINE_EMPTY_INPUT",
        }
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorError {
    /// Error code
    code: ExecutorErrorCode,
    /// Human-readable message
    message: String,
    /// Column the aggregate was asked for, if any
    column: Option<Column>,
}

impl ExecutorError {
    /// Create an empty input error for a named aggregate
    pub fn empty_input(aggregate: &str, column: Option<Column>) -> Self {
        let message = match column {
            Some(c) => format!("Cannot compute {} of {} over zero samples", aggregate, c),
            None => format!("Cannot compute {} over zero samples", aggregate),
        };
        Self {
            code: ExecutorErrorCode::EmptyInput,
            message,
            column,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the column if applicable
    pub fn column(&self) -> Option<Column> {
        self.column
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for ExecutorError {}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
