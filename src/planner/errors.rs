//! Query error types
//!
//! Error codes:
//! - WINE_QUERY_MALFORMED_NUMBER (REJECT)
//! - WINE_QUERY_UNKNOWN_COLUMN (REJECT)
//! - WINE_QUERY_UNKNOWN_OPERATOR (REJECT)
//! - WINE_QUERY_MISSING_WHERE (REJECT)
//! - WINE_QUERY_UNKNOWN_WINE_TYPE (REJECT)
//! - WINE_QUERY_MALFORMED_CONDITION (REJECT)
//!
//! All query errors are local: the offending line or filter input is
//! rejected and the caller carries on with the rest.

use std::fmt;

/// Severity levels for query errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Input rejected, nothing changed
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Query-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Numeric literal does not parse
    MalformedNumber,
    /// Column code or name not in the table
    UnknownColumn,
    /// Operator symbol not in the fixed set
    UnknownOperator,
    /// Conditions present without a `where` keyword
    MissingWhereClause,
    /// Group token is not red, white or all
    UnknownWineType,
    /// Fragment does not split into column, operator and value
    MalformedCondition,
}

impl QueryErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::MalformedNumber => "WINE_QUERY_MALFORMED_NUMBER",
            QueryErrorCode::UnknownColumn => "WINE_QUERY_UNKNOWN_COLUMN",
            QueryErrorCode::UnknownOperator => "WINE_QUERY_UNKNOWN_OPERATOR",
            QueryErrorCode::MissingWhereClause => "WINE_QUERY_MISSING_WHERE",
            QueryErrorCode::UnknownWineType => "WINE_QUERY_UNKNOWN_WINE_TYPE",
            QueryErrorCode::MalformedCondition => "WINE_QUERY_MALFORMED_CONDITION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// Error code
    code: QueryErrorCode,
    /// Human-readable message
    message: String,
    /// Offending token if applicable
    token: Option<String>,
}

impl QueryError {
    fn with_token(code: QueryErrorCode, message: String, token: impl Into<String>) -> Self {
        Self {
            code,
            message,
            token: Some(token.into()),
        }
    }

    /// Create a malformed number error
    pub fn malformed_number(literal: impl Into<String>) -> Self {
        let t = literal.into();
        Self::with_token(
            QueryErrorCode::MalformedNumber,
            format!("'{}' is not a number", t),
            t,
        )
    }

    /// Create an unknown column error
    pub fn unknown_column(name: impl Into<String>) -> Self {
        let t = name.into();
        Self::with_token(
            QueryErrorCode::UnknownColumn,
            format!("Unknown column '{}'", t),
            t,
        )
    }

    /// Create an unknown operator error
    pub fn unknown_operator(symbol: impl Into<String>) -> Self {
        let t = symbol.into();
        Self::with_token(
            QueryErrorCode::UnknownOperator,
            format!("Unknown operator '{}'", t),
            t,
        )
    }

    /// Create a missing where clause error
    pub fn missing_where() -> Self {
        Self {
            code: QueryErrorCode::MissingWhereClause,
            message: "Query has conditions but no 'where' keyword".into(),
            token: None,
        }
    }

    /// Create an unknown wine type error
    pub fn unknown_wine_type(name: impl Into<String>) -> Self {
        let t = name.into();
        Self::with_token(
            QueryErrorCode::UnknownWineType,
            format!("Unknown wine type '{}'", t),
            t,
        )
    }

    /// Create a malformed condition error
    pub fn malformed_condition(fragment: impl Into<String>) -> Self {
        let t = fragment.into();
        Self::with_token(
            QueryErrorCode::MalformedCondition,
            format!("'{}' is not of the form <column><operator><value>", t),
            t,
        )
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending token if applicable
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for QueryError {}

/// Result type for query parsing
pub type QueryResult<T> = Result<T, QueryError>;
