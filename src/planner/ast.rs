//! Query AST structures
//!
//! Defines the parsed filter representation used by the executor.

use std::fmt;

use serde::Serialize;

use super::errors::{QueryError, QueryResult};
use crate::schema::Column;
use crate::storage::{WineSample, WineType};

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    /// Equality: column = value
    #[serde(rename = "=")]
    Eq,
    /// Less than: column < value
    #[serde(rename = "<")]
    Lt,
    /// Greater than: column > value
    #[serde(rename = ">")]
    Gt,
    /// Less than or equal: column <= value
    #[serde(rename = "<=")]
    Le,
    /// Greater than or equal: column >= value
    #[serde(rename = ">=")]
    Ge,
    /// Not equal: column <> value
    #[serde(rename = "<>")]
    Ne,
}

impl Operator {
    /// Operators in the order the filter form offers them
    pub const ALL: [Operator; 6] = [
        Operator::Eq,
        Operator::Lt,
        Operator::Gt,
        Operator::Le,
        Operator::Ge,
        Operator::Ne,
    ];

    /// Parses an operator symbol.
    ///
    /// Not-equal is accepted as `<>`, `!=` or `≠`.
    pub fn from_symbol(symbol: &str) -> QueryResult<Self> {
        match symbol.trim() {
            "=" => Ok(Operator::Eq),
            "<" => Ok(Operator::Lt),
            ">" => Ok(Operator::Gt),
            "<=" => Ok(Operator::Le),
            ">=" => Ok(Operator::Ge),
            "<>" | "!=" | "≠" => Ok(Operator::Ne),
            other => Err(QueryError::unknown_operator(other)),
        }
    }

    /// Canonical symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Ne => "<>",
        }
    }

    /// Applies the comparison with plain IEEE semantics.
    ///
    /// No epsilon: `0.1 + 0.2 = 0.3` is false, and NaN only satisfies `<>`.
    pub fn compare(&self, actual: f64, threshold: f64) -> bool {
        match self {
            Operator::Eq => actual == threshold,
            Operator::Lt => actual < threshold,
            Operator::Gt => actual > threshold,
            Operator::Le => actual <= threshold,
            Operator::Ge => actual >= threshold,
            Operator::Ne => actual != threshold,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single filter predicate (column, operator, threshold)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Condition {
    /// Column to compare
    pub column: Column,
    /// Comparison operator
    pub operator: Operator,
    /// Threshold value
    pub threshold: f64,
}

impl Condition {
    /// Creates a condition from an operator symbol.
    ///
    /// The symbol is validated here, never at evaluation time.
    pub fn new(column: Column, symbol: &str, threshold: f64) -> QueryResult<Self> {
        Ok(Self::with_operator(
            column,
            Operator::from_symbol(symbol)?,
            threshold,
        ))
    }

    /// Creates a condition from an already-validated operator
    pub fn with_operator(column: Column, operator: Operator, threshold: f64) -> Self {
        Self {
            column,
            operator,
            threshold,
        }
    }

    /// Checks a sample against this condition
    pub fn matches(&self, sample: &WineSample) -> bool {
        self.operator.compare(sample.get(self.column), self.threshold)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.operator, self.threshold)
    }
}

/// Parsed query: a wine type plus conditions combined with AND
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedQuery {
    /// Partition the query runs against
    pub wine_type: WineType,
    /// Conditions in written order
    pub conditions: Vec<Condition>,
}

impl ParsedQuery {
    /// Creates a query with no conditions
    pub fn new(wine_type: WineType) -> Self {
        Self {
            wine_type,
            conditions: Vec::new(),
        }
    }
}
