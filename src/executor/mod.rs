//! Query execution over the wine cellar
//!
//! # Execution Flow
//!
//! 1. Bind a parsed query to its cellar partition
//! 2. Filter samples strictly according to conditions (AND only)
//! 3. Return matches in partition order
//!
//! Aggregates run over any subset produced by a query. They never mutate
//! it and fail loudly on empty input.

mod aggregate;
mod errors;
mod filters;
mod query;

pub use aggregate::{Aggregator, ColumnStatistics, Extreme};
pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult};
pub use filters::ConditionFilter;
pub use query::Query;
