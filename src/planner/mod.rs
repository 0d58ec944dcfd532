//! Query planner for winecellar
//!
//! Turns query-language lines and filter-form input into typed conditions.
//!
//! # Design Principles
//!
//! - Operators are validated when a condition is built, never when it runs
//! - Conditions combine with AND only; `or` is a synonym of `and`
//! - Every failure is a distinguishable error, never a sentinel value
//! - A rejected line does not affect any other line

mod ast;
mod errors;
mod parser;

pub use ast::{Condition, Operator, ParsedQuery};
pub use errors::{QueryError, QueryErrorCode, QueryResult, Severity};
pub use parser::QueryParser;
