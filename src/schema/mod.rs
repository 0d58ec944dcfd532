//! Column schema for wine samples
//!
//! The column set is fixed: twelve numeric measurements in canonical order.
//! This module owns the column enum and the query-language code table.
//!
//! # Design Principles
//!
//! - No runtime property lookup: `column -> value` is a `match`
//! - One code per column, validated when the table is built
//! - Name matching is case-insensitive

mod codes;
mod column;
mod errors;

pub use codes::ColumnCodes;
pub use column::Column;
pub use errors::{SchemaError, SchemaResult};
