//! Interactive browsing over the cellar
//!
//! A `FilterSession` accumulates filters; `report` turns sessions, query
//! results and aggregates into console text.

pub mod report;
mod session;

pub use session::{FilterSession, SessionView};
