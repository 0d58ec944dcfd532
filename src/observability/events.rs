//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events in a cellar session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Ingestion
    /// A CSV partition was read into memory
    DatasetLoaded,
    /// The query file was read
    QueryFileRead,

    // Query processing
    /// A query line parsed into conditions
    QueryParsed,
    /// A query line was rejected by the parser
    QueryRejected,
    /// A query finished filtering
    QuerySolved,

    // Browser session
    /// A filter was appended to the session
    FilterAdded,
    /// A filter was rejected, list unchanged
    FilterRejected,
    /// All filters were removed
    FiltersCleared,

    // Aggregation
    /// An aggregate was asked for over zero samples
    AggregateEmpty,
}

impl Event {
    /// Returns the event name as logged
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::QueryFileRead => "QUERY_FILE_READ",
            Event::QueryParsed => "QUERY_PARSED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QuerySolved => "QUERY_SOLVED",
            Event::FilterAdded => "FILTER_ADDED",
            Event::FilterRejected => "FILTER_REJECTED",
            Event::FiltersCleared => "FILTERS_CLEARED",
            Event::AggregateEmpty => "AGGREGATE_EMPTY",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::QueryRejected | Event::FilterRejected | Event::AggregateEmpty => Severity::Warn,
            Event::QueryParsed | Event::QuerySolved => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
