//! Observability for the cellar
//!
//! Structured JSON-lines logging of typed lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use winecellar::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::DatasetLoaded, &[("wine_type", "RED"), ("samples", "1599")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::DatasetLoaded, &[("wine_type", "RED"), ("samples", "3")]);
    }
}
