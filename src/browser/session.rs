//! Filter-browser session state
//!
//! A session is plain data: the selected wine type and the filters added
//! so far. Every view is recomputed from scratch through a fresh `Query`,
//! so nothing cached can go stale.

use serde::Serialize;

use crate::executor::{Aggregator, ColumnStatistics, Query};
use crate::observability::{log_event_with_fields, Event};
use crate::planner::{Condition, QueryParser, QueryResult};
use crate::schema::Column;
use crate::storage::{WineCellar, WineSample, WineType};

/// Filters and wine-type selection for one browsing session
#[derive(Debug, Clone)]
pub struct FilterSession {
    parser: QueryParser,
    wine_type: WineType,
    filters: Vec<Condition>,
}

/// Snapshot of what a session currently shows
#[derive(Debug, Clone, Serialize)]
pub struct SessionView<'a> {
    pub wine_type: WineType,
    pub filters: Vec<Condition>,
    pub samples: Vec<&'a WineSample>,
    /// `None` when no sample matches
    pub statistics: Option<Vec<ColumnStatistics>>,
    pub shown: usize,
    pub total: usize,
}

impl FilterSession {
    /// Creates a session over ALL wines with no filters
    pub fn new(parser: QueryParser) -> Self {
        Self {
            parser,
            wine_type: WineType::All,
            filters: Vec::new(),
        }
    }

    /// Appends a filter built from form input.
    ///
    /// On any parse failure the filter list is left unchanged.
    pub fn add_filter(
        &mut self,
        column_name: &str,
        operator_symbol: &str,
        raw_value: &str,
    ) -> QueryResult<Condition> {
        match self.parser.parse_filter(column_name, operator_symbol, raw_value) {
            Ok(condition) => {
                self.push_condition(condition);
                Ok(condition)
            }
            Err(err) => {
                log_event_with_fields(
                    Event::FilterRejected,
                    &[("code", err.code().code()), ("message", err.message())],
                );
                Err(err)
            }
        }
    }

    /// Appends an already validated condition
    pub fn push_condition(&mut self, condition: Condition) {
        self.filters.push(condition);
        let rendered = condition.to_string();
        let count = self.filters.len().to_string();
        log_event_with_fields(
            Event::FilterAdded,
            &[("condition", rendered.as_str()), ("filters", count.as_str())],
        );
    }

    /// Removes every filter
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        log_event_with_fields(Event::FiltersCleared, &[("wine_type", self.wine_type.as_str())]);
    }

    /// Switches the partition the filters run against
    pub fn select_wine_type(&mut self, wine_type: WineType) {
        self.wine_type = wine_type;
    }

    pub fn wine_type(&self) -> WineType {
        self.wine_type
    }

    pub fn filters(&self) -> &[Condition] {
        &self.filters
    }

    /// Solves the current filters against `cellar` and summarizes the result
    pub fn view<'a>(&self, cellar: &'a WineCellar) -> SessionView<'a> {
        let query = Query::new(
            cellar.samples(self.wine_type),
            self.filters.clone(),
            self.wine_type,
        );
        let samples = query.solve();

        let statistics = match Aggregator::new(&samples).statistics(&Column::ALL) {
            Ok(stats) => Some(stats),
            Err(err) => {
                log_event_with_fields(
                    Event::AggregateEmpty,
                    &[("message", err.message()), ("wine_type", self.wine_type.as_str())],
                );
                None
            }
        };

        SessionView {
            wine_type: self.wine_type,
            filters: self.filters.clone(),
            shown: samples.len(),
            total: query.source_len(),
            samples,
            statistics,
        }
    }
}

impl Default for FilterSession {
    fn default() -> Self {
        Self::new(QueryParser::default())
    }
}
