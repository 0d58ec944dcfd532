//! Query bound to a sample partition
//!
//! A query is a parsed condition list attached to the samples it runs
//! against. Solving is a stable filter: the output keeps source order and
//! the source is never modified.

use crate::planner::{Condition, ParsedQuery};
use crate::storage::{WineCellar, WineSample, WineType};

use super::filters::ConditionFilter;

/// Conditions bound to a source collection
#[derive(Debug, Clone)]
pub struct Query<'a> {
    source: &'a [WineSample],
    conditions: Vec<Condition>,
    wine_type: WineType,
}

impl<'a> Query<'a> {
    /// Creates a query over `source`.
    ///
    /// `wine_type` is kept for reporting; `source` is not re-filtered by it.
    pub fn new(source: &'a [WineSample], conditions: Vec<Condition>, wine_type: WineType) -> Self {
        Self {
            source,
            conditions,
            wine_type,
        }
    }

    /// Binds a parsed query to the matching cellar partition
    pub fn bind(cellar: &'a WineCellar, parsed: &ParsedQuery) -> Self {
        Self::new(
            cellar.samples(parsed.wine_type),
            parsed.conditions.clone(),
            parsed.wine_type,
        )
    }

    /// Returns every source sample satisfying all conditions, in source order.
    ///
    /// Deterministic: same source + same conditions = same result.
    pub fn solve(&self) -> Vec<&'a WineSample> {
        self.source
            .iter()
            .filter(|s| ConditionFilter::matches(s, &self.conditions))
            .collect()
    }

    /// Wine type the query was built for
    pub fn wine_type(&self) -> WineType {
        self.wine_type
    }

    /// Conditions in written order
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Size of the source collection
    pub fn source_len(&self) -> usize {
        self.source.len()
    }
}
