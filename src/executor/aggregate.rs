//! Aggregate statistics over a sample subset
//!
//! Every aggregate is a pure function of the subset it is given. Minimum,
//! maximum and average are undefined on an empty subset and fail with
//! `WINE_EMPTY_INPUT`; extremum extraction on an empty subset is empty.

use serde::Serialize;

use super::errors::{ExecutorError, ExecutorResult};
use crate::schema::Column;
use crate::storage::WineSample;

/// Which end of a column's range to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Min,
    Max,
}

/// Minimum, maximum and mean of one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStatistics {
    pub column: Column,
    pub minimum: f64,
    pub maximum: f64,
    pub average: f64,
}

/// Running min/max/sum for one column
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    min: f64,
    max: f64,
    sum: f64,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
        }
    }

    fn push(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
    }
}

/// Stateless aggregates over a borrowed subset
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'s, 'a> {
    samples: &'s [&'a WineSample],
}

impl<'s, 'a> Aggregator<'s, 'a> {
    /// Creates an aggregator over `samples`
    pub fn new(samples: &'s [&'a WineSample]) -> Self {
        Self { samples }
    }

    /// Number of samples in the subset
    pub fn count(&self) -> usize {
        self.samples.len()
    }

    /// Smallest value of `column`
    pub fn minimum(&self, column: Column) -> ExecutorResult<f64> {
        self.values(column)
            .reduce(f64::min)
            .ok_or_else(|| ExecutorError::empty_input("minimum", Some(column)))
    }

    /// Largest value of `column`
    pub fn maximum(&self, column: Column) -> ExecutorResult<f64> {
        self.values(column)
            .reduce(f64::max)
            .ok_or_else(|| ExecutorError::empty_input("maximum", Some(column)))
    }

    /// Arithmetic mean of `column`
    pub fn average(&self, column: Column) -> ExecutorResult<f64> {
        if self.samples.is_empty() {
            return Err(ExecutorError::empty_input("average", Some(column)));
        }
        let sum: f64 = self.values(column).sum();
        Ok(sum / self.samples.len() as f64)
    }

    /// Every sample whose `column` equals the subset's extremum.
    ///
    /// Ties are all kept, in subset order.
    pub fn records_at_extreme(&self, column: Column, which: Extreme) -> Vec<&'a WineSample> {
        let target = match which {
            Extreme::Min => self.minimum(column),
            Extreme::Max => self.maximum(column),
        };
        let Ok(target) = target else {
            return Vec::new();
        };

        self.samples
            .iter()
            .copied()
            .filter(|s| s.get(column) == target)
            .collect()
    }

    /// Min/max/average for each column, in one pass over the subset.
    ///
    /// Averages are divided once, after the pass.
    pub fn statistics(&self, columns: &[Column]) -> ExecutorResult<Vec<ColumnStatistics>> {
        if self.samples.is_empty() {
            return Err(ExecutorError::empty_input("statistics", None));
        }

        let mut accumulators = vec![Accumulator::new(); columns.len()];
        for sample in self.samples {
            for (acc, column) in accumulators.iter_mut().zip(columns) {
                acc.push(sample.get(*column));
            }
        }

        let n = self.samples.len() as f64;
        Ok(columns
            .iter()
            .zip(accumulators)
            .map(|(column, acc)| ColumnStatistics {
                column: *column,
                minimum: acc.min,
                maximum: acc.max,
                average: acc.sum / n,
            })
            .collect())
    }

    fn values(&self, column: Column) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(move |s| s.get(column))
    }
}
