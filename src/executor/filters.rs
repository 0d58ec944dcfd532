//! Condition filtering for query execution
//!
//! Filters samples strictly according to conditions.
//! No tolerance, no coercion, AND only.

use crate::planner::Condition;
use crate::storage::WineSample;

/// Evaluates condition lists against samples
pub struct ConditionFilter;

impl ConditionFilter {
    /// Checks if a sample matches all conditions.
    ///
    /// An empty list matches every sample.
    pub fn matches(sample: &WineSample, conditions: &[Condition]) -> bool {
        conditions.iter().all(|c| c.matches(sample))
    }
}
