//! Wine sample record types
//!
//! A sample is one row of the red or white dataset: an id assigned in load
//! order, its base wine type and twelve numeric column values. Samples are
//! immutable once built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{StorageError, StorageResult};
use crate::schema::Column;

/// Partition selector
///
/// `All` is the union of the two base types and never tags a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineType {
    Red,
    White,
    All,
}

impl WineType {
    /// Returns the upper-case name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            WineType::Red => "RED",
            WineType::White => "WHITE",
            WineType::All => "ALL",
        }
    }

    /// Returns true for `Red` and `White`
    pub fn is_base(&self) -> bool {
        !matches!(self, WineType::All)
    }
}

impl fmt::Display for WineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WineType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(WineType::Red),
            "white" => Ok(WineType::White),
            "all" => Ok(WineType::All),
            other => Err(format!("Unknown wine type: '{}'", other)),
        }
    }
}

/// One measured wine sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WineSample {
    id: u32,
    wine_type: WineType,
    values: [f64; 12],
}

impl WineSample {
    /// Creates a sample from values in canonical column order.
    ///
    /// Fails if `wine_type` is `All`; a sample always has a base type.
    pub fn new(id: u32, wine_type: WineType, values: [f64; 12]) -> StorageResult<Self> {
        if !wine_type.is_base() {
            return Err(StorageError::UntypedSample { id });
        }
        Ok(Self {
            id,
            wine_type,
            values,
        })
    }

    /// Load-order identifier
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Base wine type
    pub fn wine_type(&self) -> WineType {
        self.wine_type
    }

    /// Value of a single column
    pub fn get(&self, column: Column) -> f64 {
        self.values[column.index()]
    }
}
