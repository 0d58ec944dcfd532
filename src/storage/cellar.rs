//! In-memory wine sample store
//!
//! Samples are held in one vector, red first then white. The red, white
//! and ALL partitions are slices of that vector, so ALL is always exactly
//! the red partition followed by the white one.

use std::collections::HashSet;
use std::path::Path;

use super::errors::{StorageError, StorageResult};
use super::loader::load_samples;
use super::record::{WineSample, WineType};

/// Read-only store of the red and white datasets
#[derive(Debug, Clone, Default)]
pub struct WineCellar {
    samples: Vec<WineSample>,
    red_len: usize,
}

impl WineCellar {
    /// Builds a cellar from already-parsed partitions.
    ///
    /// Fails if a sample is filed under the wrong type or two samples share
    /// an id.
    pub fn new(red: Vec<WineSample>, white: Vec<WineSample>) -> StorageResult<Self> {
        check_partition(&red, WineType::Red)?;
        check_partition(&white, WineType::White)?;

        let red_len = red.len();
        let mut samples = red;
        samples.extend(white);
        check_unique_ids(&samples)?;

        Ok(Self { samples, red_len })
    }

    /// Loads both datasets from CSV files.
    ///
    /// Red samples are numbered from 1, white samples continue the sequence.
    pub fn load(red_path: &Path, white_path: &Path, delimiter: u8) -> StorageResult<Self> {
        let red = load_samples(red_path, WineType::Red, 1, delimiter)?;
        let next_id = u32::try_from(red.len())
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or(StorageError::IdOverflow)?;
        let white = load_samples(white_path, WineType::White, next_id, delimiter)?;
        Self::new(red, white)
    }

    /// Returns the partition for a wine type
    pub fn samples(&self, wine_type: WineType) -> &[WineSample] {
        match wine_type {
            WineType::Red => &self.samples[..self.red_len],
            WineType::White => &self.samples[self.red_len..],
            WineType::All => &self.samples,
        }
    }

    /// Number of samples in a partition
    pub fn count(&self, wine_type: WineType) -> usize {
        self.samples(wine_type).len()
    }

    /// Returns true if no samples were loaded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn check_partition(samples: &[WineSample], expected: WineType) -> StorageResult<()> {
    match samples.iter().find(|s| s.wine_type() != expected) {
        Some(s) => Err(StorageError::WrongPartition {
            id: s.id(),
            expected: expected.as_str(),
        }),
        None => Ok(()),
    }
}

fn check_unique_ids(samples: &[WineSample]) -> StorageResult<()> {
    let mut seen = HashSet::with_capacity(samples.len());
    match samples.iter().find(|s| !seen.insert(s.id())) {
        Some(s) => Err(StorageError::DuplicateId { id: s.id() }),
        None => Ok(()),
    }
}
