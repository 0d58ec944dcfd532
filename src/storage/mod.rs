//! Wine sample storage
//!
//! Holds the two base datasets in memory for the lifetime of the process.
//!
//! # Invariants
//!
//! - Every sample belongs to exactly one base type (RED or WHITE)
//! - Ids are assigned in load order and never reused
//! - ALL is derived from the base partitions and cannot drift from them
//! - Nothing is mutated after load

mod cellar;
mod errors;
mod loader;
mod record;

pub use cellar::WineCellar;
pub use errors::{StorageError, StorageResult};
pub use loader::{load_samples, read_samples};
pub use record::{WineSample, WineType};
