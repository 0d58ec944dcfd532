//! winecellar - query language and statistics over the Vinho Verde wine
//! quality datasets

pub mod browser;
pub mod cli;
pub mod executor;
pub mod observability;
pub mod planner;
pub mod schema;
pub mod storage;
