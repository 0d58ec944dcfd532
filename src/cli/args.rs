//! CLI argument definitions using clap
//!
//! Commands:
//! - winecellar [--config <path>] query
//! - winecellar [--config <path>] questions
//! - winecellar [--config <path>] stats --type <t> [--where "<conditions>"]
//! - winecellar [--config <path>] browse

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::storage::WineType;

/// winecellar - query and summarize the Vinho Verde wine quality datasets
#[derive(Parser, Debug)]
#[command(name = "winecellar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every query in the query file and print the matches
    Query,

    /// Answer the fixed console questions
    Questions,

    /// Print the statistics table for a filtered partition
    Stats {
        /// Wine type: red, white or all
        #[arg(long = "type", default_value = "all")]
        wine_type: WineType,

        /// Conditions, e.g. "qual>6 and alc>=11"
        #[arg(long = "where")]
        where_clause: Option<String>,
    },

    /// Read filter-browser requests as JSON lines from stdin
    Browse,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
