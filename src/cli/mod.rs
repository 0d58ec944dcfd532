//! CLI module for winecellar
//!
//! Provides command-line interface for:
//! - query: Run the query file against both datasets
//! - questions: Answer the fixed console questions
//! - stats: Print the statistics table for a filtered partition
//! - browse: Filter-browser session over JSON lines

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    browse, browse_loop, query, questions, render_stats, run, run_command, run_queries, stats,
    Config,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_requests, write_error, write_response, write_text};
