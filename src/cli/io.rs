//! JSON I/O handling for the browse loop
//!
//! - Input: one JSON object per stdin line
//! - Output: one JSON object per stdout line
//! - UTF-8 only

use std::io::{self, BufRead, ErrorKind, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read JSON requests from a line source.
///
/// Blank lines are skipped. A line that is not UTF-8 or not JSON yields an
/// `InvalidRequest` error and reading continues. Only a failed read is an
/// `IoError`.
pub fn read_requests<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<Value>> {
    reader
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map(|line| {
            let line = line.map_err(|e| match e.kind() {
                ErrorKind::InvalidData => {
                    CliError::invalid_request(format!("Request is not UTF-8: {}", e))
                }
                _ => CliError::from(e),
            })?;
            serde_json::from_str(&line).map_err(CliError::from)
        })
}

/// Write a success response
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *writer, &response).map_err(|e| CliError::io_error(e.to_string()))?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    serde_json::to_writer(&mut *writer, &response).map_err(|e| CliError::io_error(e.to_string()))?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write report text followed by a newline to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;

    Ok(())
}
