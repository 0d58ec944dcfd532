//! CSV dataset loader
//!
//! Reads a headered wine-quality CSV (the UCI files are `;`-delimited)
//! into samples of one base wine type. Columns are located by header name,
//! so their order in the file does not matter; extra columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::errors::{StorageError, StorageResult};
use super::record::{WineSample, WineType};
use crate::schema::Column;

/// Loads all samples from a CSV file.
///
/// Ids are assigned sequentially starting at `first_id`.
pub fn load_samples(
    path: &Path,
    wine_type: WineType,
    first_id: u32,
    delimiter: u8,
) -> StorageResult<Vec<WineSample>> {
    let file = File::open(path).map_err(|source| StorageError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_samples(file, &path.display().to_string(), wine_type, first_id, delimiter)
}

/// Reads samples from any reader; `source_name` is used in errors only.
pub fn read_samples<R: Read>(
    reader: R,
    source_name: &str,
    wine_type: WineType,
    first_id: u32,
    delimiter: u8,
) -> StorageResult<Vec<WineSample>> {
    let csv_err = |source: csv::Error| StorageError::Csv {
        path: source_name.to_string(),
        source,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let positions = column_positions(&headers, source_name)?;

    let mut samples = Vec::new();
    let mut next_id = first_id;

    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_err)?;

        let mut values = [0.0; 12];
        for column in Column::ALL {
            let raw = record.get(positions[column.index()]).unwrap_or("");
            values[column.index()] = parse_cell(raw).ok_or_else(|| StorageError::InvalidValue {
                path: source_name.to_string(),
                row: row + 1,
                column: column.header_name().to_string(),
                value: raw.to_string(),
            })?;
        }

        samples.push(WineSample::new(next_id, wine_type, values)?);
        next_id = next_id.checked_add(1).ok_or(StorageError::IdOverflow)?;
    }

    Ok(samples)
}

/// Maps each column to its field position in the header
fn column_positions(headers: &StringRecord, source_name: &str) -> StorageResult<[usize; 12]> {
    let mut positions = [0usize; 12];
    for column in Column::ALL {
        positions[column.index()] = headers
            .iter()
            .position(|h| Column::from_name(h) == Some(column))
            .ok_or_else(|| StorageError::MissingColumn {
                path: source_name.to_string(),
                column: column.header_name().to_string(),
            })?;
    }
    Ok(positions)
}

fn parse_cell(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
