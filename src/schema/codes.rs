//! Column-code table for the query mini-language
//!
//! Every column has exactly one short code. The built-in table uses
//! [`Column::default_code`]; a replacement table is a JSON object keyed by
//! code and valued by a column's display or header name:
//!
//! ```text
//! { "f_acid": "fixed acidity", "qual": "Quality", ... }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use super::column::Column;
use super::errors::{SchemaError, SchemaResult};

/// Case-insensitive 1:1 mapping between codes and columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCodes {
    by_code: HashMap<String, Column>,
    by_column: [String; 12],
}

impl ColumnCodes {
    /// Builds a table from `(code, column)` pairs.
    ///
    /// Fails unless every column appears exactly once.
    pub fn from_pairs<I, S>(pairs: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = (S, Column)>,
        S: AsRef<str>,
    {
        let mut by_code = HashMap::new();
        let mut by_column: [Option<String>; 12] = Default::default();

        for (code, column) in pairs {
            let code = code.as_ref().trim().to_lowercase();
            if !is_valid_code(&code) {
                return Err(SchemaError::InvalidCode(code));
            }
            if by_code.contains_key(&code) {
                return Err(SchemaError::DuplicateCode(code));
            }
            let slot = &mut by_column[column.index()];
            if slot.is_some() {
                return Err(SchemaError::DuplicateColumn(
                    column.display_name().to_string(),
                ));
            }
            *slot = Some(code.clone());
            by_code.insert(code, column);
        }

        let mut codes: [String; 12] = Default::default();
        for column in Column::ALL {
            codes[column.index()] = by_column[column.index()]
                .take()
                .ok_or_else(|| SchemaError::MissingColumn(column.display_name().to_string()))?;
        }

        Ok(Self {
            by_code,
            by_column: codes,
        })
    }

    /// Loads a replacement table from a JSON file
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;

        // BTreeMap keeps error reporting deterministic
        let raw: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|source| SchemaError::Json {
                path: path.display().to_string(),
                source,
            })?;

        let mut pairs = Vec::with_capacity(raw.len());
        for (code, name) in raw {
            let column = Column::from_name(&name).ok_or_else(|| SchemaError::UnknownColumn {
                code: code.clone(),
                name: name.clone(),
            })?;
            pairs.push((code, column));
        }

        Self::from_pairs(pairs)
    }

    /// Resolves a code (case-insensitive)
    pub fn resolve(&self, code: &str) -> Option<Column> {
        self.by_code.get(&code.to_lowercase()).copied()
    }

    /// Returns the code for a column
    pub fn code_for(&self, column: Column) -> &str {
        &self.by_column[column.index()]
    }
}

impl Default for ColumnCodes {
    fn default() -> Self {
        let by_code = Column::ALL
            .into_iter()
            .map(|c| (c.default_code().to_string(), c))
            .collect();
        let by_column = Column::ALL.map(|c| c.default_code().to_string());
        Self { by_code, by_column }
    }
}

fn is_valid_code(code: &str) -> bool {
    let mut chars = code.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
