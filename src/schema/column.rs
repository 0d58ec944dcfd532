//! The fixed column set of a wine sample.
//!
//! Columns are listed in canonical order, which is the order of the
//! source CSV files and of every report and statistics table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the twelve physicochemical / sensory measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    FixedAcidity,
    VolatileAcidity,
    CitricAcid,
    ResidualSugar,
    Chlorides,
    FreeSulfurDioxide,
    TotalSulfurDioxide,
    Density,
    PH,
    Sulphates,
    Alcohol,
    Quality,
}

impl Column {
    /// All columns in canonical order
    pub const ALL: [Column; 12] = [
        Column::FixedAcidity,
        Column::VolatileAcidity,
        Column::CitricAcid,
        Column::ResidualSugar,
        Column::Chlorides,
        Column::FreeSulfurDioxide,
        Column::TotalSulfurDioxide,
        Column::Density,
        Column::PH,
        Column::Sulphates,
        Column::Alcohol,
        Column::Quality,
    ];

    /// Position of the column in canonical order
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Human-readable name, as offered by the filter form
    pub fn display_name(&self) -> &'static str {
        match self {
            Column::FixedAcidity => "Fixed Acidity",
            Column::VolatileAcidity => "Volatile Acidity",
            Column::CitricAcid => "Citric Acid",
            Column::ResidualSugar => "Residual Sugar",
            Column::Chlorides => "Chlorides",
            Column::FreeSulfurDioxide => "Free Sulfur Dioxide",
            Column::TotalSulfurDioxide => "Total Sulfur Dioxide",
            Column::Density => "Density",
            Column::PH => "PH",
            Column::Sulphates => "Sulphates",
            Column::Alcohol => "Alcohol",
            Column::Quality => "Quality",
        }
    }

    /// Header name used by the UCI CSV files
    pub fn header_name(&self) -> &'static str {
        match self {
            Column::FixedAcidity => "fixed acidity",
            Column::VolatileAcidity => "volatile acidity",
            Column::CitricAcid => "citric acid",
            Column::ResidualSugar => "residual sugar",
            Column::Chlorides => "chlorides",
            Column::FreeSulfurDioxide => "free sulfur dioxide",
            Column::TotalSulfurDioxide => "total sulfur dioxide",
            Column::Density => "density",
            Column::PH => "pH",
            Column::Sulphates => "sulphates",
            Column::Alcohol => "alcohol",
            Column::Quality => "quality",
        }
    }

    /// Built-in query-language code
    pub fn default_code(&self) -> &'static str {
        match self {
            Column::FixedAcidity => "fa",
            Column::VolatileAcidity => "va",
            Column::CitricAcid => "ca",
            Column::ResidualSugar => "rs",
            Column::Chlorides => "chl",
            Column::FreeSulfurDioxide => "fsd",
            Column::TotalSulfurDioxide => "tsd",
            Column::Density => "den",
            Column::PH => "ph",
            Column::Sulphates => "sul",
            Column::Alcohol => "alc",
            Column::Quality => "qual",
        }
    }

    /// Short label used in console sample listings
    pub fn short_label(&self) -> &'static str {
        match self {
            Column::FixedAcidity => "f_acid",
            Column::VolatileAcidity => "v_acid",
            Column::CitricAcid => "c_acid",
            Column::ResidualSugar => "r_sugar",
            Column::Chlorides => "chlorid",
            Column::FreeSulfurDioxide => "f_sulf",
            Column::TotalSulfurDioxide => "t_sulf",
            Column::Density => "dens",
            Column::PH => "pH",
            Column::Sulphates => "sulph",
            Column::Alcohol => "alc",
            Column::Quality => "qual",
        }
    }

    /// Resolves a display or header name.
    ///
    /// Matching ignores case and collapses runs of whitespace, so
    /// `"free  sulfur dioxide"` and `"Free Sulfur Dioxide"` both resolve.
    pub fn from_name(name: &str) -> Option<Column> {
        let wanted = normalize_name(name);
        Column::ALL.into_iter().find(|c| {
            normalize_name(c.display_name()) == wanted || normalize_name(c.header_name()) == wanted
        })
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.index(), i);
        }
    }

    #[test]
    fn test_from_name_accepts_display_and_header() {
        assert_eq!(Column::from_name("Fixed Acidity"), Some(Column::FixedAcidity));
        assert_eq!(Column::from_name("fixed acidity"), Some(Column::FixedAcidity));
        assert_eq!(Column::from_name("  Free   Sulfur Dioxide "), Some(Column::FreeSulfurDioxide));
        assert_eq!(Column::from_name("pH"), Some(Column::PH));
        assert_eq!(Column::from_name("PH"), Some(Column::PH));
    }

    #[test]
    fn test_from_name_unknown() {
        assert_eq!(Column::from_name("Colour"), None);
        assert_eq!(Column::from_name(""), None);
    }

    #[test]
    fn test_default_codes_are_unique() {
        let mut codes: Vec<_> = Column::ALL.iter().map(|c| c.default_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), Column::ALL.len());
    }
}
