//! Logical field → source column/key mapping.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Logical fields an importer may need to locate in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceColumn {
    /// Local authority code.
    AuthCode,
    /// Local authority name in English.
    AuthNameEng,
    /// Local authority name in Welsh.
    AuthNameCym,
    /// Measure codename.
    MeasureCode,
    /// Measure label.
    MeasureName,
    /// Year of an observation.
    Year,
    /// Observed value.
    Value,
    /// Codename of the one measure a file covers, when records don't carry one.
    SingleMeasureCode,
    /// Label of the one measure a file covers, when records don't carry one.
    SingleMeasureName,
}

impl fmt::Display for SourceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AuthCode => "AUTH_CODE",
            Self::AuthNameEng => "AUTH_NAME_ENG",
            Self::AuthNameCym => "AUTH_NAME_CYM",
            Self::MeasureCode => "MEASURE_CODE",
            Self::MeasureName => "MEASURE_NAME",
            Self::Year => "YEAR",
            Self::Value => "VALUE",
            Self::SingleMeasureCode => "SINGLE_MEASURE_CODE",
            Self::SingleMeasureName => "SINGLE_MEASURE_NAME",
        };
        f.write_str(s)
    }
}

/// Maps [`SourceColumn`]s to the literal column header or JSON key a dataset uses.
///
/// For the single-measure entries the mapped string is the measure's codename/label itself rather
/// than a key to look up.
///
/// Serializes as a flat JSON object, e.g. `{"AUTH_CODE": "Localauthority_Code", ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    columns: BTreeMap<SourceColumn, String>,
}

impl ColumnMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: SourceColumn, name: impl Into<String>) -> Self {
        self.insert(column, name);
        self
    }

    /// Map `column` to `name`, replacing any previous entry.
    pub fn insert(&mut self, column: SourceColumn, name: impl Into<String>) {
        self.columns.insert(column, name.into());
    }

    /// Mapped name for `column`, if any.
    pub fn get(&self, column: SourceColumn) -> Option<&str> {
        self.columns.get(&column).map(String::as_str)
    }

    /// Mapped name for `column`, or a structural error naming the missing field.
    pub fn require(&self, column: SourceColumn) -> StatsResult<&str> {
        self.get(column).ok_or_else(|| {
            StatsError::structural(format!("column mapping has no entry for {column}"))
        })
    }

    /// Number of mapped fields.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// `true` if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Fails unless at least `min` fields are mapped.
    pub(crate) fn ensure_len(&self, min: usize, what: &str) -> StatsResult<()> {
        if self.len() < min {
            return Err(StatsError::structural(format!(
                "{what} needs at least {min} mapped columns, got {}",
                self.len()
            )));
        }
        Ok(())
    }
}

impl FromIterator<(SourceColumn, String)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (SourceColumn, String)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
