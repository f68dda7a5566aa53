//! A local authority with its display names and measures.

use std::collections::BTreeMap;

use crate::error::{StatsError, StatsResult};

use super::Measure;

/// A local-authority entity.
///
/// Names are keyed by lowercase three-letter language code (`eng`, `cym`, ...). Measures are keyed
/// by lowercase codename and exclusively owned by the area.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    code: String,
    names: BTreeMap<String, String>,
    measures: BTreeMap<String, Measure>,
}

impl Area {
    /// Create an area with no names and no measures.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            names: BTreeMap::new(),
            measures: BTreeMap::new(),
        }
    }

    /// Local authority code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Name of the area in `lang` (case-insensitive language code).
    pub fn name(&self, lang: &str) -> StatsResult<&str> {
        let lang = lang.to_lowercase();
        self.names
            .get(&lang)
            .map(String::as_str)
            .ok_or_else(|| StatsError::not_found(format!("no name found for language {lang}")))
    }

    /// Set the name of the area in `lang`.
    ///
    /// `lang` must be exactly three alphabetic characters; it is stored lowercased.
    pub fn set_name(&mut self, lang: &str, name: impl Into<String>) -> StatsResult<()> {
        if lang.chars().count() != 3 || !lang.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(StatsError::invalid_argument(format!(
                "language code must be three alphabetical letters only (got '{lang}')"
            )));
        }
        self.names.insert(lang.to_ascii_lowercase(), name.into());
        Ok(())
    }

    /// All names, ordered by language code.
    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// Measure with `codename` (case-insensitive).
    pub fn measure(&self, codename: &str) -> StatsResult<&Measure> {
        let key = codename.to_lowercase();
        self.measures
            .get(&key)
            .ok_or_else(|| StatsError::not_found(format!("no measure found matching {codename}")))
    }

    /// Mutable access to the measure with `codename` (case-insensitive).
    pub fn measure_mut(&mut self, codename: &str) -> StatsResult<&mut Measure> {
        let key = codename.to_lowercase();
        self.measures
            .get_mut(&key)
            .ok_or_else(|| StatsError::not_found(format!("no measure found matching {codename}")))
    }

    /// Insert `measure` under the lowercased `codename`, merging with any measure already there.
    pub fn set_measure(&mut self, codename: &str, measure: Measure) {
        let key = codename.to_lowercase();
        match self.measures.get_mut(&key) {
            Some(existing) => existing.merge(measure),
            None => {
                self.measures.insert(key, measure);
            }
        }
    }

    /// All measures keyed by lowercase codename.
    pub fn measures(&self) -> &BTreeMap<String, Measure> {
        &self.measures
    }

    /// Number of distinct measures.
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    /// `true` if the area has no measures.
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Merge `incoming` into this area: names and measures from `incoming` win per key, entries
    /// only present here are kept. Measures with the same codename are merged reading by reading.
    pub fn merge(&mut self, incoming: Area) {
        self.names.extend(incoming.names);
        for (codename, measure) in incoming.measures {
            self.set_measure(&codename, measure);
        }
    }
}
