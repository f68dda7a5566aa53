//! A single statistical indicator tracked across years.

use std::collections::BTreeMap;

use crate::error::{StatsError, StatsResult};

/// A named timeseries of readings keyed by year.
///
/// The codename is lowercased once at construction and never re-derived. Readings are kept in
/// year order, so "first" and "last" always mean the smallest and largest year, regardless of
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    codename: String,
    label: String,
    readings: BTreeMap<u32, f64>,
}

impl Measure {
    /// Create an empty measure. `codename` is normalized to lowercase; `label` is kept verbatim.
    pub fn new(codename: impl AsRef<str>, label: impl Into<String>) -> Self {
        Self {
            codename: codename.as_ref().to_lowercase(),
            label: label.into(),
            readings: BTreeMap::new(),
        }
    }

    /// Lowercase codename.
    pub fn codename(&self) -> &str {
        &self.codename
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Value recorded for `year`.
    pub fn value(&self, year: u32) -> StatsResult<f64> {
        self.readings
            .get(&year)
            .copied()
            .ok_or_else(|| StatsError::not_found(format!("no value found for year {year}")))
    }

    /// Insert or overwrite the reading for `year`.
    pub fn set_value(&mut self, year: u32, value: f64) {
        self.readings.insert(year, value);
    }

    /// Number of distinct years with data.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// `true` if the measure has no readings.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Iterate `(year, value)` pairs in chronological order.
    pub fn readings(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.readings.iter().map(|(year, value)| (*year, *value))
    }

    /// Arithmetic mean of all readings, or `0.0` when there are none.
    pub fn average(&self) -> f64 {
        if self.readings.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.readings.values().sum();
        sum / self.readings.len() as f64
    }

    /// Value at the last year minus value at the first year, or `0.0` with fewer than two readings.
    pub fn difference(&self) -> f64 {
        match (self.first(), self.last()) {
            (Some((first_year, first)), Some((last_year, last))) if first_year != last_year => {
                last - first
            }
            _ => 0.0,
        }
    }

    /// [`Self::difference`] as a percentage of the first year's value.
    ///
    /// Returns `0.0` whenever the raw difference is exactly zero.
    pub fn difference_as_percentage(&self) -> f64 {
        let diff = self.difference();
        if diff == 0.0 {
            return 0.0;
        }
        match self.first() {
            Some((_, first)) => diff / first * 100.0,
            None => 0.0,
        }
    }

    /// Merge `incoming` into this measure.
    ///
    /// Readings present in `incoming` win on a year collision; years only present here are kept.
    /// The label of `incoming` replaces this one.
    pub fn merge(&mut self, incoming: Measure) {
        self.label = incoming.label;
        self.readings.extend(incoming.readings);
    }

    fn first(&self) -> Option<(u32, f64)> {
        self.readings.first_key_value().map(|(y, v)| (*y, *v))
    }

    fn last(&self) -> Option<(u32, f64)> {
        self.readings.last_key_value().map(|(y, v)| (*y, *v))
    }
}
