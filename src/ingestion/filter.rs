//! Import-time filters.
//!
//! Every filter means "include everything" when it is absent or empty; a [`YearRange`] of `(0, 0)`
//! is likewise unrestricted.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{StatsError, StatsResult};

/// Inclusive range of years. `YearRange::ALL` (`0..=0`) imposes no restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    pub start: u32,
    pub end: u32,
}

impl YearRange {
    /// No restriction.
    pub const ALL: YearRange = YearRange { start: 0, end: 0 };

    /// Inclusive range `start..=end`.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// `true` for `(0, 0)`.
    pub fn is_unrestricted(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    /// `true` if `year` is inside the range (or the range is unrestricted).
    pub fn contains(&self, year: u32) -> bool {
        self.is_unrestricted() || (self.start <= year && year <= self.end)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unrestricted() {
            f.write_str("all")
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Parses `""`, `"0"`, `"all"` (unrestricted), `"2015"` (single year) or `"2010-2015"`.
impl FromStr for YearRange {
    type Err = StatsError;

    fn from_str(s: &str) -> StatsResult<Self> {
        let s = s.trim();
        if s.is_empty() || s == "0" || s.eq_ignore_ascii_case("all") {
            return Ok(Self::ALL);
        }

        let parse_year = |raw: &str| {
            raw.trim().parse::<u32>().map_err(|_| {
                StatsError::invalid_argument(format!("invalid year '{}' in range '{s}'", raw.trim()))
            })
        };

        let range = match s.split_once('-') {
            Some((start, end)) => Self::new(parse_year(start)?, parse_year(end)?),
            None => {
                let year = parse_year(s)?;
                Self::new(year, year)
            }
        };

        if range.start > range.end {
            return Err(StatsError::invalid_argument(format!(
                "year range '{s}' starts after it ends"
            )));
        }
        Ok(range)
    }
}

/// Area, measure, and year filters applied while importing.
///
/// Area codes are matched exactly. Measure codenames are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportFilters {
    /// Allowed local authority codes; empty means all.
    pub areas: BTreeSet<String>,
    /// Allowed measure codenames; empty means all.
    pub measures: BTreeSet<String>,
    /// Allowed years.
    pub years: YearRange,
}

impl ImportFilters {
    /// Unrestricted filters.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to these area codes.
    pub fn with_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.areas = areas.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to these measure codenames (stored lowercased).
    pub fn with_measures<I, S>(mut self, measures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.measures = measures
            .into_iter()
            .map(|m| m.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Restrict to `years`.
    pub fn with_years(mut self, years: YearRange) -> Self {
        self.years = years;
        self
    }

    /// `true` if no filter restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.areas.is_empty() && self.measures.is_empty() && self.years.is_unrestricted()
    }

    /// `true` if `code` passes the area filter (exact match).
    pub fn includes_area(&self, code: &str) -> bool {
        self.areas.is_empty() || self.areas.contains(code)
    }

    /// `true` if `codename` passes the measure filter, ignoring case.
    pub fn includes_measure(&self, codename: &str) -> bool {
        if self.measures.is_empty() {
            return true;
        }
        let codename = codename.to_lowercase();
        self.measures.contains(&codename)
            || self.measures.iter().any(|m| m.to_lowercase() == codename)
    }

    /// `true` if `year` is inside the year range.
    pub fn includes_year(&self, year: u32) -> bool {
        self.years.contains(year)
    }
}

#[cfg(test)]
mod tests {
    use super::{ImportFilters, YearRange};
    use crate::error::StatsError;

    #[test]
    fn default_filters_include_everything() {
        let f = ImportFilters::default();
        assert!(f.is_unrestricted());
        assert!(f.includes_area("W06000023"));
        assert!(f.includes_measure("pop"));
        assert!(f.includes_year(1850));
    }

    #[test]
    fn measure_filter_is_case_insensitive() {
        let f = ImportFilters::all().with_measures(["Pop"]);
        assert!(f.includes_measure("POP"));
        assert!(f.includes_measure("pop"));
        assert!(!f.includes_measure("dens"));

        let mut raw = ImportFilters::all();
        raw.measures.insert("DENS".to_string());
        assert!(raw.includes_measure("dens"));
    }

    #[test]
    fn area_filter_is_exact() {
        let f = ImportFilters::all().with_areas(["W06000023"]);
        assert!(f.includes_area("W06000023"));
        assert!(!f.includes_area("w06000023"));
    }

    #[test]
    fn year_range_is_inclusive() {
        let f = ImportFilters::all().with_years(YearRange::new(2015, 2020));
        assert!(f.includes_year(2015));
        assert!(f.includes_year(2020));
        assert!(!f.includes_year(2014));
        assert!(!f.includes_year(2021));
    }

    #[test]
    fn year_range_parses_common_forms() {
        assert_eq!("0".parse::<YearRange>().unwrap(), YearRange::ALL);
        assert_eq!("ALL".parse::<YearRange>().unwrap(), YearRange::ALL);
        assert_eq!("".parse::<YearRange>().unwrap(), YearRange::ALL);
        assert_eq!("2015".parse::<YearRange>().unwrap(), YearRange::new(2015, 2015));
        assert_eq!(
            "2010-2015".parse::<YearRange>().unwrap(),
            YearRange::new(2010, 2015)
        );
    }

    #[test]
    fn year_range_rejects_bad_input() {
        for bad in ["20x0", "2015-2010", "2010-", "abc-def"] {
            let err = bad.parse::<YearRange>().unwrap_err();
            assert!(matches!(err, StatsError::InvalidArgument { .. }), "{bad}");
        }
    }
}
