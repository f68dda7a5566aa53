//! Top-level registry of areas.

use std::collections::BTreeMap;
use std::io::Read;

use crate::error::{StatsError, StatsResult};
use crate::ingestion::{self, ColumnMapping, ImportFilters, ImportStats, SourceFormat};

use super::Area;

/// All imported areas, keyed by local authority code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaStore {
    areas: BTreeMap<String, Area>,
}

impl AreaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `area` under `code`, merging with an existing area of the same code.
    ///
    /// Names and measures from `area` win per key; anything only present in the stored area is
    /// kept.
    pub fn set_area(&mut self, code: &str, area: Area) {
        match self.areas.get_mut(code) {
            Some(existing) => existing.merge(area),
            None => {
                self.areas.insert(code.to_string(), area);
            }
        }
    }

    /// Area with `code`.
    pub fn area(&self, code: &str) -> StatsResult<&Area> {
        self.areas
            .get(code)
            .ok_or_else(|| StatsError::not_found(format!("no area found matching {code}")))
    }

    /// Mutable access to the area with `code`.
    pub fn area_mut(&mut self, code: &str) -> StatsResult<&mut Area> {
        self.areas
            .get_mut(code)
            .ok_or_else(|| StatsError::not_found(format!("no area found matching {code}")))
    }

    /// `true` if an area with `code` is stored.
    pub fn contains(&self, code: &str) -> bool {
        self.areas.contains_key(code)
    }

    /// Number of areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// `true` if no areas are stored.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Iterate areas in local authority code order.
    pub fn iter(&self) -> impl Iterator<Item = &Area> + '_ {
        self.areas.values()
    }

    /// Import `reader` as `format`, see [`ingestion::populate`].
    pub fn populate<R: Read>(
        &mut self,
        reader: R,
        format: SourceFormat,
        columns: &ColumnMapping,
        filters: &ImportFilters,
    ) -> StatsResult<ImportStats> {
        ingestion::populate(self, reader, format, columns, filters)
    }

    /// Import `reader` without filters, see [`ingestion::populate_unfiltered`].
    pub fn populate_unfiltered<R: Read>(
        &mut self,
        reader: R,
        format: SourceFormat,
        columns: &ColumnMapping,
    ) -> StatsResult<ImportStats> {
        ingestion::populate_unfiltered(self, reader, format, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::AreaStore;
    use crate::error::StatsError;
    use crate::model::{Area, Measure};

    #[test]
    fn set_area_inserts_then_merges() {
        let mut store = AreaStore::new();

        let mut a = Area::new("W06000023");
        a.set_name("eng", "Powys").unwrap();
        store.set_area("W06000023", a);

        let mut b = Area::new("W06000023");
        let mut pop = Measure::new("pop", "Population");
        pop.set_value(2020, 1.0);
        b.set_measure("pop", pop);
        store.set_area("W06000023", b);

        assert_eq!(store.len(), 1);
        let area = store.area("W06000023").unwrap();
        assert_eq!(area.name("eng").unwrap(), "Powys");
        assert_eq!(area.measure("pop").unwrap().value(2020).unwrap(), 1.0);
    }

    #[test]
    fn missing_area_is_not_found() {
        let store = AreaStore::new();
        let err = store.area("W06000099").unwrap_err();
        assert!(matches!(err, StatsError::NotFound { .. }));
        assert!(err.to_string().contains("W06000099"));
    }

    #[test]
    fn iter_is_ordered_by_code() {
        let mut store = AreaStore::new();
        for code in ["W06000024", "W06000001", "W06000023"] {
            store.set_area(code, Area::new(code));
        }
        let codes: Vec<_> = store.iter().map(|a| a.code()).collect();
        assert_eq!(codes, vec!["W06000001", "W06000023", "W06000024"]);
    }
}
