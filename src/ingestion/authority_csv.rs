//! Authority-code CSV ingestion (`code,name-eng,name-cym`).

use std::io::Read;

use tracing::{debug, info};

use crate::error::{StatsError, StatsResult};
use crate::model::{Area, AreaStore};

use super::columns::ColumnMapping;
use super::filter::ImportFilters;
use super::observability::ImportStats;

/// Minimum number of mapped columns this format needs.
pub const MIN_COLUMNS: usize = 3;

/// Populate `store` with area names from an authority-code CSV.
///
/// Rules:
///
/// - The first row is a header and is skipped.
/// - Each data row is read positionally: authority code, English name, Welsh name.
/// - Only the area filter of `filters` applies; measures and years do not exist in this file.
/// - Rows for an existing area are merged into it (names from the file win).
pub fn populate_from_authority_code_csv<R: Read>(
    store: &mut AreaStore,
    reader: R,
    columns: &ColumnMapping,
    filters: &ImportFilters,
) -> StatsResult<ImportStats> {
    columns.ensure_len(MIN_COLUMNS, "authority-code CSV")?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    debug!(headers = ?headers.iter().collect::<Vec<_>>(), "authority-code csv header");

    let mut stats = ImportStats::default();
    for (row_idx0, result) in rdr.records().enumerate() {
        let user_row = row_idx0 + 2;
        let record = result?;
        stats.records += 1;

        let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");
        let code = field(0);
        if code.is_empty() {
            return Err(StatsError::structural(format!(
                "row {user_row} has no authority code"
            )));
        }
        if !filters.includes_area(code) {
            continue;
        }
        if record.len() < 3 {
            return Err(StatsError::structural(format!(
                "row {user_row} has {} fields, expected code, English name and Welsh name",
                record.len()
            )));
        }

        let mut area = Area::new(code);
        area.set_name("eng", field(1))?;
        area.set_name("cym", field(2))?;
        store.set_area(code, area);
        stats.imported += 1;
    }

    info!(
        records = stats.records,
        imported = stats.imported,
        "imported authority-code csv"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::populate_from_authority_code_csv;
    use crate::error::StatsError;
    use crate::ingestion::columns::{ColumnMapping, SourceColumn};
    use crate::ingestion::filter::ImportFilters;
    use crate::model::AreaStore;

    fn cols() -> ColumnMapping {
        ColumnMapping::new()
            .with(SourceColumn::AuthCode, "Local authority code")
            .with(SourceColumn::AuthNameEng, "Name (eng)")
            .with(SourceColumn::AuthNameCym, "Name (cym)")
    }

    const INPUT: &str = "Local authority code,Name (eng),Name (cym)\n\
                         W06000011,Swansea,Abertawe\n\
                         W06000023,Powys,Powys\n";

    #[test]
    fn imports_all_rows_without_filter() {
        let mut store = AreaStore::new();
        let stats =
            populate_from_authority_code_csv(&mut store, INPUT.as_bytes(), &cols(), &ImportFilters::all())
                .unwrap();
        assert_eq!(stats.records, 2);
        assert_eq!(stats.imported, 2);
        let swansea = store.area("W06000011").unwrap();
        assert_eq!(swansea.name("eng").unwrap(), "Swansea");
        assert_eq!(swansea.name("cym").unwrap(), "Abertawe");
    }

    #[test]
    fn area_filter_limits_rows() {
        let mut store = AreaStore::new();
        let filters = ImportFilters::all().with_areas(["W06000023"]);
        let stats =
            populate_from_authority_code_csv(&mut store, INPUT.as_bytes(), &cols(), &filters).unwrap();
        assert_eq!(stats.imported, 1);
        assert_eq!(store.len(), 1);
        assert!(store.contains("W06000023"));
    }

    #[test]
    fn short_mapping_is_structural_error() {
        let mut store = AreaStore::new();
        let cols = ColumnMapping::new().with(SourceColumn::AuthCode, "code");
        let err = populate_from_authority_code_csv(
            &mut store,
            INPUT.as_bytes(),
            &cols,
            &ImportFilters::all(),
        )
        .unwrap_err();
        assert!(matches!(err, StatsError::Structural { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn row_without_names_is_structural_error() {
        let mut store = AreaStore::new();
        let input = "code,eng,cym\nW06000023\n";
        let err =
            populate_from_authority_code_csv(&mut store, input.as_bytes(), &cols(), &ImportFilters::all())
                .unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }
}
