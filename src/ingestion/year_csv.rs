//! Authority-by-year ("wide") CSV ingestion.
//!
//! These files hold a single measure. The header is an authority-code label followed by one column
//! per year; each data row is an authority code followed by one value per year, with a blank cell
//! meaning "no reading". They carry no area names.

use std::io::Read;

use tracing::{debug, info};

use crate::error::{StatsError, StatsResult};
use crate::model::{Area, AreaStore, Measure};

use super::columns::{ColumnMapping, SourceColumn};
use super::filter::ImportFilters;
use super::observability::ImportStats;

/// Minimum number of mapped columns this format needs.
pub const MIN_COLUMNS: usize = 3;

/// Populate `store` from an authority-by-year CSV.
///
/// The measure codename and label come from [`SourceColumn::SingleMeasureCode`] and
/// [`SourceColumn::SingleMeasureName`]. If that measure is excluded by the measure filter nothing
/// is imported. Otherwise each row that passes the area filter is registered as an area holding
/// that one measure, restricted to the years that pass the year filter.
pub fn populate_from_authority_by_year_csv<R: Read>(
    store: &mut AreaStore,
    reader: R,
    columns: &ColumnMapping,
    filters: &ImportFilters,
) -> StatsResult<ImportStats> {
    columns.ensure_len(MIN_COLUMNS, "authority-by-year CSV")?;
    let measure_code = columns.require(SourceColumn::SingleMeasureCode)?;
    let measure_label = columns.require(SourceColumn::SingleMeasureName)?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut stats = ImportStats::default();
    if !filters.includes_measure(measure_code) {
        debug!(measure = measure_code, "measure excluded by filter, skipping file");
        return Ok(stats);
    }

    // (column index, year); the first header field is the authority-code label.
    let mut years: Vec<(usize, u32)> = Vec::with_capacity(headers.len().saturating_sub(1));
    for (idx, raw) in headers.iter().enumerate().skip(1) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let year = trimmed.parse::<u32>().map_err(|e| StatsError::ValueParse {
            row: 1,
            column: format!("#{idx}"),
            raw: raw.to_owned(),
            message: format!("expected year in header: {e}"),
        })?;
        years.push((idx, year));
    }
    debug!(measure = measure_code, years = years.len(), "authority-by-year csv header");

    for (row_idx0, result) in rdr.records().enumerate() {
        let user_row = row_idx0 + 2;
        let record = result?;
        stats.records += 1;

        let code = record.get(0).map(str::trim).unwrap_or("");
        if code.is_empty() {
            return Err(StatsError::structural(format!(
                "row {user_row} has no authority code"
            )));
        }
        if !filters.includes_area(code) {
            continue;
        }

        let mut measure = Measure::new(measure_code, measure_label);
        for &(idx, year) in &years {
            let raw = record.get(idx).unwrap_or("");
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let value = trimmed
                .parse::<f64>()
                .map_err(|e| e.to_string())
                .and_then(|v| {
                    if v.is_finite() {
                        Ok(v)
                    } else {
                        Err("value is not a finite number".to_string())
                    }
                })
                .map_err(|message| StatsError::ValueParse {
                    row: user_row,
                    column: year.to_string(),
                    raw: raw.to_owned(),
                    message,
                })?;
            if filters.includes_year(year) {
                measure.set_value(year, value);
            }
        }

        let mut area = Area::new(code);
        area.set_measure(measure_code, measure);
        store.set_area(code, area);
        stats.imported += 1;
    }

    info!(
        measure = measure_code,
        records = stats.records,
        imported = stats.imported,
        "imported authority-by-year csv"
    );
    Ok(stats)
}
