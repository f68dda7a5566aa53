//! Statistics JSON ingestion (StatsWales-style OData export).
//!
//! The document is an object whose `"value"` key holds an array of flat observation records, e.g.
//!
//! ```json
//! {"value": [
//!   {"Localauthority_Code": "W06000023", "Localauthority_ItemName_ENG": "Powys",
//!    "Measure_Code": "Pop", "Measure_ItemName_ENG": "Population",
//!    "Year_Code": "2020", "Data": "133030.0"}
//! ]}
//! ```
//!
//! Files that cover exactly one measure omit the measure fields; the codename/label then come from
//! [`SourceColumn::SingleMeasureCode`] / [`SourceColumn::SingleMeasureName`].

use std::io::Read;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{StatsError, StatsResult};
use crate::model::{Area, AreaStore, Measure};

use super::columns::{ColumnMapping, SourceColumn};
use super::filter::ImportFilters;
use super::observability::ImportStats;

/// Minimum number of mapped columns this format needs.
pub const MIN_COLUMNS: usize = 6;

/// Top-level key holding the observation array.
pub const RECORDS_KEY: &str = "value";

/// Populate `store` from a statistics JSON document.
///
/// For each record:
///
/// - the area is created (with its English name) the first time it passes the area filter;
/// - the record's measure, if it passes the measure filter, gets the record's `(year, value)`
///   reading when the year passes the year filter, merged with whatever that measure already holds.
///
/// Values may be JSON numbers or numeric strings. Years may be JSON integers or digit strings.
pub fn populate_from_stats_json<R: Read>(
    store: &mut AreaStore,
    reader: R,
    columns: &ColumnMapping,
    filters: &ImportFilters,
) -> StatsResult<ImportStats> {
    columns.ensure_len(MIN_COLUMNS, "statistics JSON")?;
    let keys = RecordKeys::resolve(columns)?;

    let doc: Value = serde_json::from_reader(reader)?;
    let records = doc
        .get(RECORDS_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            StatsError::structural(format!("json document has no top-level '{RECORDS_KEY}' array"))
        })?;
    debug!(records = records.len(), "statistics json document");

    let mut stats = ImportStats::default();
    for (idx0, record) in records.iter().enumerate() {
        let row = idx0 + 1;
        stats.records += 1;
        let obj = record.as_object().ok_or_else(|| {
            StatsError::structural(format!("record {row} is not a json object"))
        })?;

        let area_code = required_text(obj, keys.auth_code, row)?;
        if !filters.includes_area(&area_code) {
            continue;
        }
        if !store.contains(&area_code) {
            let mut area = Area::new(area_code.as_str());
            if let Some(name) = keys.auth_name_eng.and_then(|k| obj.get(k)).and_then(text) {
                area.set_name("eng", name)?;
            }
            store.set_area(&area_code, area);
        }

        let measure_code = match keys.measure_code.and_then(|k| obj.get(k)).and_then(text) {
            Some(code) => code,
            None => keys.single_measure_code.map(str::to_owned).ok_or_else(|| {
                StatsError::structural(format!(
                    "record {row} has no measure code and no single measure is mapped"
                ))
            })?,
        };
        if !filters.includes_measure(&measure_code) {
            continue;
        }
        let measure_label = keys
            .measure_name
            .and_then(|k| obj.get(k))
            .and_then(text)
            .or_else(|| keys.single_measure_name.map(str::to_owned))
            .unwrap_or_else(|| measure_code.clone());

        let value = parse_value(obj, keys.value, row)?;
        let year = parse_year(obj, keys.year, row)?;

        let mut measure = Measure::new(&measure_code, measure_label);
        if filters.includes_year(year) {
            measure.set_value(year, value);
        }
        store.area_mut(&area_code)?.set_measure(&measure_code, measure);
        stats.imported += 1;
    }

    info!(
        records = stats.records,
        imported = stats.imported,
        areas = store.len(),
        "imported statistics json"
    );
    Ok(stats)
}

/// JSON keys resolved once per document.
struct RecordKeys<'a> {
    auth_code: &'a str,
    auth_name_eng: Option<&'a str>,
    measure_code: Option<&'a str>,
    measure_name: Option<&'a str>,
    year: &'a str,
    value: &'a str,
    single_measure_code: Option<&'a str>,
    single_measure_name: Option<&'a str>,
}

impl<'a> RecordKeys<'a> {
    fn resolve(columns: &'a ColumnMapping) -> StatsResult<Self> {
        let keys = Self {
            auth_code: columns.require(SourceColumn::AuthCode)?,
            auth_name_eng: columns.get(SourceColumn::AuthNameEng),
            measure_code: columns.get(SourceColumn::MeasureCode),
            measure_name: columns.get(SourceColumn::MeasureName),
            year: columns.require(SourceColumn::Year)?,
            value: columns.require(SourceColumn::Value)?,
            single_measure_code: columns.get(SourceColumn::SingleMeasureCode),
            single_measure_name: columns.get(SourceColumn::SingleMeasureName),
        };
        if keys.measure_code.is_none() && keys.single_measure_code.is_none() {
            return Err(StatsError::structural(format!(
                "column mapping needs {} or {}",
                SourceColumn::MeasureCode,
                SourceColumn::SingleMeasureCode
            )));
        }
        Ok(keys)
    }
}

/// Strings as-is, numbers in their JSON form; anything else is not text.
fn text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_text(obj: &Map<String, Value>, key: &str, row: usize) -> StatsResult<String> {
    obj.get(key).and_then(text).ok_or_else(|| {
        StatsError::structural(format!("record {row} missing required field '{key}'"))
    })
}

fn required<'v>(obj: &'v Map<String, Value>, key: &str, row: usize) -> StatsResult<&'v Value> {
    obj.get(key).ok_or_else(|| {
        StatsError::structural(format!("record {row} missing required field '{key}'"))
    })
}

fn parse_value(obj: &Map<String, Value>, key: &str, row: usize) -> StatsResult<f64> {
    let v = required(obj, key, row)?;
    let parsed = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|x| x.is_finite()).ok_or_else(|| StatsError::ValueParse {
        row,
        column: key.to_string(),
        raw: v.to_string(),
        message: "expected finite number or numeric string".to_string(),
    })
}

fn parse_year(obj: &Map<String, Value>, key: &str, row: usize) -> StatsResult<u32> {
    let v = required(obj, key, row)?;
    let parsed = match v {
        Value::Number(n) => n.as_u64().and_then(|y| u32::try_from(y).ok()),
        Value::String(s) => {
            let s = s.trim();
            if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                s.parse::<u32>().ok()
            } else {
                None
            }
        }
        _ => None,
    };
    parsed.ok_or_else(|| StatsError::ValueParse {
        row,
        column: key.to_string(),
        raw: v.to_string(),
        message: "expected year".to_string(),
    })
}
