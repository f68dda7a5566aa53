//! Built-in registry of known StatsWales datasets and their column layouts.

use serde::{Deserialize, Serialize};

use super::columns::{ColumnMapping, SourceColumn};
use super::unified::SourceFormat;

/// A dataset file plus everything needed to import it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Short code used to select the dataset (e.g. `popden`).
    pub code: String,
    /// Human-readable description.
    pub name: String,
    /// File name, relative to the data directory.
    pub file: String,
    /// On-disk layout.
    pub format: SourceFormat,
    /// Column mapping for the layout.
    pub columns: ColumnMapping,
}

impl Dataset {
    fn new(
        code: &str,
        name: &str,
        file: &str,
        format: SourceFormat,
        columns: &[(SourceColumn, &str)],
    ) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            file: file.to_string(),
            format,
            columns: columns
                .iter()
                .map(|(col, key)| (*col, (*key).to_string()))
                .collect(),
        }
    }
}

/// The canonical local authority name file.
pub fn areas() -> Dataset {
    Dataset::new(
        "areas",
        "Local authority codes and names",
        "areas.csv",
        SourceFormat::AuthorityCodeCsv,
        &[
            (SourceColumn::AuthCode, "Local authority code"),
            (SourceColumn::AuthNameEng, "Name (eng)"),
            (SourceColumn::AuthNameCym, "Name (cym)"),
        ],
    )
}

/// All measure datasets known to the crate (the area-name file is [`areas`]).
pub fn builtin() -> Vec<Dataset> {
    use SourceColumn::*;
    use SourceFormat::*;

    vec![
        Dataset::new(
            "popden",
            "Population density",
            "popu1009.json",
            StatsJson,
            &[
                (AuthCode, "Localauthority_Code"),
                (AuthNameEng, "Localauthority_ItemName_ENG"),
                (MeasureCode, "Measure_Code"),
                (MeasureName, "Measure_ItemName_ENG"),
                (Year, "Year_Code"),
                (Value, "Data"),
            ],
        ),
        Dataset::new(
            "biz",
            "Active Businesses",
            "econ0080.json",
            StatsJson,
            &[
                (AuthCode, "Area_Code"),
                (AuthNameEng, "Area_ItemName_ENG"),
                (MeasureCode, "Variable_Code"),
                (MeasureName, "Variable_ItemName_ENG"),
                (Year, "Year_Code"),
                (Value, "Data"),
            ],
        ),
        Dataset::new(
            "aqi",
            "Air Quality Indicators",
            "envi0201.json",
            StatsJson,
            &[
                (AuthCode, "Area_Code"),
                (AuthNameEng, "Area_ItemName_ENG"),
                (MeasureCode, "Pollutant_ItemName_ENG"),
                (MeasureName, "Pollutant_ItemName_ENG"),
                (Year, "Year_Code"),
                (Value, "Data"),
            ],
        ),
        Dataset::new(
            "trains",
            "Rail passenger journeys",
            "tran0152.json",
            StatsJson,
            &[
                (AuthCode, "LocalAuthority_Code"),
                (AuthNameEng, "LocalAuthority_ItemName_ENG"),
                (Year, "Year_Code"),
                (Value, "Data"),
                (SingleMeasureCode, "rail"),
                (SingleMeasureName, "Rail passenger journeys"),
            ],
        ),
        Dataset::new(
            "complete-popden",
            "Population density (complete)",
            "complete-popu1009-popden.csv",
            AuthorityByYearCsv,
            &[
                (AuthCode, "AuthorityCode"),
                (SingleMeasureCode, "dens"),
                (SingleMeasureName, "Population density"),
            ],
        ),
        Dataset::new(
            "complete-pop",
            "Population (complete)",
            "complete-popu1009-pop.csv",
            AuthorityByYearCsv,
            &[
                (AuthCode, "AuthorityCode"),
                (SingleMeasureCode, "pop"),
                (SingleMeasureName, "Population"),
            ],
        ),
        Dataset::new(
            "complete-area",
            "Land area (complete)",
            "complete-popu1009-area.csv",
            AuthorityByYearCsv,
            &[
                (AuthCode, "AuthorityCode"),
                (SingleMeasureCode, "area"),
                (SingleMeasureName, "Land area"),
            ],
        ),
    ]
}

/// Look up a dataset (including [`areas`]) by code, case-insensitively.
pub fn find(code: &str) -> Option<Dataset> {
    std::iter::once(areas())
        .chain(builtin())
        .find(|d| d.code.eq_ignore_ascii_case(code))
}
