//! Format dispatch and path-based entry points.
//!
//! [`populate`] hands an open reader to exactly one of the three population routines, chosen by
//! [`SourceFormat`]. [`import_from_path`] and [`import_dataset`] open the file themselves and
//! optionally report the outcome to an [`IngestionObserver`].

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StatsError, StatsResult};
use crate::model::AreaStore;

use super::columns::ColumnMapping;
use super::datasets::Dataset;
use super::filter::ImportFilters;
use super::observability::{ImportStats, IngestionContext, IngestionObserver, IngestionSeverity};
use super::{authority_csv, stats_json, year_csv};

/// Declared on-disk layout of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// `code,name-eng,name-cym` rows.
    AuthorityCodeCsv,
    /// Authority code then one column per year, single measure per file.
    AuthorityByYearCsv,
    /// Object with a `"value"` array of flat observation records.
    StatsJson,
}

impl SourceFormat {
    /// Minimum number of mapped columns the format needs.
    pub fn min_columns(self) -> usize {
        match self {
            Self::AuthorityCodeCsv => authority_csv::MIN_COLUMNS,
            Self::AuthorityByYearCsv => year_csv::MIN_COLUMNS,
            Self::StatsJson => stats_json::MIN_COLUMNS,
        }
    }

    /// Tag used by [`FromStr`] / [`fmt::Display`].
    pub fn tag(self) -> &'static str {
        match self {
            Self::AuthorityCodeCsv => "authority-code-csv",
            Self::AuthorityByYearCsv => "authority-by-year-csv",
            Self::StatsJson => "stats-json",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SourceFormat {
    type Err = StatsError;

    fn from_str(s: &str) -> StatsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "authority-code-csv" => Ok(Self::AuthorityCodeCsv),
            "authority-by-year-csv" => Ok(Self::AuthorityByYearCsv),
            "stats-json" => Ok(Self::StatsJson),
            _ => Err(unexpected_data_type(s)),
        }
    }
}

fn unexpected_data_type(tag: impl fmt::Display) -> StatsError {
    StatsError::structural(format!("unexpected data type '{tag}'"))
}

/// Import `reader` into `store` as `format`, applying `filters`.
///
/// The column mapping is checked against [`SourceFormat::min_columns`] before anything is read.
/// Filters that a format has no use for (measures/years for [`SourceFormat::AuthorityCodeCsv`]) are
/// ignored.
pub fn populate<R: Read>(
    store: &mut AreaStore,
    reader: R,
    format: SourceFormat,
    columns: &ColumnMapping,
    filters: &ImportFilters,
) -> StatsResult<ImportStats> {
    columns.ensure_len(format.min_columns(), format.tag())?;
    debug!(%format, unrestricted = filters.is_unrestricted(), "dispatching import");

    match format {
        SourceFormat::AuthorityCodeCsv => {
            authority_csv::populate_from_authority_code_csv(store, reader, columns, filters)
        }
        SourceFormat::AuthorityByYearCsv => {
            year_csv::populate_from_authority_by_year_csv(store, reader, columns, filters)
        }
        SourceFormat::StatsJson => {
            stats_json::populate_from_stats_json(store, reader, columns, filters)
        }
    }
}

/// Unfiltered import, only accepted for [`SourceFormat::AuthorityCodeCsv`].
///
/// This is how the canonical area-name file is loaded; other formats always go through
/// [`populate`] and fail here with an "unexpected data type" error.
pub fn populate_unfiltered<R: Read>(
    store: &mut AreaStore,
    reader: R,
    format: SourceFormat,
    columns: &ColumnMapping,
) -> StatsResult<ImportStats> {
    match format {
        SourceFormat::AuthorityCodeCsv => {
            populate(store, reader, format, columns, &ImportFilters::all())
        }
        other => Err(unexpected_data_type(other)),
    }
}

/// Options controlling path-based imports.
///
/// Use [`Default`] for unrestricted, unobserved imports.
#[derive(Clone)]
pub struct ImportOptions {
    /// Filters applied to the import. Area-name files only use the area filter.
    pub filters: ImportFilters,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for ImportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportOptions")
            .field("filters", &self.filters)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            filters: ImportFilters::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Open `path` and import it as `format`.
///
/// A file that cannot be opened fails with [`StatsError::Stream`]. When an observer is
/// configured this reports `on_success` / `on_failure`, and `on_alert` once the failure severity
/// reaches `options.alert_at_or_above`.
///
/// ```no_run
/// use area_stats::ingestion::{datasets, import_from_path, ImportOptions};
/// use area_stats::model::AreaStore;
///
/// # fn main() -> Result<(), area_stats::StatsError> {
/// let areas = datasets::areas();
/// let mut store = AreaStore::new();
/// import_from_path(
///     &mut store,
///     "data/areas.csv",
///     areas.format,
///     &areas.columns,
///     &ImportOptions::default(),
/// )?;
/// println!("areas={}", store.len());
/// # Ok(())
/// # }
/// ```
pub fn import_from_path(
    store: &mut AreaStore,
    path: impl AsRef<Path>,
    format: SourceFormat,
    columns: &ColumnMapping,
    options: &ImportOptions,
) -> StatsResult<ImportStats> {
    let ctx = IngestionContext {
        path: path.as_ref().to_path_buf(),
        format,
        dataset: None,
    };
    import_observed(store, &ctx, columns, options)
}

/// Import a registry [`Dataset`] whose file lives in `data_dir`.
///
/// Same as [`import_from_path`] except that observers also see the dataset code.
pub fn import_dataset(
    store: &mut AreaStore,
    data_dir: impl AsRef<Path>,
    dataset: &Dataset,
    options: &ImportOptions,
) -> StatsResult<ImportStats> {
    let ctx = IngestionContext {
        path: data_dir.as_ref().join(&dataset.file),
        format: dataset.format,
        dataset: Some(dataset.code.clone()),
    };
    import_observed(store, &ctx, &dataset.columns, options)
}

fn import_observed(
    store: &mut AreaStore,
    ctx: &IngestionContext,
    columns: &ColumnMapping,
    options: &ImportOptions,
) -> StatsResult<ImportStats> {
    let result = File::open(&ctx.path)
        .map_err(StatsError::from)
        .and_then(|file| populate(store, BufReader::new(file), ctx.format, columns, &options.filters));

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(stats) => obs.on_success(ctx, *stats),
            Err(e) => {
                let sev = IngestionSeverity::for_error(e);
                obs.on_failure(ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(ctx, sev, e);
                }
            }
        }
    }

    result
}

/// An owned import job.
#[derive(Clone)]
pub struct ImportRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Declared layout of the file.
    pub format: SourceFormat,
    /// Column mapping for the file.
    pub columns: ColumnMapping,
    /// Options controlling the import.
    pub options: ImportOptions,
}

impl fmt::Debug for ImportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportRequest")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("columns", &self.columns.len())
            .field("options", &self.options)
            .finish()
    }
}

impl ImportRequest {
    /// Execute the request by calling [`import_from_path`].
    pub fn run(&self, store: &mut AreaStore) -> StatsResult<ImportStats> {
        import_from_path(store, &self.path, self.format, &self.columns, &self.options)
    }
}
