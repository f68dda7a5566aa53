//! `area-stats` ingests government statistical datasets into one hierarchical, queryable
//! in-memory [`model::AreaStore`], optionally filtering by area, measure, and year while importing,
//! and re-emits the store as JSON or as text tables.
//!
//! ## What you can ingest
//!
//! Three source layouts, selected by [`ingestion::SourceFormat`]:
//!
//! - **Authority-code CSV** (`code,name-eng,name-cym`): area names.
//! - **Authority-by-year CSV** (authority code then one column per year): a single measure.
//! - **Statistics JSON** (a `"value"` array of flat observation records): any number of measures.
//!
//! Which column/key holds which field is described by an [`ingestion::ColumnMapping`]. Layouts for
//! the known StatsWales files are available from [`ingestion::datasets`].
//!
//! ## Merge rules
//!
//! Importing the same area or measure twice merges instead of replacing: entries from the newer
//! import win per key (language, codename, year) and older entries fill the gaps. Names loaded from
//! one file and values loaded from another therefore end up on the same [`model::Area`].
//!
//! ## Quick example
//!
//! ```rust
//! use area_stats::ingestion::{ColumnMapping, ImportFilters, SourceColumn, SourceFormat, YearRange};
//! use area_stats::model::AreaStore;
//!
//! # fn main() -> Result<(), area_stats::StatsError> {
//! let mut store = AreaStore::new();
//!
//! let names = ColumnMapping::new()
//!     .with(SourceColumn::AuthCode, "Local authority code")
//!     .with(SourceColumn::AuthNameEng, "Name (eng)")
//!     .with(SourceColumn::AuthNameCym, "Name (cym)");
//! let csv = "Local authority code,Name (eng),Name (cym)\nW06000023,Powys,Powys\n";
//! store.populate_unfiltered(csv.as_bytes(), SourceFormat::AuthorityCodeCsv, &names)?;
//!
//! let pop = ColumnMapping::new()
//!     .with(SourceColumn::AuthCode, "AuthorityCode")
//!     .with(SourceColumn::SingleMeasureCode, "pop")
//!     .with(SourceColumn::SingleMeasureName, "Population");
//! let wide = "AuthorityCode,2019,2020\nW06000023,132447,133030\n";
//! let filters = ImportFilters::all().with_years(YearRange::new(2020, 2020));
//! store.populate(wide.as_bytes(), SourceFormat::AuthorityByYearCsv, &pop, &filters)?;
//!
//! let powys = store.area("W06000023")?;
//! assert_eq!(powys.name("eng")?, "Powys");
//! assert_eq!(powys.measure("POP")?.value(2020)?, 133030.0);
//! assert!(powys.measure("pop")?.value(2019).is_err());
//!
//! println!("{store}");
//! println!("{}", store.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`model`]: `Measure` / `Area` / `AreaStore` and merge semantics
//! - [`ingestion`]: column mappings, filters, the three population routines and the dispatcher
//! - [`export`]: JSON and text output
//! - [`error`]: the error type shared by everything above

pub mod error;
pub mod export;
pub mod ingestion;
pub mod model;

pub use error::{StatsError, StatsResult};
