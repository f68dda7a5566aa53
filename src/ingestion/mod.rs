//! Import entrypoints and implementations.
//!
//! Most callers should use [`populate`] (from [`unified`]) on an open reader, or
//! [`import_from_path`] / [`import_dataset`] which open the file and optionally report the
//! outcome to an [`IngestionObserver`].
//!
//! Format-specific routines are also available under:
//! - [`authority_csv`]
//! - [`year_csv`]
//! - [`stats_json`]

pub mod authority_csv;
pub mod columns;
pub mod datasets;
pub mod filter;
pub mod observability;
pub mod stats_json;
pub mod unified;
pub mod year_csv;

pub use columns::{ColumnMapping, SourceColumn};
pub use datasets::Dataset;
pub use filter::{ImportFilters, YearRange};
pub use observability::{
    CompositeObserver, FileObserver, ImportStats, IngestionContext, IngestionObserver,
    IngestionSeverity, TracingObserver,
};
pub use unified::{
    ImportOptions, ImportRequest, SourceFormat, import_dataset, import_from_path, populate,
    populate_unfiltered,
};
