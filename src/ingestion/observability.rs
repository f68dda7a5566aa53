//! Import outcome reporting.
//!
//! The path-based entry points ([`super::import_from_path`], [`super::import_dataset`]) hand every
//! outcome to an optional [`IngestionObserver`]. Failures are graded by [`IngestionSeverity`] so
//! callers can alert only on the ones that matter (an unreadable file rather than a bad cell).

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{error, info, warn};

use crate::error::StatsError;

use super::unified::SourceFormat;

/// How bad a failed import is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    Info,
    Warning,
    /// The source was read but its content or the column mapping was rejected.
    Error,
    /// The source could not be opened or read at all.
    Critical,
}

impl IngestionSeverity {
    /// Grade a failed import by its error.
    pub fn for_error(e: &StatsError) -> Self {
        match e {
            StatsError::Stream(_) => Self::Critical,
            StatsError::Csv(_)
            | StatsError::Json(_)
            | StatsError::NotFound { .. }
            | StatsError::InvalidArgument { .. }
            | StatsError::Structural { .. }
            | StatsError::ValueParse { .. } => Self::Error,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for IngestionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What was being imported.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    pub path: PathBuf,
    pub format: SourceFormat,
    /// Registry code when the import came from [`super::import_dataset`].
    pub dataset: Option<String>,
}

impl fmt::Display for IngestionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = &self.dataset {
            write!(f, "dataset={code} ")?;
        }
        write!(f, "format={} path={}", self.format, self.path.display())
    }
}

/// Counts reported by every population routine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Data rows or JSON records read from the source.
    pub records: usize,
    /// Rows or records that passed the filters and were merged into the store.
    pub imported: usize,
}

impl ImportStats {
    /// Rows or records dropped by the filters.
    pub fn skipped(&self) -> usize {
        self.records.saturating_sub(self.imported)
    }
}

/// Receives the outcome of path-based imports.
pub trait IngestionObserver: Send + Sync {
    fn on_success(&self, _ctx: &IngestionContext, _stats: ImportStats) {}

    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &StatsError) {}

    /// Called in addition to [`Self::on_failure`] once the severity reaches the configured
    /// threshold. Defaults to another `on_failure` call.
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every callback to each wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }

    pub fn push(&mut self, observer: Arc<dyn IngestionObserver>) {
        self.observers.push(observer);
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: ImportStats) {
        self.observers.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        self.observers.iter().for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        self.observers.iter().for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Emits outcomes as `tracing` events: successes at INFO, failures at WARN (or ERROR when
/// critical), alerts at ERROR.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: ImportStats) {
        info!(
            dataset = ctx.dataset.as_deref(),
            format = %ctx.format,
            path = %ctx.path.display(),
            records = stats.records,
            imported = stats.imported,
            "import finished"
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        if severity >= IngestionSeverity::Critical {
            error!(%severity, %ctx, %error, "import failed");
        } else {
            warn!(%severity, %ctx, %error, "import failed");
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        error!(alert = true, %severity, %ctx, %error, "import alert");
    }
}

/// Appends one tab-separated line per outcome to a log file.
///
/// ```text
/// 1760659200	ok	dataset=popden format=stats-json path=data/popu1009.json	records=880 imported=880
/// 1760659201	fail	format=authority-code-csv path=data/areas.csv	critical	stream error: ...
/// ```
///
/// Writes are best-effort: a log file that cannot be opened or written is ignored.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Log file this observer appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, kind: &str, ctx: &IngestionContext, detail: fmt::Arguments<'_>) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{}\t{kind}\t{ctx}\t{detail}", unix_ts());
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: ImportStats) {
        self.append(
            "ok",
            ctx,
            format_args!("records={} imported={}", stats.records, stats.imported),
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        self.append("fail", ctx, format_args!("{severity}\t{error}"));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        self.append("alert", ctx, format_args!("{severity}\t{error}"));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ImportStats, IngestionContext, IngestionSeverity};
    use crate::error::StatsError;
    use crate::ingestion::unified::SourceFormat;

    #[test]
    fn stream_errors_are_critical() {
        let io = StatsError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(IngestionSeverity::for_error(&io), IngestionSeverity::Critical);

        let bad = StatsError::structural("short mapping");
        assert_eq!(IngestionSeverity::for_error(&bad), IngestionSeverity::Error);
        assert!(IngestionSeverity::Error < IngestionSeverity::Critical);
    }

    #[test]
    fn context_display_includes_dataset_when_known() {
        let mut ctx = IngestionContext {
            path: PathBuf::from("data/popu1009.json"),
            format: SourceFormat::StatsJson,
            dataset: None,
        };
        assert_eq!(ctx.to_string(), "format=stats-json path=data/popu1009.json");
        ctx.dataset = Some("popden".into());
        assert_eq!(
            ctx.to_string(),
            "dataset=popden format=stats-json path=data/popu1009.json"
        );
    }

    #[test]
    fn skipped_counts_filtered_rows() {
        let stats = ImportStats { records: 10, imported: 7 };
        assert_eq!(stats.skipped(), 3);
        assert_eq!(ImportStats::default().skipped(), 0);
    }
}
