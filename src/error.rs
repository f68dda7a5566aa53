use thiserror::Error;

/// Convenience result type used across the crate.
pub type StatsResult<T> = Result<T, StatsError>;

/// Error type returned by the model getters/setters and by every import routine.
///
/// Failures are surfaced to the caller as-is. There is no rollback: an import that fails partway
/// leaves whatever it already registered in the [`crate::model::AreaStore`].
#[derive(Debug, Error)]
pub enum StatsError {
    /// The input stream could not be opened or read.
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// Malformed CSV input (not an I/O failure).
    #[error("csv error: {0}")]
    Csv(csv::Error),

    /// Malformed JSON input (not an I/O failure).
    #[error("json error: {0}")]
    Json(serde_json::Error),

    /// A language name, measure, area, or year has no stored entry.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// An argument failed validation (e.g. a language code that is not three letters).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The source does not have the shape the chosen format needs (missing mapped fields,
    /// unknown format tag, missing top-level keys).
    #[error("malformed source: {message}")]
    Structural { message: String },

    /// A numeric or year-shaped field could not be coerced.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ValueParse {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

impl StatsError {
    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }
}

impl From<csv::Error> for StatsError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return Self::Csv(err);
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Stream(io),
            other => Self::Stream(std::io::Error::other(format!("{other:?}"))),
        }
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => Self::Stream(std::io::Error::from(err)),
            _ => Self::Json(err),
        }
    }
}
