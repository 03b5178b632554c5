//! Domain error types.

use chrono::NaiveDate;

/// Structural problem with a bar sequence handed to [`HistoricalSeries`].
///
/// [`HistoricalSeries`]: crate::domain::series::HistoricalSeries
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    #[error("duplicate bar for {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("bar {index} dated {date} is earlier than its predecessor {previous}")]
    OutOfOrder {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },
}

/// Top-level error type for trendscreen.
#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("cannot read ticker manifest {path}: {reason}")]
    ManifestRead { path: String, reason: String },

    #[error("data fetch failed for {symbol}: {reason}")]
    DataFetch { symbol: String, reason: String },

    #[error("malformed series: {0}")]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScreenerError {
    pub fn data_fetch(symbol: &str, reason: impl Into<String>) -> Self {
        ScreenerError::DataFetch {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit status: 1 for I/O, 2 for configuration or manifest, 3 for data.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScreenerError::Io(_) => 1,
            ScreenerError::ConfigParse { .. }
            | ScreenerError::ConfigMissing { .. }
            | ScreenerError::ConfigInvalid { .. }
            | ScreenerError::ManifestRead { .. } => 2,
            ScreenerError::DataFetch { .. } | ScreenerError::Series(_) => 3,
        }
    }
}

impl From<&ScreenerError> for std::process::ExitCode {
    fn from(err: &ScreenerError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}
