//! Observational events emitted at each screening decision point.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    NoData {
        ticker: String,
    },
    FetchFailed {
        ticker: String,
        reason: String,
    },
    TrendInsufficient {
        ticker: String,
        available: usize,
        required: usize,
    },
    TrendChecked {
        ticker: String,
        last_close: f64,
        moving_average: f64,
        passed: bool,
    },
    VolumeInsufficient {
        ticker: String,
        available: usize,
        required: usize,
    },
    VolumeChecked {
        ticker: String,
        latest: f64,
        baseline_average: f64,
        passed: bool,
        metric: String,
    },
}

impl Diagnostic {
    pub fn ticker(&self) -> &str {
        match self {
            Diagnostic::NoData { ticker }
            | Diagnostic::FetchFailed { ticker, .. }
            | Diagnostic::TrendInsufficient { ticker, .. }
            | Diagnostic::TrendChecked { ticker, .. }
            | Diagnostic::VolumeInsufficient { ticker, .. }
            | Diagnostic::VolumeChecked { ticker, .. } => ticker,
        }
    }

    /// Data-missing and fetch events, as opposed to filter verdicts.
    pub fn is_data_problem(&self) -> bool {
        matches!(
            self,
            Diagnostic::NoData { .. }
                | Diagnostic::FetchFailed { .. }
                | Diagnostic::TrendInsufficient { .. }
                | Diagnostic::VolumeInsufficient { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoData { ticker } => write!(f, "{ticker}: no historical data"),
            Diagnostic::FetchFailed { ticker, reason } => {
                write!(f, "{ticker}: error while checking: {reason}")
            }
            Diagnostic::TrendInsufficient {
                ticker,
                available,
                required,
            } => write!(
                f,
                "{ticker}: not enough data for {required} DMA ({available} usable closes)"
            ),
            Diagnostic::TrendChecked {
                ticker,
                last_close,
                moving_average,
                passed: true,
            } => write!(
                f,
                "{ticker}: passes 200 DMA check. Last price: {last_close:.2}, 200 DMA: {moving_average:.2}"
            ),
            Diagnostic::TrendChecked {
                ticker,
                last_close,
                moving_average,
                passed: false,
            } => write!(
                f,
                "{ticker}: fails 200 DMA check. Last price: {last_close:.2}, 200 DMA: {moving_average:.2}"
            ),
            Diagnostic::VolumeInsufficient {
                ticker,
                available,
                required,
            } => write!(
                f,
                "{ticker}: not enough volume data. Found {available} of {required} days"
            ),
            Diagnostic::VolumeChecked {
                ticker,
                latest,
                baseline_average,
                passed,
                metric,
            } => {
                let verdict = if *passed { "passes" } else { "fails" };
                write!(
                    f,
                    "{ticker}: {verdict} volume check ({metric}). Latest: {latest:.2}, 5-day avg: {baseline_average:.2}"
                )
            }
        }
    }
}
