//! Per-ticker screening: trend band, then volume spike, AND-combined.

use crate::domain::diagnostic::Diagnostic;
use crate::domain::error::ScreenerError;
use crate::domain::filter::trend_band::SMA_PERIOD;
use crate::domain::filter::volume_spike::VOLUME_WINDOW;
use crate::domain::filter::{
    TradedVolume, TrendBandFilter, TrendCheck, VolumeCheck, VolumeMetric, VolumeSpikeFilter,
};
use crate::domain::series::HistoricalSeries;
use crate::ports::diagnostic_port::DiagnosticPort;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScreeningReason {
    PassedAll,
    InsufficientTrendData,
    OutOfTrendBand,
    InsufficientVolumeData,
    InsufficientVolumeSpike,
    DataFetchError,
}

impl ScreeningReason {
    pub fn is_pass(self) -> bool {
        self == ScreeningReason::PassedAll
    }
}

impl fmt::Display for ScreeningReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScreeningReason::PassedAll => "passed all checks",
            ScreeningReason::InsufficientTrendData => "insufficient data for 200 DMA",
            ScreeningReason::OutOfTrendBand => "outside 200 DMA band",
            ScreeningReason::InsufficientVolumeData => "insufficient volume data",
            ScreeningReason::InsufficientVolumeSpike => "no volume spike",
            ScreeningReason::DataFetchError => "data fetch error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningResult {
    pub ticker: String,
    pub passed: bool,
    pub reason: ScreeningReason,
}

impl ScreeningResult {
    pub fn new(ticker: impl Into<String>, reason: ScreeningReason) -> Self {
        Self {
            ticker: ticker.into(),
            passed: reason.is_pass(),
            reason,
        }
    }
}

impl fmt::Display for ScreeningResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "{}: {} ({})", self.ticker, verdict, self.reason)
    }
}

/// Stateless across tickers; one instance can screen a whole batch.
#[derive(Debug, Clone, Default)]
pub struct ScreeningEvaluator<M: VolumeMetric = TradedVolume> {
    trend: TrendBandFilter,
    volume: VolumeSpikeFilter<M>,
}

impl<M: VolumeMetric> ScreeningEvaluator<M> {
    pub fn with_volume_metric(metric: M) -> Self {
        Self {
            trend: TrendBandFilter,
            volume: VolumeSpikeFilter::with_metric(metric),
        }
    }

    pub fn volume_metric(&self) -> &M {
        self.volume.metric()
    }

    pub fn evaluate(
        &self,
        ticker: &str,
        series: &HistoricalSeries,
        diagnostics: &dyn DiagnosticPort,
    ) -> ScreeningResult {
        if series.is_empty() {
            diagnostics.emit(&Diagnostic::NoData {
                ticker: ticker.to_string(),
            });
            return ScreeningResult::new(ticker, ScreeningReason::DataFetchError);
        }

        match self.trend.evaluate(series) {
            TrendCheck::Insufficient { available } => {
                diagnostics.emit(&Diagnostic::TrendInsufficient {
                    ticker: ticker.to_string(),
                    available,
                    required: SMA_PERIOD,
                });
                return ScreeningResult::new(ticker, ScreeningReason::InsufficientTrendData);
            }
            TrendCheck::Evaluated {
                last_close,
                moving_average,
                within_band,
            } => {
                diagnostics.emit(&Diagnostic::TrendChecked {
                    ticker: ticker.to_string(),
                    last_close,
                    moving_average,
                    passed: within_band,
                });
                if !within_band {
                    return ScreeningResult::new(ticker, ScreeningReason::OutOfTrendBand);
                }
            }
        }

        match self.volume.evaluate(series) {
            VolumeCheck::Insufficient { available } => {
                diagnostics.emit(&Diagnostic::VolumeInsufficient {
                    ticker: ticker.to_string(),
                    available,
                    required: VOLUME_WINDOW,
                });
                ScreeningResult::new(ticker, ScreeningReason::InsufficientVolumeData)
            }
            VolumeCheck::Evaluated {
                latest,
                baseline_average,
                spiked,
            } => {
                diagnostics.emit(&Diagnostic::VolumeChecked {
                    ticker: ticker.to_string(),
                    latest,
                    baseline_average,
                    passed: spiked,
                    metric: self.volume.metric().name().to_string(),
                });
                if spiked {
                    ScreeningResult::new(ticker, ScreeningReason::PassedAll)
                } else {
                    ScreeningResult::new(ticker, ScreeningReason::InsufficientVolumeSpike)
                }
            }
        }
    }

    /// Screen the outcome of a fetch. Any fetch or shaping error degrades this
    /// ticker to `DataFetchError`; nothing propagates.
    pub fn evaluate_fetch(
        &self,
        ticker: &str,
        fetched: Result<HistoricalSeries, ScreenerError>,
        diagnostics: &dyn DiagnosticPort,
    ) -> ScreeningResult {
        match fetched {
            Ok(series) => self.evaluate(ticker, &series, diagnostics),
            Err(e) => {
                diagnostics.emit(&Diagnostic::FetchFailed {
                    ticker: ticker.to_string(),
                    reason: format!("{e:?}: {e}"),
                });
                ScreeningResult::new(ticker, ScreeningReason::DataFetchError)
            }
        }
    }
}
