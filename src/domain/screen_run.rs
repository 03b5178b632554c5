//! Sequential batch screening over a ticker list.

use crate::domain::filter::VolumeMetric;
use crate::domain::screening::{ScreeningEvaluator, ScreeningReason, ScreeningResult};
use crate::ports::data_port::HistoricalDataPort;
use crate::ports::diagnostic_port::DiagnosticPort;
use std::collections::BTreeMap;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 400;
pub const DEFAULT_SYMBOL_SUFFIX: &str = ".NS";

#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Appended to each ticker before it is handed to the data source.
    pub symbol_suffix: String,
    pub lookback_days: u32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            symbol_suffix: DEFAULT_SYMBOL_SUFFIX.to_string(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl RunSettings {
    pub fn source_symbol(&self, ticker: &str) -> String {
        format!("{}{}", ticker, self.symbol_suffix)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenSummary {
    /// One entry per input ticker, in input order.
    pub results: Vec<ScreeningResult>,
}

impl ScreenSummary {
    pub fn passed_tickers(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.passed)
            .map(|r| r.ticker.as_str())
            .collect()
    }

    pub fn count_by_reason(&self) -> BTreeMap<ScreeningReason, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.results {
            *counts.entry(r.reason).or_insert(0) += 1;
        }
        counts
    }
}

/// Screen a single ticker: fetch, then evaluate. Never fails.
pub fn screen_ticker<M: VolumeMetric>(
    ticker: &str,
    data_port: &dyn HistoricalDataPort,
    evaluator: &ScreeningEvaluator<M>,
    diagnostics: &dyn DiagnosticPort,
    settings: &RunSettings,
) -> ScreeningResult {
    let symbol = settings.source_symbol(ticker);
    let fetched = data_port.fetch_history(&symbol, settings.lookback_days);
    evaluator.evaluate_fetch(ticker, fetched, diagnostics)
}

pub fn run_screen<M: VolumeMetric>(
    tickers: &[String],
    data_port: &dyn HistoricalDataPort,
    evaluator: &ScreeningEvaluator<M>,
    diagnostics: &dyn DiagnosticPort,
    settings: &RunSettings,
) -> ScreenSummary {
    log::info!("Starting screener for {} stocks...", tickers.len());

    let metric = evaluator.volume_metric();
    if metric.is_proxy() {
        log::warn!(
            "Volume check uses {} as a proxy for delivery volume (3x the 5-day average)",
            metric.name()
        );
    }

    let mut results = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        log::info!("--- Checking {} ---", ticker);
        let result = screen_ticker(ticker, data_port, evaluator, diagnostics, settings);
        if result.passed {
            log::info!("*** Stock found: {} ***", ticker);
        }
        results.push(result);
    }

    let summary = ScreenSummary { results };
    let passed = summary.passed_tickers();
    log::info!("--- Screener finished ---");
    log::info!("Found {} stocks: {}", passed.len(), passed.join(", "));
    for (reason, count) in summary.count_by_reason() {
        log::debug!("  {}: {}", reason, count);
    }
    summary
}
