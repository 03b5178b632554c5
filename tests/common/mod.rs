#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::cell::RefCell;
use std::collections::HashMap;
use trendscreen::domain::diagnostic::Diagnostic;
use trendscreen::domain::error::ScreenerError;
pub use trendscreen::domain::ohlcv::OhlcvBar;
use trendscreen::domain::series::HistoricalSeries;
use trendscreen::ports::data_port::HistoricalDataPort;
use trendscreen::ports::diagnostic_port::DiagnosticPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<String>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl HistoricalDataPort for MockDataPort {
    fn fetch_history(
        &self,
        symbol: &str,
        _lookback_days: u32,
    ) -> Result<HistoricalSeries, ScreenerError> {
        self.requests.borrow_mut().push(symbol.to_string());
        if let Some(reason) = self.errors.get(symbol) {
            return Err(ScreenerError::data_fetch(symbol, reason.clone()));
        }
        let bars = self.data.get(symbol).cloned().unwrap_or_default();
        Ok(HistoricalSeries::new(symbol, bars)?)
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    pub events: RefCell<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn for_ticker(&self, ticker: &str) -> Vec<Diagnostic> {
        self.events
            .borrow()
            .iter()
            .filter(|d| d.ticker() == ticker)
            .cloned()
            .collect()
    }
}

impl DiagnosticPort for RecordingDiagnostics {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.events.borrow_mut().push(diagnostic.clone());
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive daily bars from 2023-01-02 with the given closes and volumes.
pub fn make_bars(closes: &[f64], volumes: &[f64]) -> Vec<OhlcvBar> {
    assert_eq!(closes.len(), volumes.len());
    let start = date(2023, 1, 2);
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| OhlcvBar {
            date: start + Duration::days(i as i64),
            open: Some(close - 1.0),
            high: Some(close + 1.0),
            low: Some(close - 2.0),
            close: Some(close),
            volume: Some(volume),
        })
        .collect()
}

pub fn make_series(closes: &[f64], volumes: &[f64]) -> HistoricalSeries {
    HistoricalSeries::new("TEST", make_bars(closes, volumes)).unwrap()
}

/// 250 flat closes at 100, volume 1000 except the last bar at 4000.
pub fn passing_bars() -> Vec<OhlcvBar> {
    let mut volumes = vec![1000.0; 250];
    volumes[249] = 4000.0;
    make_bars(&[100.0; 250], &volumes)
}

/// Closes rising linearly so that the last close is 1.10 x SMA(200).
pub fn rising_closes(count: usize) -> Vec<f64> {
    // close[i] = 100 + s*i; SMA over the last 200 = 100 + s*(count - 100.5);
    // last = 100 + s*(count - 1). Solve last = 1.10 * SMA for s.
    let n = count as f64;
    let s = 10.0 / ((n - 1.0) - 1.10 * (n - 100.5));
    (0..count).map(|i| 100.0 + s * i as f64).collect()
}
