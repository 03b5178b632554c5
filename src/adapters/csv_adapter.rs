//! CSV file data adapter for offline screening.
//!
//! One file per symbol, `<base_path>/<symbol>.csv`, with header
//! `date,open,high,low,close,volume`. Empty cells are missing values.

use crate::domain::error::ScreenerError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::series::HistoricalSeries;
use crate::ports::data_port::HistoricalDataPort;
use chrono::{Duration, NaiveDate};
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn optional_field(
        record: &csv::StringRecord,
        index: usize,
        name: &str,
        symbol: &str,
    ) -> Result<Option<f64>, ScreenerError> {
        let raw = record
            .get(index)
            .ok_or_else(|| ScreenerError::data_fetch(symbol, format!("missing {} column", name)))?
            .trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<f64>().map(Some).map_err(|e| {
            ScreenerError::data_fetch(symbol, format!("invalid {} value {:?}: {}", name, raw, e))
        })
    }
}

impl HistoricalDataPort for CsvAdapter {
    fn fetch_history(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<HistoricalSeries, ScreenerError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| {
            ScreenerError::data_fetch(symbol, format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result
                .map_err(|e| ScreenerError::data_fetch(symbol, format!("CSV parse error: {}", e)))?;

            let date_str = record
                .get(0)
                .ok_or_else(|| ScreenerError::data_fetch(symbol, "missing date column"))?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                ScreenerError::data_fetch(symbol, format!("invalid date format: {}", e))
            })?;

            bars.push(OhlcvBar {
                date,
                open: Self::optional_field(&record, 1, "open", symbol)?,
                high: Self::optional_field(&record, 2, "high", symbol)?,
                low: Self::optional_field(&record, 3, "low", symbol)?,
                close: Self::optional_field(&record, 4, "close", symbol)?,
                volume: Self::optional_field(&record, 5, "volume", symbol)?,
            });
        }

        // Lookback is measured back from the newest bar in the file so that
        // stored snapshots screen the same way regardless of when they run.
        if let Some(newest) = bars.iter().map(|b| b.date).max() {
            let cutoff = newest - Duration::days(i64::from(lookback_days));
            bars.retain(|b| b.date > cutoff);
        }

        Ok(HistoricalSeries::from_unsorted(symbol, bars)?)
    }
}
