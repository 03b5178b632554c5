//! Yahoo Finance chart API adapter.
//!
//! Fetches daily bars from the v8 chart endpoint with a blocking client. No
//! retry and no backoff: a failed request fails that symbol only.

use crate::domain::error::ScreenerError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::series::HistoricalSeries;
use crate::ports::data_port::HistoricalDataPort;
use chrono::DateTime;
use serde::Deserialize;
use std::time::Duration;

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

pub struct YahooAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooAdapter {
    pub fn new() -> Result<Self, ScreenerError> {
        Self::with_base_url(CHART_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ScreenerError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("trendscreen/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScreenerError::Io(std::io::Error::other(e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn chart_url(&self, symbol: &str, lookback_days: u32) -> String {
        format!(
            "{}/{}?range={}d&interval=1d&includePrePost=false",
            self.base_url.trim_end_matches('/'),
            symbol,
            lookback_days
        )
    }
}

impl HistoricalDataPort for YahooAdapter {
    fn fetch_history(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<HistoricalSeries, ScreenerError> {
        let url = self.chart_url(symbol, lookback_days);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("referer", "https://finance.yahoo.com/")
            .send()
            .map_err(|e| ScreenerError::data_fetch(symbol, format!("transport error: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ScreenerError::data_fetch(symbol, format!("failed to read body: {}", e)))?;

        // Unknown symbols come back as 404 with a chart error payload.
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Ok(parsed) = serde_json::from_str::<ChartResponse>(&body) {
                if let Some(err) = parsed.chart.error {
                    return Err(ScreenerError::data_fetch(
                        symbol,
                        format!("{}: {}", err.code, err.description),
                    ));
                }
            }
        }
        if !status.is_success() {
            return Err(ScreenerError::data_fetch(
                symbol,
                format!("yahoo returned status {}", status.as_u16()),
            ));
        }

        let series = parse_chart(symbol, &body)?;
        if let (Some(first), Some(last)) = (series.first_date(), series.last_date()) {
            log::debug!("{}: {} bars from {} to {}", symbol, series.len(), first, last);
        }
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Turn a chart API body into a series. Rows with every field null are
/// non-trading placeholders and are dropped.
pub fn parse_chart(symbol: &str, body: &str) -> Result<HistoricalSeries, ScreenerError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| ScreenerError::data_fetch(symbol, format!("failed to parse chart: {}", e)))?;

    if let Some(err) = response.chart.error {
        return Err(ScreenerError::data_fetch(
            symbol,
            format!("{}: {}", err.code, err.description),
        ));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(HistoricalSeries::empty(symbol));
    };

    let timestamps = result.timestamp.unwrap_or_default();
    let offset = result.meta.map(|m| m.gmtoffset).unwrap_or(0);
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let at = |v: &[Option<f64>], i: usize| v.get(i).copied().flatten();

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = DateTime::from_timestamp(ts + offset, 0)
            .ok_or_else(|| ScreenerError::data_fetch(symbol, format!("invalid timestamp {}", ts)))?
            .date_naive();
        let bar = OhlcvBar {
            date,
            open: at(&quote.open, i),
            high: at(&quote.high, i),
            low: at(&quote.low, i),
            close: at(&quote.close, i),
            volume: at(&quote.volume, i),
        };
        if !bar.is_blank() {
            bars.push(bar);
        }
    }

    Ok(HistoricalSeries::new(symbol, latest_per_date(bars))?)
}

/// Sort by date and keep only the last row for each date. During a session
/// the live bar arrives as an extra row dated the same as the last daily one.
fn latest_per_date(mut bars: Vec<OhlcvBar>) -> Vec<OhlcvBar> {
    bars.sort_by_key(|b| b.date);
    let mut merged: Vec<OhlcvBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match merged.last_mut() {
            Some(prev) if prev.date == bar.date => *prev = bar,
            _ => merged.push(bar),
        }
    }
    merged
}
