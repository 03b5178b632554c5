//! Daily OHLCV bar representation.

use chrono::NaiveDate;

/// One trading day. Price and volume fields are `None` when the data source
/// had no value for that day.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl OhlcvBar {
    /// Close, with non-finite values treated as missing.
    pub fn valid_close(&self) -> Option<f64> {
        self.close.filter(|c| c.is_finite())
    }

    /// Volume, with non-finite values treated as missing.
    pub fn valid_volume(&self) -> Option<f64> {
        self.volume.filter(|v| v.is_finite())
    }

    /// True when the source supplied nothing at all for this day.
    pub fn is_blank(&self) -> bool {
        self.open.is_none()
            && self.high.is_none()
            && self.low.is_none()
            && self.close.is_none()
            && self.volume.is_none()
    }
}
