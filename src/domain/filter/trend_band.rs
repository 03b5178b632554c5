//! 200-day moving-average trend band.
//!
//! Passes when the latest close sits inside [0.95 * SMA(200), 1.05 * SMA(200)],
//! both ends inclusive.

use crate::domain::indicator::trailing_sma;
use crate::domain::series::HistoricalSeries;

pub const SMA_PERIOD: usize = 200;
pub const BAND_LOWER: f64 = 0.95;
pub const BAND_UPPER: f64 = 1.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendCheck {
    /// SMA(200) is undefined at the last bar.
    Insufficient { available: usize },
    Evaluated {
        last_close: f64,
        moving_average: f64,
        within_band: bool,
    },
}

impl TrendCheck {
    pub fn passed(&self) -> bool {
        matches!(self, TrendCheck::Evaluated { within_band: true, .. })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrendBandFilter;

impl TrendBandFilter {
    pub fn evaluate(&self, series: &HistoricalSeries) -> TrendCheck {
        let closes: Vec<Option<f64>> = series.bars().iter().map(|b| b.valid_close()).collect();
        let available = closes.iter().rev().take_while(|c| c.is_some()).count();

        let moving_average = trailing_sma(&closes, SMA_PERIOD);
        // The last close is inside the SMA window, so a defined SMA implies a
        // defined last close.
        match (moving_average, closes.last().copied().flatten()) {
            (Some(moving_average), Some(last_close)) => TrendCheck::Evaluated {
                last_close,
                moving_average,
                within_band: Self::within_band(last_close, moving_average),
            },
            _ => TrendCheck::Insufficient { available },
        }
    }

    pub fn within_band(last_close: f64, moving_average: f64) -> bool {
        last_close >= BAND_LOWER * moving_average && last_close <= BAND_UPPER * moving_average
    }
}
