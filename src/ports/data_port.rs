//! Historical data access port.

use crate::domain::error::ScreenerError;
use crate::domain::series::HistoricalSeries;

pub trait HistoricalDataPort {
    /// Daily bars for `symbol` covering roughly the last `lookback_days`
    /// calendar days, oldest first. `symbol` is passed through verbatim,
    /// including any market suffix.
    fn fetch_history(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<HistoricalSeries, ScreenerError>;
}
