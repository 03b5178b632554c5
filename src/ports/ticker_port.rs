//! Ticker list source port.

use crate::domain::error::ScreenerError;

pub trait TickerListPort {
    /// Symbols to screen, in manifest order.
    fn load_tickers(&self) -> Result<Vec<String>, ScreenerError>;
}
