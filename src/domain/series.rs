//! Chronologically ordered bar history for one symbol.
//!
//! Built once at the data-source boundary; immutable afterwards. Every
//! consumer can rely on strictly ascending, unique dates with the most
//! recent bar last.

use crate::domain::error::SeriesError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    symbol: String,
    bars: Vec<OhlcvBar>,
}

impl HistoricalSeries {
    /// Wrap bars that are already in ascending date order.
    pub fn new(symbol: impl Into<String>, bars: Vec<OhlcvBar>) -> Result<Self, SeriesError> {
        for (i, pair) in bars.windows(2).enumerate() {
            let (prev, cur) = (pair[0].date, pair[1].date);
            if cur == prev {
                return Err(SeriesError::DuplicateDate { date: cur });
            }
            if cur < prev {
                return Err(SeriesError::OutOfOrder {
                    index: i + 1,
                    date: cur,
                    previous: prev,
                });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    /// Sort by date, then validate. Duplicates are still rejected.
    pub fn from_unsorted(
        symbol: impl Into<String>,
        mut bars: Vec<OhlcvBar>,
    ) -> Result<Self, SeriesError> {
        bars.sort_by_key(|b| b.date);
        Self::new(symbol, bars)
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&OhlcvBar> {
        self.bars.last()
    }

    /// The trailing `n` bars, or the whole series if it is shorter.
    pub fn tail(&self, n: usize) -> &[OhlcvBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}
