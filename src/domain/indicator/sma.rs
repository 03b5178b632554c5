//! Simple Moving Average.
//!
//! SMA(n)[i] = (P[i-n+1] + ... + P[i]) / n
//! Undefined when fewer than n values precede i or any value in the window is
//! missing.

use crate::domain::indicator::mean;

/// SMA(n) at the final position of `values`.
///
/// Only the trailing `period` values are read; anything earlier cannot
/// influence the last point of a rolling SMA.
pub fn trailing_sma(values: &[Option<f64>], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    let present: Option<Vec<f64>> = window
        .iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect();
    mean(&present?)
}
