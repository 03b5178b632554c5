//! Core domain types and logic.

pub mod ohlcv;
pub mod series;
pub mod indicator;
pub mod filter;
pub mod diagnostic;
pub mod screening;
pub mod screen_run;
pub mod manifest;
pub mod error;
