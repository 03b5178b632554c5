//! Port traits for the screener's external collaborators.

pub mod config_port;
pub mod data_port;
pub mod diagnostic_port;
pub mod ticker_port;
