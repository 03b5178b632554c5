//! Concrete adapter implementations for ports.

#[cfg(feature = "yahoo")]
pub mod yahoo_adapter;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod log_adapter;
pub mod manifest_file_adapter;
