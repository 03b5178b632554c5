//! Ticker manifest read from a file on disk.

use crate::domain::error::ScreenerError;
use crate::domain::manifest::parse_manifest;
use crate::ports::ticker_port::TickerListPort;
use std::fs;
use std::path::PathBuf;

pub struct ManifestFileAdapter {
    path: PathBuf,
}

impl ManifestFileAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TickerListPort for ManifestFileAdapter {
    fn load_tickers(&self) -> Result<Vec<String>, ScreenerError> {
        let content = fs::read_to_string(&self.path).map_err(|e| ScreenerError::ManifestRead {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(parse_manifest(&content))
    }
}
