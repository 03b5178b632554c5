//! INI file configuration adapter.
//!
//! ```ini
//! [source]
//! kind = csv
//! data_dir = ./data
//! symbol_suffix = .NS
//! lookback_days = 400
//!
//! [manifest]
//! path = watchlist.csv
//! ```
//!
//! `kind` is `yahoo` or `csv`; `data_dir` is required for `csv`. A blank
//! `symbol_suffix =` means no suffix; omitting the key gives `.NS`.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// An adapter with no sections; every lookup falls through to defaults.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.get_raw(section, key).filter(|v| !v.is_empty())
    }

    fn get_raw(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key).map(|v| v.trim().to_string())
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, String> {
        match self.get_string(section, key) {
            None => Ok(None),
            Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| raw),
        }
    }
}
