//! Ticker manifest parsing.
//!
//! A manifest is a comma-delimited list of `<prefix>:<symbol>` entries, as
//! exported by charting watchlists (`"NSE:INFY","NSE:TCS"`). Quotes are
//! stripped; entries without a `:` are skipped.

use std::collections::HashSet;

pub fn parse_manifest(content: &str) -> Vec<String> {
    let unquoted = content.trim().replace('"', "");
    let mut seen = HashSet::new();
    let mut tickers = Vec::new();

    for entry in unquoted.split(',') {
        let Some(symbol) = entry.split(':').nth(1) else {
            continue;
        };
        let symbol = symbol.trim();
        if symbol.is_empty() {
            continue;
        }
        if seen.insert(symbol.to_string()) {
            tickers.push(symbol.to_string());
        }
    }

    tickers
}
