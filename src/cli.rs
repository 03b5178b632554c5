//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::log_adapter::LogDiagnosticAdapter;
use crate::adapters::manifest_file_adapter::ManifestFileAdapter;
use crate::domain::error::ScreenerError;
use crate::domain::screen_run::{self, RunSettings, DEFAULT_LOOKBACK_DAYS, DEFAULT_SYMBOL_SUFFIX};
use crate::domain::filter::TradedVolume;
use crate::domain::screening::ScreeningEvaluator;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::HistoricalDataPort;
use crate::ports::ticker_port::TickerListPort;

#[derive(Parser, Debug)]
#[command(
    name = "trendscreen",
    about = "Screen equities for a 200 DMA trend band and a volume spike"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Screen every ticker in a manifest and print those that pass
    Screen {
        /// Comma-delimited `<prefix>:<symbol>` manifest
        #[arg(short, long)]
        tickers: Option<PathBuf>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Screen a single ticker and print the verdict
    Check {
        #[arg(long)]
        ticker: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the cleaned ticker list from a manifest
    ParseManifest {
        #[arg(short, long)]
        tickers: PathBuf,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,
    /// Directory of `<symbol>.csv` files (csv source only)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Market suffix appended to each ticker, e.g. `.NS`
    #[arg(long)]
    pub suffix: Option<String>,
    #[arg(long)]
    pub lookback_days: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    Yahoo,
    Csv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub source: SourceKind,
    pub data_dir: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub settings: RunSettings,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Screen { tickers, source } => run_screen(tickers.as_deref(), &source),
        Command::Check { ticker, source } => run_check(&ticker, &source),
        Command::ParseManifest { tickers } => run_parse_manifest(&tickers),
    }
}

fn fail(err: &ScreenerError) -> ExitCode {
    log::error!("{err}");
    ExitCode::from(err)
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, ScreenerError> {
    match path {
        None => Ok(FileConfigAdapter::empty()),
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path).map_err(|e| ScreenerError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
        }
    }
}

/// Merge INI values with command-line overrides; flags win.
pub fn build_screen_config(
    adapter: &dyn ConfigPort,
    overrides: &SourceArgs,
) -> Result<ScreenConfig, ScreenerError> {
    let source = match overrides.source {
        Some(kind) => kind,
        None => match adapter.get_string("source", "kind") {
            None => SourceKind::Yahoo,
            Some(raw) => SourceKind::from_str(&raw, true).map_err(|_| {
                ScreenerError::ConfigInvalid {
                    section: "source".into(),
                    key: "kind".into(),
                    reason: format!("unknown source {:?} (expected yahoo or csv)", raw),
                }
            })?,
        },
    };

    let data_dir = overrides
        .data_dir
        .clone()
        .or_else(|| adapter.get_string("source", "data_dir").map(PathBuf::from));
    if source == SourceKind::Csv && data_dir.is_none() {
        return Err(ScreenerError::ConfigMissing {
            section: "source".into(),
            key: "data_dir".into(),
        });
    }

    let symbol_suffix = overrides
        .suffix
        .clone()
        .or_else(|| adapter.get_raw("source", "symbol_suffix"))
        .unwrap_or_else(|| DEFAULT_SYMBOL_SUFFIX.to_string());

    let lookback_days = match overrides.lookback_days {
        Some(days) => i64::from(days),
        None => adapter
            .get_int("source", "lookback_days")
            .map_err(|raw| ScreenerError::ConfigInvalid {
                section: "source".into(),
                key: "lookback_days".into(),
                reason: format!("not an integer: {:?}", raw),
            })?
            .unwrap_or(i64::from(DEFAULT_LOOKBACK_DAYS)),
    };
    let lookback_days = u32::try_from(lookback_days)
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| ScreenerError::ConfigInvalid {
            section: "source".into(),
            key: "lookback_days".into(),
            reason: format!("must be a positive number of days, got {}", lookback_days),
        })?;

    Ok(ScreenConfig {
        source,
        data_dir,
        manifest: adapter.get_string("manifest", "path").map(PathBuf::from),
        settings: RunSettings {
            symbol_suffix,
            lookback_days,
        },
    })
}

pub fn build_data_port(config: &ScreenConfig) -> Result<Box<dyn HistoricalDataPort>, ScreenerError> {
    match config.source {
        SourceKind::Csv => {
            let dir = config
                .data_dir
                .clone()
                .ok_or_else(|| ScreenerError::ConfigMissing {
                    section: "source".into(),
                    key: "data_dir".into(),
                })?;
            Ok(Box::new(CsvAdapter::new(dir)))
        }
        SourceKind::Yahoo => {
            #[cfg(feature = "yahoo")]
            {
                use crate::adapters::yahoo_adapter::YahooAdapter;
                Ok(Box::new(YahooAdapter::new()?))
            }

            #[cfg(not(feature = "yahoo"))]
            {
                Err(ScreenerError::ConfigInvalid {
                    section: "source".into(),
                    key: "kind".into(),
                    reason: "yahoo feature is required for the yahoo source".into(),
                })
            }
        }
    }
}

fn prepare(source: &SourceArgs) -> Result<(ScreenConfig, Box<dyn HistoricalDataPort>), ScreenerError> {
    let adapter = load_config(source.config.as_deref())?;
    let config = build_screen_config(&adapter, source)?;
    let data_port = build_data_port(&config)?;
    Ok((config, data_port))
}

fn run_screen(tickers_path: Option<&Path>, source: &SourceArgs) -> ExitCode {
    let (config, data_port) = match prepare(source) {
        Ok(v) => v,
        Err(e) => return fail(&e),
    };

    let manifest = match tickers_path.map(Path::to_path_buf).or(config.manifest.clone()) {
        Some(p) => p,
        None => {
            return fail(&ScreenerError::ConfigMissing {
                section: "manifest".into(),
                key: "path".into(),
            });
        }
    };

    let tickers = match ManifestFileAdapter::new(manifest).load_tickers() {
        Ok(t) => t,
        Err(e) => return fail(&e),
    };
    if tickers.is_empty() {
        log::warn!("Manifest contains no <prefix>:<symbol> entries");
    }

    let summary = screen_run::run_screen(
        &tickers,
        data_port.as_ref(),
        &ScreeningEvaluator::<TradedVolume>::default(),
        &LogDiagnosticAdapter,
        &config.settings,
    );

    for ticker in summary.passed_tickers() {
        println!("{}", ticker);
    }
    ExitCode::SUCCESS
}

fn run_check(ticker: &str, source: &SourceArgs) -> ExitCode {
    let (config, data_port) = match prepare(source) {
        Ok(v) => v,
        Err(e) => return fail(&e),
    };

    let result = screen_run::screen_ticker(
        ticker,
        data_port.as_ref(),
        &ScreeningEvaluator::<TradedVolume>::default(),
        &LogDiagnosticAdapter,
        &config.settings,
    );
    println!("{}", result);
    ExitCode::SUCCESS
}

fn run_parse_manifest(path: &Path) -> ExitCode {
    match ManifestFileAdapter::new(path.to_path_buf()).load_tickers() {
        Ok(tickers) => {
            for t in &tickers {
                println!("{}", t);
            }
            log::info!("{} tickers", tickers.len());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}
