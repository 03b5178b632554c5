use clap::Parser;
use trendscreen::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    run(Cli::parse())
}
