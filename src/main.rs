//! twinpane - a keyboard-driven dual-pane terminal file manager.
//!
//! Usage:
//!   twinpane                       Browse the current directory
//!   twinpane --log-file PATH       Also write logs to PATH
//!   twinpane --help                Show help

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable naming a log file when `--log-file` is not given.
const LOG_FILE_ENV: &str = "TWINPANE_LOG_FILE";

#[derive(Parser)]
#[command(
    name = "twinpane",
    version,
    about = "A keyboard-driven dual-pane terminal file manager",
    long_about = "twinpane shows two directories side by side and copies or moves \
                  files between them in the background.\n\n\
                  Both panes start in the current directory."
)]
struct Cli {
    /// Write logs to this file (or set TWINPANE_LOG_FILE). Nothing is logged otherwise.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "twinpane_ops=trace". RUST_LOG takes precedence.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli)?;

    let start = std::env::current_dir().context("Cannot read the current directory")?;
    let config = twinpane_tui::TuiConfig::new().with_start_dir(start);
    twinpane_tui::run(config)?;

    Ok(())
}

/// Install a file-backed subscriber when a log file was requested. The
/// terminal belongs to the TUI, so logs never go to stdout or stderr.
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = cli
        .log_file
        .clone()
        .or_else(|| std::env::var_os(LOG_FILE_ENV).map(PathBuf::from))
    else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Cannot open log file {}", path.display()))?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cli.log_level)
            .with_context(|| format!("Invalid log level {:?}", cli.log_level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging to {}", path.display());
    Ok(())
}
