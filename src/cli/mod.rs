//! CLI definitions.

pub mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use swing_config::{load_config, AppConfig};
use swing_core::types::Style;
use tracing::warn;

#[derive(Parser)]
#[command(name = "swing")]
#[command(author, version, about = "Swing-trading equity screener and rule backtester")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the universe and decide TRADE / WAIT / NO_TRADE per stock
    Scan(ScanArgs),
    /// Replay the entry rule over history
    Backtest(BacktestArgs),
    /// Score the latest setup of every stock
    Rank(RankArgs),
    /// Show the decisions of the most recent scan
    LastScan(LastScanArgs),
    /// List trading styles and their parameters
    Styles,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Symbols to scan (comma-separated); defaults to the universe file
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Trading style (conservative, normal, aggressive)
    #[arg(short, long)]
    pub style: Option<Style>,

    /// Scan only the first N symbols
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Directory holding per-symbol CSV files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Print a narrative for every trade
    #[arg(long)]
    pub explain: bool,

    /// Do not write the JSONL scan log
    #[arg(long)]
    pub no_log: bool,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Symbols to replay (comma-separated); defaults to the universe file
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Trading style (conservative, normal, aggressive)
    #[arg(short, long)]
    pub style: Option<Style>,

    /// Capital used for sizing
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Directory holding per-symbol CSV files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Save every closed trade as CSV
    #[arg(long)]
    pub trades_csv: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct RankArgs {
    /// Symbols to rank (comma-separated); defaults to the universe file
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// How many stocks to show
    #[arg(short, long, default_value = "5")]
    pub top: usize,

    /// Directory holding per-symbol CSV files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct LastScanArgs {
    /// Directory holding scan logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Show the rule trace of every decision
    #[arg(long)]
    pub trace: bool,
}

/// Read the configuration file. `None` when the file does not exist.
pub fn load_settings(path: &Path) -> Result<Option<AppConfig>> {
    if !path.is_file() {
        return Ok(None);
    }
    load_config(path)
        .map(Some)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Resolve the configuration for a command, rejecting invalid settings.
pub fn settings(loaded: Result<Option<AppConfig>>, path: &Path) -> Result<AppConfig> {
    let config = match loaded? {
        Some(config) => config,
        None => {
            warn!(path = %path.display(), "Configuration file not found, using defaults");
            AppConfig::default()
        }
    };
    config.ensure_valid()?;
    Ok(config)
}

/// Symbols given on the command line, or the universe file.
pub fn resolve_symbols(explicit: &[String], config: &AppConfig) -> Result<Vec<String>> {
    if !explicit.is_empty() {
        return Ok(explicit
            .iter()
            .map(|s| s.trim().trim_end_matches(".NS").to_uppercase())
            .filter(|s| !s.is_empty())
            .collect());
    }

    let universe = &config.scan.universe_file;
    swing_data::load_universe(universe)
        .with_context(|| format!("Failed to load stock universe from {}", universe.display()))
}
