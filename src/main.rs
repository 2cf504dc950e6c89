//! Swing screener CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{commands, Cli, Commands};
use swing_config::LoggingConfig;
use swing_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = cli::load_settings(&cli.config);

    // Setup logging
    let logging = match &loaded {
        Ok(Some(config)) => config.logging.clone(),
        _ => LoggingConfig::default(),
    };
    let log_level = match cli.log_level {
        Some(cli::LogLevel::Trace) => "trace",
        Some(cli::LogLevel::Debug) => "debug",
        Some(cli::LogLevel::Info) => "info",
        Some(cli::LogLevel::Warn) => "warn",
        Some(cli::LogLevel::Error) => "error",
        None => logging.level.as_str(),
    };
    let _guard = setup_logging(
        log_level,
        cli.json_logs || logging.is_json(),
        logging.file.as_deref(),
    );

    // Execute command
    match cli.command {
        Commands::Scan(args) => commands::scan::run(args, cli::settings(loaded, &cli.config)?).await,
        Commands::Backtest(args) => {
            commands::backtest::run(args, cli::settings(loaded, &cli.config)?).await
        }
        Commands::Rank(args) => commands::rank::run(args, cli::settings(loaded, &cli.config)?).await,
        Commands::LastScan(args) => {
            commands::last_scan::run(args, cli::settings(loaded, &cli.config)?).await
        }
        Commands::Styles => commands::styles::run(cli::settings(loaded, &cli.config)?).await,
        Commands::ValidateConfig => commands::validate::run(&cli.config).await,
    }
}
