//! Backtest command implementation.

use anyhow::{Context, Result};
use swing_backtest::{BacktestConfig, BacktestSimulator};
use swing_config::AppConfig;
use swing_core::traits::PriceSource;
use swing_data::DirectorySource;
use tracing::info;

use crate::cli::{resolve_symbols, BacktestArgs};

pub async fn run(args: BacktestArgs, config: AppConfig) -> Result<()> {
    let style = args.style.unwrap_or(config.risk.style);
    let data_dir = args.data_dir.clone().unwrap_or_else(|| config.scan.data_dir.clone());
    let symbols = resolve_symbols(&args.symbols, &config)?;

    info!(
        style = %style,
        symbols = symbols.len(),
        data_dir = %data_dir.display(),
        "Starting backtest"
    );

    let backtest_config = BacktestConfig {
        capital: args.capital.unwrap_or(config.risk.capital),
        risk_fraction: config.risk.risk_fraction,
        max_risk_fraction: config.risk.max_risk_fraction,
        style,
        profile: config.styles.profile(style).clone(),
    };
    let simulator = BacktestSimulator::new(backtest_config).context("Invalid backtest settings")?;

    // Replay is CPU-bound; keep it off the async workers
    let report = tokio::task::spawn_blocking(move || {
        let source = DirectorySource::new(data_dir);
        let inputs = symbols.into_iter().map(|symbol| {
            let loaded = source.load(&symbol);
            (symbol, loaded)
        });
        simulator.run_all(inputs)
    })
    .await
    .context("Backtest task failed")?;

    // Output results
    match args.output.as_str() {
        "json" => {
            let json = report.to_json()?;
            println!("{}", json);
        }
        _ => {
            println!("{}", report.summary());
        }
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        let json = report.to_json()?;
        std::fs::write(save_path, json)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    if let Some(csv_path) = &args.trades_csv {
        let csv = report.trades_to_csv().context("Failed to export trades")?;
        std::fs::write(csv_path, csv)
            .with_context(|| format!("Failed to write {}", csv_path.display()))?;
        info!("Trades saved to {:?}", csv_path);
    }

    Ok(())
}
