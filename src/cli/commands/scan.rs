//! Scan command implementation.

use anyhow::{Context, Result};
use chrono::Local;
use std::sync::Arc;
use swing_config::AppConfig;
use swing_data::DirectorySource;
use swing_monitor::{DecisionRecord, ScanLog, ScanMeta};
use swing_rules::explain_trade;
use swing_scan::{ScanReport, Scanner, ScannerConfig};
use tokio::task::JoinSet;
use tracing::info;

use crate::cli::{resolve_symbols, ScanArgs};

pub async fn run(args: ScanArgs, config: AppConfig) -> Result<()> {
    let style = args.style.unwrap_or(config.risk.style);
    let data_dir = args.data_dir.clone().unwrap_or_else(|| config.scan.data_dir.clone());

    let universe = resolve_symbols(&args.symbols, &config)?;
    let total_symbols = universe.len();
    let symbols: Vec<String> = match args.top_n.or(config.scan.top_n) {
        Some(n) => universe.into_iter().take(n).collect(),
        None => universe,
    };

    info!(
        style = %style,
        symbols = symbols.len(),
        data_dir = %data_dir.display(),
        "Starting scan"
    );

    let scanner = Arc::new(Scanner::new(ScannerConfig {
        capital: config.risk.capital,
        risk_fraction: config.risk.risk_fraction,
        max_risk_fraction: config.risk.max_risk_fraction,
        style,
        profile: config.styles.profile(style).clone(),
    })?);
    let source = Arc::new(DirectorySource::new(data_dir));

    // Instruments are independent; each runs on the blocking pool
    let mut tasks = JoinSet::new();
    for (index, symbol) in symbols.iter().cloned().enumerate() {
        let scanner = Arc::clone(&scanner);
        let source = Arc::clone(&source);
        tasks.spawn_blocking(move || (index, scanner.scan_symbol(&symbol, source.as_ref())));
    }

    let mut indexed = Vec::with_capacity(symbols.len());
    while let Some(joined) = tasks.join_next().await {
        indexed.push(joined.context("Scan task failed")?);
    }
    indexed.sort_by_key(|(index, _)| *index);
    let report = ScanReport::new(style, indexed.into_iter().map(|(_, o)| o).collect());

    if !args.no_log {
        write_scan_log(&config, &report, total_symbols)?;
    }

    match args.output.as_str() {
        "json" => println!("{}", report.to_json()?),
        _ => println!("{}", report.summary()),
    }

    if args.explain {
        for outcome in report.trades() {
            if let (Some(snapshot), Some(plan)) = (&outcome.snapshot, &outcome.plan) {
                let label = outcome.holding.as_deref().unwrap_or_default();
                println!("{}", explain_trade(&outcome.symbol, snapshot, plan, label));
                if let Some(estimate) = &outcome.holding_estimate {
                    println!(
                        "Holding estimate: {} ({:?} volatility, {})",
                        estimate.advice,
                        estimate.volatility,
                        estimate.reasons.join("; ")
                    );
                }
                println!();
            }
        }
    }

    let counts = report.counts();
    info!(
        trade = counts.trade,
        wait = counts.wait,
        no_trade = counts.no_trade,
        "Scan completed"
    );

    Ok(())
}

fn write_scan_log(config: &AppConfig, report: &ScanReport, total_symbols: usize) -> Result<()> {
    let now = Local::now().naive_local();
    let meta = ScanMeta::new(report.style, total_symbols, now);
    let log_dir = &config.scan.log_dir;

    let mut log = ScanLog::create(log_dir, &meta)
        .with_context(|| format!("Failed to create scan log in {}", log_dir.display()))?;
    for outcome in &report.outcomes {
        let record = DecisionRecord::new(
            outcome.symbol.clone(),
            &outcome.decision,
            outcome.plan.as_ref(),
            outcome.holding.clone(),
            outcome.style,
            now,
        );
        log.record(&record).context("Failed to write scan log")?;
    }

    let path = log.finish().context("Failed to flush scan log")?;
    info!(path = %path.display(), "Scan log written");
    Ok(())
}
