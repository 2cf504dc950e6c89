//! Rank command implementation.

use anyhow::{Context, Result};
use swing_config::AppConfig;
use swing_data::DirectorySource;
use swing_rules::Ranker;
use swing_scan::latest_snapshots;
use tracing::info;

use crate::cli::{resolve_symbols, RankArgs};

pub async fn run(args: RankArgs, config: AppConfig) -> Result<()> {
    let data_dir = args.data_dir.clone().unwrap_or_else(|| config.scan.data_dir.clone());
    let symbols = resolve_symbols(&args.symbols, &config)?;
    let total = symbols.len();

    let ranked = tokio::task::spawn_blocking(move || {
        let source = DirectorySource::new(data_dir);
        Ranker::new().rank(latest_snapshots(&symbols, &source))
    })
    .await
    .context("Ranking task failed")?;

    info!(ranked = ranked.len(), skipped = total - ranked.len(), "Ranking complete");
    let top: Vec<_> = ranked.into_iter().take(args.top).collect();

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&top)?);
        return Ok(());
    }

    println!("TOP {} SWING CANDIDATES", args.top);
    println!("═══════════════════════════════════════════════");
    println!("  {:<12} {:>6} {:>10} {:>8}", "Stock", "Score", "Close", "RSI");
    println!("───────────────────────────────────────────────");
    for entry in &top {
        println!(
            "  {:<12} {:>6} {:>10.2} {:>8.2}",
            entry.symbol, entry.score, entry.close, entry.rsi
        );
    }

    Ok(())
}
