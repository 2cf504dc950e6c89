//! Show the most recent scan log.

use anyhow::{Context, Result};
use swing_config::AppConfig;
use swing_core::types::RuleResult;
use swing_monitor::{read_scan, ScanLog};

use crate::cli::LastScanArgs;

pub async fn run(args: LastScanArgs, config: AppConfig) -> Result<()> {
    let log_dir = args.log_dir.unwrap_or(config.scan.log_dir);

    let Some(path) = ScanLog::latest(&log_dir)
        .with_context(|| format!("Failed to list scan logs in {}", log_dir.display()))?
    else {
        println!("No scan logs found in {}", log_dir.display());
        return Ok(());
    };

    let scan = read_scan(&path).with_context(|| format!("Failed to read {}", path.display()))?;

    println!("Latest scan: {}", path.display());
    println!("═══════════════════════════════════════════════════════════");
    match &scan.meta {
        Some(meta) => {
            println!("  Scan time:     {}", meta.scan_time);
            println!("  Style:         {}", meta.style);
            println!("  Total symbols: {}", meta.total_symbols);
        }
        None => println!("  (no scan metadata)"),
    }
    println!("───────────────────────────────────────────────────────────");

    for record in &scan.decisions {
        println!("  {:<12} {:<9} {}", record.symbol, record.decision, record.reason.join("; "));

        if let (Some(entry), Some(stop), Some(target), Some(qty)) =
            (record.entry, record.stop, record.target, record.qty)
        {
            println!(
                "               entry {:.2}  stop {:.2}  target {:.2}  qty {}  hold {}",
                entry,
                stop,
                target,
                qty,
                record.holding.as_deref().unwrap_or("-")
            );
        }

        if args.trace {
            for step in &record.trace {
                let mark = match step.result {
                    RuleResult::Pass => "PASS",
                    RuleResult::Fail => "FAIL",
                };
                println!("               {:<20} {:?} {}", step.rule, step.kind, mark);
            }
        }
    }

    println!();
    println!("{} decisions", scan.decisions.len());

    Ok(())
}
