use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::fs;
use swing_backtest::{BacktestConfig, BacktestSimulator, ExitReason};
use swing_core::traits::PriceSource;
use swing_core::types::Style;
use swing_data::DirectorySource;
use tempfile::TempDir;

/// Zigzag uptrend; bar `gap` spans both stop and target.
fn csv_with_gap(gap: Option<usize>) -> String {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut close = 100.0;
    let mut csv = String::from("Date,Open,High,Low,Close,Volume\n");

    for i in 0..80usize {
        if i > 0 {
            close += if i % 7 == 0 { -2.8 } else { 1.0 };
        }
        let (high, low) = if Some(i) == gap {
            (160.0, 110.0)
        } else {
            (close + 0.5, close - 0.5)
        };
        let date = start + Duration::days(i as i64);
        writeln!(csv, "{},{},{},{},{},1000", date, close, high, low, close).unwrap();
    }
    csv
}

#[test]
fn test_backtest_from_csv_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("GAP_NS.csv"), csv_with_gap(Some(59))).unwrap();
    fs::write(dir.path().join("FLAT.csv"), csv_with_gap(None)).unwrap();
    let source = DirectorySource::new(dir.path());

    let simulator = BacktestSimulator::new(BacktestConfig::for_style(Style::Aggressive)).unwrap();
    let inputs = ["GAP", "FLAT", "MISSING"]
        .iter()
        .map(|s| (s.to_string(), source.load(s)));
    let report = simulator.run_all(inputs);

    let gap = &report.instruments[0];
    assert!(gap.error.is_none());
    assert_eq!(gap.trade_log[0].exit_reason, ExitReason::Stop);
    assert_eq!(gap.trade_log[0].exit, gap.trade_log[0].stop);
    assert!(gap.trade_log[0].pnl < Decimal::ZERO);
    assert_eq!(gap.wins + gap.losses, gap.trades);

    // entered and never exited
    let flat = &report.instruments[1];
    assert_eq!(flat.trades, 0);
    assert_eq!(flat.net_pnl, Decimal::ZERO);

    let missing = &report.instruments[2];
    assert!(missing.error.is_some());
    assert_eq!(missing.trades, 0);

    assert_eq!(report.summary.instruments, 3);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.total_trades, gap.trades);
    assert!(report.summary().contains("GAP"));
    assert!(report.trades_to_csv().unwrap().lines().nth(1).unwrap().starts_with("GAP,"));
}
