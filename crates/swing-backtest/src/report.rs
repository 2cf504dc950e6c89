//! Backtest report generation.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::io;

use crate::{BacktestConfig, InstrumentStats, PortfolioSummary};

/// Complete multi-instrument backtest report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Configuration used
    pub config: BacktestConfig,
    /// One record per instrument, in input order
    pub instruments: Vec<InstrumentStats>,
    /// Roll-up across instruments
    pub summary: PortfolioSummary,
}

impl BacktestReport {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════════════════\n");
        s.push_str("                          BACKTEST REPORT                              \n");
        s.push_str("═══════════════════════════════════════════════════════════════════════\n\n");

        s.push_str("SETTINGS\n");
        s.push_str("───────────────────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Style:               {}\n", self.config.style));
        s.push_str(&format!("  Capital:             {:.2}\n", self.config.capital));
        s.push_str(&format!(
            "  Risk Per Trade:      {:.2}%\n",
            self.config.risk_fraction * dec!(100)
        ));
        s.push_str(&format!(
            "  RSI Band:            {:.0}-{:.0}\n",
            self.config.profile.rsi_low, self.config.profile.rsi_high
        ));
        s.push_str(&format!(
            "  Reward:Risk:         {}\n",
            self.config.profile.reward_ratio
        ));
        s.push('\n');

        s.push_str("INSTRUMENTS\n");
        s.push_str("───────────────────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  {:<14} {:>7} {:>6} {:>7} {:>9} {:>12} {:>10} {:>10}\n",
            "Stock", "Trades", "Wins", "Losses", "Win %", "Net P&L", "Avg Win", "Avg Loss"
        ));
        for stats in &self.instruments {
            match &stats.error {
                Some(error) => s.push_str(&format!("  {:<14} ERROR: {}\n", stats.symbol, error)),
                None => s.push_str(&format!(
                    "  {:<14} {:>7} {:>6} {:>7} {:>8.2}% {:>12.2} {:>10.2} {:>10.2}\n",
                    stats.symbol,
                    stats.trades,
                    stats.wins,
                    stats.losses,
                    stats.win_rate,
                    stats.net_pnl,
                    stats.avg_win,
                    stats.avg_loss
                )),
            }
        }
        s.push('\n');

        s.push_str("OVERALL\n");
        s.push_str("───────────────────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Instruments:         {} ({} failed)\n",
            self.summary.instruments, self.summary.failed
        ));
        s.push_str(&format!(
            "  Total Trades:        {}\n",
            self.summary.total_trades
        ));
        s.push_str(&format!("  Net P&L:             {:.2}\n", self.summary.net_pnl));
        s.push_str(&format!(
            "  Avg Win Rate:        {:.2}%\n",
            self.summary.mean_win_rate
        ));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export every closed trade to CSV.
    pub fn trades_to_csv(&self) -> Result<String, csv::Error> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        wtr.write_record([
            "symbol",
            "entry_date",
            "exit_date",
            "entry",
            "exit",
            "stop",
            "target",
            "quantity",
            "pnl",
            "exit_reason",
        ])?;

        for stats in &self.instruments {
            for trade in &stats.trade_log {
                wtr.write_record([
                    stats.symbol.as_str(),
                    &trade.entry_date.to_string(),
                    &trade.exit_date.to_string(),
                    &format!("{:.2}", trade.entry),
                    &format!("{:.2}", trade.exit),
                    &format!("{:.2}", trade.stop),
                    &format!("{:.2}", trade.target),
                    &trade.quantity.to_string(),
                    &format!("{:.2}", trade.pnl),
                    trade.exit_reason.as_str(),
                ])?;
            }
        }

        let data = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
        String::from_utf8(data)
            .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExitReason, TradeRecord};
    use chrono::NaiveDate;

    fn report() -> BacktestReport {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let trade = TradeRecord {
            entry_date: date,
            exit_date: date.succ_opt().unwrap(),
            entry: dec!(100),
            exit: dec!(112.5),
            stop: dec!(95),
            target: dec!(112.5),
            quantity: 20,
            pnl: dec!(250),
            exit_reason: ExitReason::Target,
        };
        let instruments = vec![
            InstrumentStats::from_trades("RELIANCE", vec![trade]),
            InstrumentStats::failed("BROKEN", "CSV file is empty"),
        ];
        let summary = PortfolioSummary::from_instruments(&instruments);

        BacktestReport {
            config: BacktestConfig::default(),
            instruments,
            summary,
        }
    }

    #[test]
    fn test_report_summary() {
        let summary = report().summary();

        assert!(summary.contains("BACKTEST REPORT"));
        assert!(summary.contains("RELIANCE"));
        assert!(summary.contains("100.00%"));
        assert!(summary.contains("BROKEN         ERROR: CSV file is empty"));
        assert!(summary.contains("Net P&L:             250.00"));
    }

    #[test]
    fn test_trades_csv() {
        let csv = report().trades_to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "RELIANCE,2024-05-02,2024-05-03,100.00,112.50,95.00,112.50,20,250.00,TARGET"
        );
    }

    #[test]
    fn test_trades_csv_quotes_symbol_with_comma() {
        let mut report = report();
        report.instruments[0].symbol = "M&M,LTD".to_string();

        let text = report.trades_to_csv().unwrap();
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        assert_eq!(reader.headers().unwrap().len(), 10);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 10);
        assert_eq!(&rows[0][0], "M&M,LTD");
        assert_eq!(&rows[0][9], "TARGET");
    }

    #[test]
    fn test_json_export() {
        let json = report().to_json().unwrap();

        assert!(json.contains("\"exit_reason\": \"TARGET\""));
        assert!(json.contains("\"error\": \"CSV file is empty\""));
    }
}
