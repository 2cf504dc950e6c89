//! Backtest statistics.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Which level closed the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitReason {
    Stop,
    Target,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::Stop => "STOP",
            ExitReason::Target => "TARGET",
        }
    }
}

/// Record of a single closed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub entry: Decimal,
    pub exit: Decimal,
    pub stop: Decimal,
    pub target: Decimal,
    pub quantity: u64,
    /// (exit - entry) * quantity
    pub pnl: Decimal,
    pub exit_reason: ExitReason,
}

impl TradeRecord {
    /// A trade counts as a win only when it made money.
    pub fn is_win(&self) -> bool {
        self.pnl > Decimal::ZERO
    }
}

/// Per-instrument replay statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentStats {
    pub symbol: String,
    /// Closed trades; a position still open at the last bar is not counted
    pub trades: usize,
    /// Trades with P&L > 0
    pub wins: usize,
    /// Trades with P&L <= 0
    pub losses: usize,
    /// Win rate percentage, 0 with no trades
    pub win_rate: Decimal,
    pub net_pnl: Decimal,
    /// Average P&L of winning trades
    pub avg_win: Decimal,
    /// Average P&L of losing trades (zero or negative)
    pub avg_loss: Decimal,
    pub trade_log: Vec<TradeRecord>,
    /// Set when the replay for this instrument failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InstrumentStats {
    /// Empty stats for an instrument.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            trades: 0,
            wins: 0,
            losses: 0,
            win_rate: Decimal::ZERO,
            net_pnl: Decimal::ZERO,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            trade_log: Vec::new(),
            error: None,
        }
    }

    /// Zero-trade record for an instrument whose replay failed.
    pub fn failed(symbol: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(symbol)
        }
    }

    /// Build finalized stats from a list of closed trades.
    pub fn from_trades(symbol: impl Into<String>, trades: Vec<TradeRecord>) -> Self {
        let mut stats = Self::new(symbol);
        for trade in trades {
            stats.add_trade(trade);
        }
        stats.finalize();
        stats
    }

    /// Add a closed trade.
    pub fn add_trade(&mut self, trade: TradeRecord) {
        self.trade_log.push(trade);
        self.trades += 1;
    }

    /// Recompute the aggregates from the trade log.
    pub fn finalize(&mut self) {
        let mut gross_win = Decimal::ZERO;
        let mut gross_loss = Decimal::ZERO;
        self.wins = 0;
        self.losses = 0;

        for trade in &self.trade_log {
            if trade.is_win() {
                self.wins += 1;
                gross_win += trade.pnl;
            } else {
                self.losses += 1;
                gross_loss += trade.pnl;
            }
        }

        self.trades = self.trade_log.len();
        self.net_pnl = gross_win + gross_loss;

        self.win_rate = if self.trades > 0 {
            Decimal::from(self.wins) / Decimal::from(self.trades) * dec!(100)
        } else {
            Decimal::ZERO
        };

        self.avg_win = if self.wins > 0 {
            gross_win / Decimal::from(self.wins)
        } else {
            Decimal::ZERO
        };

        self.avg_loss = if self.losses > 0 {
            gross_loss / Decimal::from(self.losses)
        } else {
            Decimal::ZERO
        };
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Roll-up across instruments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub instruments: usize,
    /// Instruments whose replay failed
    pub failed: usize,
    pub total_trades: usize,
    pub net_pnl: Decimal,
    /// Mean of per-instrument win rates over instruments that replayed
    pub mean_win_rate: Decimal,
}

impl PortfolioSummary {
    pub fn from_instruments(instruments: &[InstrumentStats]) -> Self {
        let replayed: Vec<&InstrumentStats> =
            instruments.iter().filter(|s| !s.is_failed()).collect();

        let mean_win_rate = if replayed.is_empty() {
            Decimal::ZERO
        } else {
            replayed.iter().map(|s| s.win_rate).sum::<Decimal>() / Decimal::from(replayed.len())
        };

        Self {
            instruments: instruments.len(),
            failed: instruments.len() - replayed.len(),
            total_trades: instruments.iter().map(|s| s.trades).sum(),
            net_pnl: instruments.iter().map(|s| s.net_pnl).sum(),
            mean_win_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(pnl: Decimal) -> TradeRecord {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        TradeRecord {
            entry_date: date,
            exit_date: date,
            entry: dec!(100),
            exit: dec!(100) + pnl / dec!(10),
            stop: dec!(95),
            target: dec!(110),
            quantity: 10,
            pnl,
            exit_reason: if pnl > Decimal::ZERO {
                ExitReason::Target
            } else {
                ExitReason::Stop
            },
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = InstrumentStats::from_trades("TCS", Vec::new());

        assert_eq!(stats.trades, 0);
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.losses, 0);
        assert_eq!(stats.win_rate, Decimal::ZERO);
        assert_eq!(stats.net_pnl, Decimal::ZERO);
        assert_eq!(stats.avg_win, Decimal::ZERO);
        assert_eq!(stats.avg_loss, Decimal::ZERO);
    }

    #[test]
    fn test_mixed_trades() {
        let stats = InstrumentStats::from_trades(
            "INFY",
            vec![trade(dec!(300)), trade(dec!(-100)), trade(dec!(100)), trade(dec!(0))],
        );

        assert_eq!(stats.trades, 4);
        assert_eq!(stats.wins, 2);
        // breakeven counts as a loss
        assert_eq!(stats.losses, 2);
        assert_eq!(stats.win_rate, dec!(50));
        assert_eq!(stats.net_pnl, dec!(300));
        assert_eq!(stats.avg_win, dec!(200));
        assert_eq!(stats.avg_loss, dec!(-50));
    }

    #[test]
    fn test_failed_record() {
        let stats = InstrumentStats::failed("BAD", "CSV not found: BAD");

        assert!(stats.is_failed());
        assert_eq!(stats.trades, 0);
        assert_eq!(stats.net_pnl, Decimal::ZERO);
    }

    #[test]
    fn test_portfolio_rollup() {
        let a = InstrumentStats::from_trades("A", vec![trade(dec!(100)), trade(dec!(-50))]);
        let b = InstrumentStats::from_trades("B", vec![trade(dec!(200))]);
        let failed = InstrumentStats::failed("C", "boom");

        let summary = PortfolioSummary::from_instruments(&[a, b, failed]);

        assert_eq!(summary.instruments, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_trades, 3);
        assert_eq!(summary.net_pnl, dec!(250));
        // (50 + 100) / 2, failed instrument excluded
        assert_eq!(summary.mean_win_rate, dec!(75));
    }

    #[test]
    fn test_rollup_of_nothing() {
        let summary = PortfolioSummary::from_instruments(&[]);

        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.mean_win_rate, Decimal::ZERO);
    }
}
