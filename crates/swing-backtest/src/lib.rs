//! Backtesting for the swing entry rule.
//!
//! Replays the trend + style-band entry over every fully-defined bar
//! with a single position at a time, then aggregates closed trades per
//! instrument and across instruments.

mod engine;
mod report;
mod statistics;

pub use engine::{BacktestConfig, BacktestSimulator, PositionState};
pub use report::BacktestReport;
pub use statistics::{ExitReason, InstrumentStats, PortfolioSummary, TradeRecord};
