//! Risk management for swing trades.
//!
//! Provides risk-based position sizing, the two stop policies (fixed
//! percentage for live plans, DMA50 support for replays) and the
//! `RiskPlanner` that turns an accepted decision into a `TradePlan`.

mod planner;
mod position_sizer;
mod stop_loss;

pub use planner::RiskPlanner;
pub use position_sizer::{PositionSizer, DEFAULT_RISK_CEILING};
pub use stop_loss::{BacktestEntry, BacktestStopPolicy, LiveStopPolicy};

use rust_decimal::Decimal;
use swing_core::error::RiskError;

/// Convert an indicator-space price into exact decimal arithmetic.
pub fn to_decimal(value: f64) -> Result<Decimal, RiskError> {
    Decimal::try_from(value).map_err(|_| RiskError::UnrepresentablePrice(value))
}
