//! Risk-bounded trade plans.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Style;

/// Entry, stop, target and size for an accepted long trade.
///
/// Money fields are rounded to two decimals; `stop < entry < target`
/// and `quantity * risk_per_share <= capital * risk_fraction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry: Decimal,
    pub stop: Decimal,
    pub target: Decimal,
    /// Whole shares, always positive
    pub quantity: u64,
    pub stop_pct: Decimal,
    pub risk_per_share: Decimal,
    pub reward_ratio: Decimal,
    pub style: Style,
}

impl TradePlan {
    /// Capital at risk if the stop is hit.
    pub fn total_risk(&self) -> Decimal {
        self.risk_per_share * Decimal::from(self.quantity)
    }

    /// Capital required to open the position.
    pub fn position_value(&self) -> Decimal {
        self.entry * Decimal::from(self.quantity)
    }
}
