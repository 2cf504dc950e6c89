//! Stop-loss policies.
//!
//! Live plans and historical replays place stops differently: live plans
//! use a fixed percentage below entry, replays use the DMA50 support level
//! of the entry bar.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use swing_core::error::RiskError;
use swing_core::types::{IndicatorSnapshot, StyleProfile};

use crate::{to_decimal, PositionSizer};

/// Fixed-percentage stop below entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStopPolicy {
    stop_pct: Decimal,
}

impl LiveStopPolicy {
    /// Create a policy with `stop_pct` expressed as a fraction (0.02 = 2%).
    pub fn new(stop_pct: Decimal) -> Self {
        Self { stop_pct }
    }

    /// Policy for a style's stop percentage.
    pub fn for_profile(profile: &StyleProfile) -> Self {
        Self::new(profile.stop_pct)
    }

    pub fn stop_pct(&self) -> Decimal {
        self.stop_pct
    }

    /// Stop price for a long entry.
    pub fn stop_price(&self, entry: Decimal) -> Decimal {
        entry * (dec!(1) - self.stop_pct)
    }
}

/// Full-precision parameters of a replayed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestEntry {
    pub entry: Decimal,
    pub stop: Decimal,
    pub target: Decimal,
    pub quantity: u64,
    pub risk_per_share: Decimal,
}

/// Trend-support stop: the DMA50 of the entry bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestStopPolicy;

impl BacktestStopPolicy {
    /// Stop price for an entry on this bar.
    pub fn stop_price(&self, snapshot: &IndicatorSnapshot) -> Result<Decimal, RiskError> {
        to_decimal(snapshot.dma_50)
    }

    /// Entry at the bar's close with a DMA50 stop, sized by `sizer`.
    ///
    /// Fails when the close is not above DMA50 or the size rounds to zero.
    pub fn open(
        &self,
        snapshot: &IndicatorSnapshot,
        sizer: &PositionSizer,
        reward_ratio: Decimal,
    ) -> Result<BacktestEntry, RiskError> {
        let entry = to_decimal(snapshot.close)?;
        let stop = self.stop_price(snapshot)?;
        let risk_per_share = entry - stop;

        if risk_per_share <= Decimal::ZERO {
            return Err(RiskError::NonPositiveRisk { entry, stop });
        }

        let quantity = sizer.quantity(risk_per_share)?;

        Ok(BacktestEntry {
            entry,
            stop,
            target: entry + risk_per_share * reward_ratio,
            quantity,
            risk_per_share,
        })
    }
}
