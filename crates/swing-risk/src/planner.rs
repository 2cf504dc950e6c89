//! Trade planning for accepted decisions.

use rust_decimal::Decimal;
use swing_core::error::RiskError;
use swing_core::types::{Style, StyleProfile, TradePlan};
use tracing::debug;

use crate::{LiveStopPolicy, PositionSizer};

/// Computes the authoritative entry/stop/target/size for a live trade.
#[derive(Debug, Clone)]
pub struct RiskPlanner {
    sizer: PositionSizer,
    stops: LiveStopPolicy,
    reward_ratio: Decimal,
    style: Style,
}

impl RiskPlanner {
    /// Create a planner for one style.
    pub fn new(sizer: PositionSizer, style: Style, profile: &StyleProfile) -> Self {
        Self {
            sizer,
            stops: LiveStopPolicy::for_profile(profile),
            reward_ratio: profile.reward_ratio,
            style,
        }
    }

    pub fn sizer(&self) -> &PositionSizer {
        &self.sizer
    }

    /// Plan a long trade entered at `entry`.
    ///
    /// Arithmetic runs at full precision; prices are rounded to two
    /// decimals only on the returned plan.
    pub fn plan(&self, entry: Decimal) -> Result<TradePlan, RiskError> {
        if entry <= Decimal::ZERO {
            return Err(RiskError::InvalidEntry(entry));
        }

        let stop = self.stops.stop_price(entry);
        let risk_per_share = entry - stop;
        if risk_per_share <= Decimal::ZERO {
            return Err(RiskError::NonPositiveRisk { entry, stop });
        }

        let quantity = self.sizer.quantity(risk_per_share)?;
        let target = entry + risk_per_share * self.reward_ratio;

        let plan = TradePlan {
            entry: entry.round_dp(2),
            stop: stop.round_dp(2),
            target: target.round_dp(2),
            quantity,
            stop_pct: self.stops.stop_pct(),
            risk_per_share: risk_per_share.round_dp(2),
            reward_ratio: self.reward_ratio,
            style: self.style,
        };

        // Sub-cent prices can collapse the levels onto the entry after rounding.
        if plan.stop >= plan.entry || plan.target <= plan.entry {
            return Err(RiskError::NonPositiveRisk {
                entry: plan.entry,
                stop: plan.stop,
            });
        }

        debug!(
            entry = %plan.entry,
            stop = %plan.stop,
            target = %plan.target,
            quantity = plan.quantity,
            "Trade planned"
        );

        Ok(plan)
    }
}
