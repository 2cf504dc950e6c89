//! Holding-period estimate from trend stage and volatility.
//!
//! Advisory only: it is reported next to a decision and never changes it.

use serde::{Deserialize, Serialize};
use std::fmt;
use swing_core::types::IndicatorSnapshot;

/// Volatility regime from the 10-bar average range percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityBucket {
    Low,
    Normal,
    High,
}

impl VolatilityBucket {
    /// Below 1.5% is low, above 2.5% is high.
    pub fn classify(avg_range_pct: f64) -> Self {
        if avg_range_pct < 1.5 {
            VolatilityBucket::Low
        } else if avg_range_pct > 2.5 {
            VolatilityBucket::High
        } else {
            VolatilityBucket::Normal
        }
    }
}

/// Suggested action for the holding window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoldingAdvice {
    Hold { days: String, cautious: bool },
    Wait,
    NoTrade,
}

impl HoldingAdvice {
    fn hold(days: &str) -> Self {
        HoldingAdvice::Hold {
            days: days.to_string(),
            cautious: false,
        }
    }

    fn cautious(days: &str) -> Self {
        HoldingAdvice::Hold {
            days: days.to_string(),
            cautious: true,
        }
    }
}

impl fmt::Display for HoldingAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoldingAdvice::Hold { days, cautious: false } => write!(f, "HOLD {} days", days),
            HoldingAdvice::Hold { days, cautious: true } => write!(f, "HOLD {} days (cautious)", days),
            HoldingAdvice::Wait => f.write_str("WAIT"),
            HoldingAdvice::NoTrade => f.write_str("NO TRADE"),
        }
    }
}

/// Holding estimate with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingEstimate {
    pub advice: HoldingAdvice,
    pub volatility: VolatilityBucket,
    pub avg_range_pct: f64,
    pub reasons: Vec<String>,
}

/// Estimate how long a setup should be held.
pub fn estimate_holding(snapshot: &IndicatorSnapshot) -> HoldingEstimate {
    use VolatilityBucket::*;

    let volatility = VolatilityBucket::classify(snapshot.avg_range_pct_10);
    let rsi = snapshot.rsi_14;

    let (advice, reason) = if !snapshot.is_uptrend() {
        (HoldingAdvice::NoTrade, "Trend not bullish")
    } else if rsi > 65.0 {
        (HoldingAdvice::NoTrade, "RSI too high (late stage)")
    } else if (35.0..=45.0).contains(&rsi) {
        match volatility {
            Low => (HoldingAdvice::hold("5-10"), "Early stage with low volatility, give it time"),
            Normal => (HoldingAdvice::hold("4-7"), "Early stage with normal volatility"),
            High => (HoldingAdvice::hold("2-4"), "Early stage with high volatility, move fast"),
        }
    } else if rsi > 45.0 && rsi <= 60.0 {
        match volatility {
            Low => (HoldingAdvice::hold("10-20"), "Middle stage with low volatility, longer hold"),
            Normal => (HoldingAdvice::hold("7-12"), "Middle stage with normal volatility"),
            High => (HoldingAdvice::hold("4-7"), "Middle stage with high volatility, shorter hold"),
        }
    } else if rsi > 60.0 {
        match volatility {
            Low => (HoldingAdvice::cautious("7-12"), "Approaching late stage but low volatility"),
            _ => (HoldingAdvice::cautious("3-7"), "Approaching late stage, manage risk tightly"),
        }
    } else {
        (HoldingAdvice::Wait, "RSI or conditions unclear")
    };

    HoldingEstimate {
        advice,
        volatility,
        avg_range_pct: snapshot.avg_range_pct_10,
        reasons: vec![reason.to_string()],
    }
}
