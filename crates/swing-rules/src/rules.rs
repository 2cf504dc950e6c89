//! The standard screening rules.

use swing_core::traits::{Rule, RuleCheck};
use swing_core::types::{
    IndicatorSnapshot, Observed, RuleContext, RuleKind, RuleResult, Style, StyleProfile,
};

/// Uptrend gate: close above DMA20, DMA20 above DMA50.
#[derive(Debug, Clone, Default)]
pub struct TrendRule;

impl Rule for TrendRule {
    fn name(&self) -> &str {
        "TREND_DIRECTION"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Hard
    }

    fn check(&self, snapshot: &IndicatorSnapshot, _style: Style, _profile: &StyleProfile) -> RuleCheck {
        RuleCheck {
            result: RuleResult::from_pass(snapshot.is_uptrend()),
            observed: Observed::Trend {
                close: snapshot.close,
                dma_20: snapshot.dma_20,
                dma_50: snapshot.dma_50,
            },
            context: None,
        }
    }

    fn failure_reason(&self) -> &str {
        "Stock is not in an uptrend"
    }
}

/// Rejects oversold or overbought readings.
#[derive(Debug, Clone)]
pub struct RsiExtremesRule {
    lower: f64,
    upper: f64,
}

impl RsiExtremesRule {
    /// Create the rule with custom limits.
    pub fn new(lower: f64, upper: f64) -> Self {
        assert!(lower < upper, "Lower RSI limit must be below upper");
        Self { lower, upper }
    }
}

impl Default for RsiExtremesRule {
    fn default() -> Self {
        Self::new(20.0, 80.0)
    }
}

impl Rule for RsiExtremesRule {
    fn name(&self) -> &str {
        "RSI_EXTREMES"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Hard
    }

    fn check(&self, snapshot: &IndicatorSnapshot, _style: Style, _profile: &StyleProfile) -> RuleCheck {
        let rsi = snapshot.rsi_14;
        RuleCheck {
            result: RuleResult::from_pass(rsi >= self.lower && rsi <= self.upper),
            observed: Observed::Rsi { value: rsi },
            context: Some(RuleContext::RsiLimits {
                lower: self.lower,
                upper: self.upper,
            }),
        }
    }

    fn failure_reason(&self) -> &str {
        "RSI is in extreme zone"
    }
}

/// Requires volume at or above its 20-bar average.
///
/// Thin participation on the latest bar is read as distribution.
#[derive(Debug, Clone, Default)]
pub struct DistributionRule;

impl Rule for DistributionRule {
    fn name(&self) -> &str {
        "DISTRIBUTION_VOLUME"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Hard
    }

    fn check(&self, snapshot: &IndicatorSnapshot, _style: Style, _profile: &StyleProfile) -> RuleCheck {
        RuleCheck {
            result: RuleResult::from_pass(snapshot.has_volume_support()),
            observed: Observed::Volume {
                volume: snapshot.volume,
                avg_volume: snapshot.avg_volume_20,
            },
            context: None,
        }
    }

    fn failure_reason(&self) -> &str {
        "Distribution detected (low volume)"
    }
}

/// Soft check that RSI sits inside the style's acceptance band.
#[derive(Debug, Clone, Default)]
pub struct StyleBandRule;

impl Rule for StyleBandRule {
    fn name(&self) -> &str {
        "STYLE_RSI_BAND"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Soft
    }

    fn check(&self, snapshot: &IndicatorSnapshot, style: Style, profile: &StyleProfile) -> RuleCheck {
        RuleCheck {
            result: RuleResult::from_pass(profile.rsi_in_band(snapshot.rsi_14)),
            observed: Observed::Rsi {
                value: snapshot.rsi_14,
            },
            context: Some(RuleContext::RsiBand {
                style,
                low: profile.rsi_low,
                high: profile.rsi_high,
            }),
        }
    }

    fn failure_reason(&self) -> &str {
        "Waiting for better RSI alignment"
    }
}
