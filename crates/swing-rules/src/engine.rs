//! Cascading rule engine.

use swing_core::traits::Rule;
use swing_core::types::{
    Decision, IndicatorSnapshot, RuleKind, RuleResult, Style, StyleProfile, TraceEntry, Verdict,
};
use tracing::debug;

use crate::rules::{DistributionRule, RsiExtremesRule, StyleBandRule, TrendRule};

/// Reason appended when every rule passes.
pub const ALL_RULES_PASSED: &str = "All engine conditions satisfied";

/// Short-circuit predicate: evaluation stops at the first hard failure.
#[inline]
pub fn terminates(kind: RuleKind, result: RuleResult) -> bool {
    kind == RuleKind::Hard && result == RuleResult::Fail
}

/// Ordered list of rules evaluated against one snapshot.
///
/// Hard rules always run before soft ones; within each kind the given
/// order is kept. Only evaluated rules appear in the trace.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Standard cascade: trend, RSI extremes, distribution, style band.
    pub fn new() -> Self {
        Self::with_rules(vec![
            Box::new(TrendRule),
            Box::new(RsiExtremesRule::default()),
            Box::new(DistributionRule),
            Box::new(StyleBandRule),
        ])
    }

    /// Build an engine from custom rules.
    pub fn with_rules(mut rules: Vec<Box<dyn Rule>>) -> Self {
        rules.sort_by_key(|rule| rule.kind() == RuleKind::Soft);
        Self { rules }
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Evaluate the cascade.
    ///
    /// A hard failure ends evaluation with NO_TRADE. A soft failure yields
    /// WAIT. Otherwise the verdict is TRADE.
    pub fn evaluate(&self, snapshot: &IndicatorSnapshot, style: Style, profile: &StyleProfile) -> Decision {
        let mut trace = Vec::with_capacity(self.rules.len());
        let mut reasons = Vec::new();
        let mut deferred = false;

        for rule in &self.rules {
            let check = rule.check(snapshot, style, profile);
            debug!(rule = rule.name(), result = ?check.result, "Rule evaluated");

            trace.push(TraceEntry {
                rule: rule.name().to_string(),
                kind: rule.kind(),
                observed: check.observed,
                result: check.result,
                context: check.context,
            });

            if check.result.is_pass() {
                continue;
            }

            reasons.push(rule.failure_reason().to_string());

            if terminates(rule.kind(), check.result) {
                return Decision {
                    verdict: Verdict::NoTrade,
                    reasons,
                    trace,
                };
            }
            deferred = true;
        }

        let verdict = if deferred {
            Verdict::Wait
        } else {
            reasons.push(ALL_RULES_PASSED.to_string());
            Verdict::Trade
        };

        Decision {
            verdict,
            reasons,
            trace,
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::snapshot;
    use proptest::prelude::*;

    fn evaluate(snap: &IndicatorSnapshot, style: Style) -> Decision {
        RuleEngine::new().evaluate(snap, style, &style.default_profile())
    }

    fn traced_rules(decision: &Decision) -> Vec<&str> {
        decision.trace.iter().map(|t| t.rule.as_str()).collect()
    }

    #[test]
    fn test_all_rules_pass() {
        let decision = evaluate(&snapshot(), Style::Normal);

        assert_eq!(decision.verdict, Verdict::Trade);
        assert_eq!(decision.reasons, vec![ALL_RULES_PASSED.to_string()]);
        assert_eq!(decision.trace.len(), 4);
        assert!(decision.trace.iter().all(|t| t.result.is_pass()));
    }

    #[test]
    fn test_trend_failure_short_circuits() {
        let mut snap = snapshot();
        snap.close = 100.0;
        // Would also fail RSI extremes if it were evaluated
        snap.rsi_14 = 90.0;

        let decision = evaluate(&snap, Style::Normal);

        assert_eq!(decision.verdict, Verdict::NoTrade);
        assert_eq!(traced_rules(&decision), vec!["TREND_DIRECTION"]);
        assert!(decision.reasons[0].contains("not in an uptrend"));
    }

    #[test]
    fn test_rsi_extreme_is_no_trade() {
        let mut snap = snapshot();
        snap.rsi_14 = 85.0;

        let decision = evaluate(&snap, Style::Aggressive);

        assert_eq!(decision.verdict, Verdict::NoTrade);
        assert_eq!(traced_rules(&decision), vec!["TREND_DIRECTION", "RSI_EXTREMES"]);
        assert!(decision.reasons[0].contains("RSI is in extreme zone"));
    }

    #[test]
    fn test_distribution_is_no_trade() {
        let mut snap = snapshot();
        snap.volume = 500;

        let decision = evaluate(&snap, Style::Normal);

        assert_eq!(decision.verdict, Verdict::NoTrade);
        assert_eq!(decision.trace.len(), 3);
        assert!(decision.reasons[0].contains("Distribution detected"));
    }

    #[test]
    fn test_soft_band_failure_waits() {
        let mut snap = snapshot();
        snap.rsi_14 = 68.0;

        let normal = evaluate(&snap, Style::Normal);
        assert_eq!(normal.verdict, Verdict::Wait);
        assert_eq!(normal.trace.len(), 4);
        assert_eq!(normal.trace[3].kind, RuleKind::Soft);
        assert_eq!(normal.reasons, vec!["Waiting for better RSI alignment".to_string()]);

        let aggressive = evaluate(&snap, Style::Aggressive);
        assert_eq!(aggressive.verdict, Verdict::Trade);
    }

    #[test]
    fn test_conservative_band_is_narrow() {
        let mut snap = snapshot();
        snap.rsi_14 = 38.0;

        assert_eq!(evaluate(&snap, Style::Conservative).verdict, Verdict::Wait);
        assert_eq!(evaluate(&snap, Style::Normal).verdict, Verdict::Trade);
    }

    #[test]
    fn test_custom_rules_keep_hard_first() {
        let engine = RuleEngine::with_rules(vec![
            Box::new(StyleBandRule),
            Box::new(TrendRule),
            Box::new(DistributionRule),
        ]);

        assert_eq!(
            engine.rule_names(),
            vec!["TREND_DIRECTION", "DISTRIBUTION_VOLUME", "STYLE_RSI_BAND"]
        );
    }

    #[test]
    fn test_terminates_predicate() {
        assert!(terminates(RuleKind::Hard, RuleResult::Fail));
        assert!(!terminates(RuleKind::Hard, RuleResult::Pass));
        assert!(!terminates(RuleKind::Soft, RuleResult::Fail));
    }

    proptest! {
        #[test]
        fn prop_trace_stops_at_first_hard_failure(
            close in 90.0f64..120.0,
            dma_20 in 90.0f64..120.0,
            dma_50 in 90.0f64..120.0,
            rsi in 0.0f64..100.0,
            volume in 0u64..2_000,
        ) {
            let mut snap = snapshot();
            snap.close = close;
            snap.dma_20 = dma_20;
            snap.dma_50 = dma_50;
            snap.rsi_14 = rsi;
            snap.volume = volume;

            let decision = evaluate(&snap, Style::Normal);
            let failed_hard = decision
                .trace
                .iter()
                .position(|t| terminates(t.kind, t.result));

            match failed_hard {
                Some(k) => {
                    prop_assert_eq!(k + 1, decision.trace.len());
                    prop_assert_eq!(decision.verdict, Verdict::NoTrade);
                }
                None => {
                    prop_assert_eq!(decision.trace.len(), 4);
                    prop_assert_ne!(decision.verdict, Verdict::NoTrade);
                }
            }
        }
    }
}
