//! Rule trait definitions.

use crate::types::{
    IndicatorSnapshot, Observed, RuleContext, RuleKind, RuleResult, Style, StyleProfile,
};

/// What a rule saw and how it judged it.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCheck {
    pub result: RuleResult,
    pub observed: Observed,
    pub context: Option<RuleContext>,
}

/// A single pass/fail check evaluated by the rule engine.
///
/// Rules are pure: the same snapshot and style always give the same check.
pub trait Rule: Send + Sync {
    /// Stable identifier recorded in traces (e.g. `TREND_DIRECTION`).
    fn name(&self) -> &str;

    /// Hard rules disqualify on failure, soft rules defer.
    fn kind(&self) -> RuleKind;

    /// Evaluate the rule against one snapshot.
    fn check(&self, snapshot: &IndicatorSnapshot, style: Style, profile: &StyleProfile) -> RuleCheck;

    /// Reason appended to the decision when the rule fails.
    fn failure_reason(&self) -> &str;
}
