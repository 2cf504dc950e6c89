//! Decisions and the rule trace that explains them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Style;

/// Outcome class of a rule-engine evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Every rule passed
    Trade,
    /// Structurally sound but not aligned yet
    Wait,
    /// Disqualified by a hard rule
    NoTrade,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Trade => "TRADE",
            Verdict::Wait => "WAIT",
            Verdict::NoTrade => "NO_TRADE",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Whether a failing rule disqualifies or only defers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    Hard,
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleResult {
    Pass,
    Fail,
}

impl RuleResult {
    /// Convert a boolean check into a result.
    #[inline]
    pub fn from_pass(passed: bool) -> Self {
        if passed {
            RuleResult::Pass
        } else {
            RuleResult::Fail
        }
    }

    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, RuleResult::Pass)
    }
}

/// Value a rule looked at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Observed {
    Trend { close: f64, dma_20: f64, dma_50: f64 },
    Rsi { value: f64 },
    Volume { volume: u64, avg_volume: f64 },
}

/// Thresholds a rule compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleContext {
    /// Fixed RSI extremes
    RsiLimits { lower: f64, upper: f64 },
    /// Style-specific RSI band
    RsiBand { style: Style, low: f64, high: f64 },
}

/// One evaluated rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub rule: String,
    pub kind: RuleKind,
    pub observed: Observed,
    pub result: RuleResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<RuleContext>,
}

/// Rule-engine output: verdict, reasons and the evaluation trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub verdict: Verdict,
    /// Human-readable reasons, in the order they were produced
    pub reasons: Vec<String>,
    /// Rules evaluated, in evaluation order
    pub trace: Vec<TraceEntry>,
}

impl Decision {
    /// NO_TRADE with a single reason and no trace.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::NoTrade,
            reasons: vec![reason.into()],
            trace: Vec::new(),
        }
    }

    #[inline]
    pub fn is_trade(&self) -> bool {
        self.verdict == Verdict::Trade
    }

    /// Downgrade to NO_TRADE, keeping the trace and appending a reason.
    pub fn block(&mut self, reason: impl Into<String>) {
        self.verdict = Verdict::NoTrade;
        self.reasons.push(reason.into());
    }
}
