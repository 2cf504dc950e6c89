//! Scan report.

use serde::{Deserialize, Serialize};
use swing_core::types::{Style, Verdict};

use crate::ScanOutcome;

/// Number of outcomes per verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    pub trade: usize,
    pub wait: usize,
    pub no_trade: usize,
}

/// Every outcome of one scan, in universe order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub style: Style,
    pub outcomes: Vec<ScanOutcome>,
}

impl ScanReport {
    pub fn new(style: Style, outcomes: Vec<ScanOutcome>) -> Self {
        Self { style, outcomes }
    }

    pub fn counts(&self) -> VerdictCounts {
        let mut counts = VerdictCounts::default();
        for outcome in &self.outcomes {
            match outcome.decision.verdict {
                Verdict::Trade => counts.trade += 1,
                Verdict::Wait => counts.wait += 1,
                Verdict::NoTrade => counts.no_trade += 1,
            }
        }
        counts
    }

    /// Outcomes with a trade plan.
    pub fn trades(&self) -> impl Iterator<Item = &ScanOutcome> {
        self.outcomes.iter().filter(|o| o.plan.is_some())
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        let counts = self.counts();

        s.push_str("═══════════════════════════════════════════════════════════════════════\n");
        s.push_str("                          DAILY MARKET SCAN                            \n");
        s.push_str("═══════════════════════════════════════════════════════════════════════\n\n");

        s.push_str(&format!("  Style:               {}\n", self.style));
        s.push_str(&format!("  Symbols Scanned:     {}\n", self.outcomes.len()));
        s.push_str(&format!(
            "  TRADE / WAIT / NO_TRADE: {} / {} / {}\n\n",
            counts.trade, counts.wait, counts.no_trade
        ));

        s.push_str("DECISIONS\n");
        s.push_str("───────────────────────────────────────────────────────────────────────\n");
        for outcome in &self.outcomes {
            s.push_str(&format!(
                "  {:<12} {:<9} {}\n",
                outcome.symbol,
                outcome.decision.verdict,
                outcome.decision.reasons.join("; ")
            ));
        }
        s.push('\n');

        if counts.trade > 0 {
            s.push_str("TRADE PLANS\n");
            s.push_str("───────────────────────────────────────────────────────────────────────\n");
            s.push_str(&format!(
                "  {:<12} {:>10} {:>10} {:>10} {:>6}  {}\n",
                "Stock", "Entry", "Stop", "Target", "Qty", "Holding"
            ));
            for outcome in self.trades() {
                if let Some(plan) = &outcome.plan {
                    s.push_str(&format!(
                        "  {:<12} {:>10.2} {:>10.2} {:>10.2} {:>6}  {}\n",
                        outcome.symbol,
                        plan.entry,
                        plan.stop,
                        plan.target,
                        plan.quantity,
                        outcome.holding.as_deref().unwrap_or("-")
                    ));
                }
            }
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
