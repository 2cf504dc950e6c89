//! Plain-text trade explanations.

use swing_core::types::{IndicatorSnapshot, TradePlan};

/// Build a readable summary of why a trade was planned and how it is sized.
pub fn explain_trade(
    symbol: &str,
    snapshot: &IndicatorSnapshot,
    plan: &TradePlan,
    holding_label: &str,
) -> String {
    let mut lines = Vec::new();

    lines.push(format!("{} TRADE SUMMARY", symbol));
    lines.push("-".repeat(40));

    lines.push("Trend:".to_string());
    lines.push(if snapshot.is_uptrend() {
        "  Price is trading above its 20 and 50 day averages in a bullish trend.".to_string()
    } else {
        "  The trend is not bullish, so new trades are avoided.".to_string()
    });

    lines.push("Momentum (RSI):".to_string());
    lines.push(if (35.0..=60.0).contains(&snapshot.rsi_14) {
        format!(
            "  RSI is at {:.2}, healthy momentum without being overbought.",
            snapshot.rsi_14
        )
    } else {
        format!("  RSI is at {:.2}, which suggests poor timing.", snapshot.rsi_14)
    });

    lines.push("Volume:".to_string());
    lines.push(if snapshot.has_volume_support() {
        "  Volume supports the move, indicating genuine participation.".to_string()
    } else {
        "  Volume does not strongly support this move.".to_string()
    });

    lines.push("Risk:".to_string());
    lines.push(format!(
        "  Entry is planned near {:.2}. Below {:.2} the trade idea is invalid.",
        plan.entry, plan.stop
    ));

    lines.push("Reward:".to_string());
    lines.push(format!(
        "  Target is {:.2}, a {}:1 reward to risk.",
        plan.target, plan.reward_ratio
    ));

    lines.push("Position size:".to_string());
    lines.push(format!(
        "  {} shares, risking {:.2} if the stop is hit.",
        plan.quantity,
        plan.total_risk()
    ));

    lines.push("Holding period:".to_string());
    lines.push(format!("  Expected hold of {} for the {} style.", holding_label, plan.style));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::snapshot;
    use rust_decimal_macros::dec;
    use swing_core::types::Style;

    #[test]
    fn test_explanation_mentions_plan() {
        let plan = TradePlan {
            entry: dec!(110.00),
            stop: dec!(107.80),
            target: dec!(115.50),
            quantity: 45,
            stop_pct: dec!(0.02),
            risk_per_share: dec!(2.20),
            reward_ratio: dec!(2.5),
            style: Style::Normal,
        };

        let text = explain_trade("ICICIBANK", &snapshot(), &plan, "3–7 days");

        assert!(text.starts_with("ICICIBANK TRADE SUMMARY"));
        assert!(text.contains("bullish trend"));
        assert!(text.contains("RSI is at 50.00"));
        assert!(text.contains("genuine participation"));
        assert!(text.contains("107.80"));
        assert!(text.contains("115.50"));
        assert!(text.contains("45 shares, risking 99.00"));
        assert!(text.contains("3–7 days for the NORMAL style"));
    }
}
