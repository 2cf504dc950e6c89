//! List trading styles command.

use anyhow::Result;
use rust_decimal::Decimal;
use swing_config::AppConfig;

pub async fn run(config: AppConfig) -> Result<()> {
    println!("Trading Styles");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for (style, profile) in config.styles.iter() {
        let active = if style == config.risk.style { " (active)" } else { "" };
        println!("  {}{}", style, active);
        println!("  ───────────────────────────────────────────────────────");
        println!("  RSI band:      {:.0}-{:.0}", profile.rsi_low, profile.rsi_high);
        println!("  Reward:Risk:   {}", profile.reward_ratio);
        println!("  Stop:          {}%", (profile.stop_pct * Decimal::ONE_HUNDRED).normalize());
        println!("  Holding:       {}", profile.holding_label);
        println!();
    }

    println!("Use --style <name> to select a style.");

    Ok(())
}
