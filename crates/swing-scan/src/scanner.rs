//! Per-instrument scan.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use swing_core::error::{RiskError, SwingError};
use swing_core::traits::PriceSource;
use swing_core::types::{
    Decision, IndicatorSnapshot, PriceSeries, Style, StyleProfile, TradePlan,
};
use swing_indicators::IndicatorPipeline;
use swing_risk::{to_decimal, PositionSizer, RiskPlanner, DEFAULT_RISK_CEILING};
use swing_rules::{estimate_holding, HoldingEstimate, RuleEngine};
use tracing::{debug, info, warn};

use crate::report::ScanReport;

/// Scanner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub capital: Decimal,
    pub risk_fraction: Decimal,
    pub max_risk_fraction: Decimal,
    pub style: Style,
    pub profile: StyleProfile,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        let style = Style::default();
        Self {
            capital: dec!(10000),
            risk_fraction: dec!(0.01),
            max_risk_fraction: DEFAULT_RISK_CEILING,
            style,
            profile: style.default_profile(),
        }
    }
}

impl ScannerConfig {
    /// Default configuration for `style` with its default profile.
    pub fn for_style(style: Style) -> Self {
        Self {
            style,
            profile: style.default_profile(),
            ..Self::default()
        }
    }
}

/// Result of scanning one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub symbol: String,
    /// Date of the snapshot the decision was made on
    pub as_of: Option<NaiveDate>,
    pub decision: Decision,
    /// Present only for TRADE
    pub plan: Option<TradePlan>,
    /// Style holding label, present only for TRADE
    pub holding: Option<String>,
    /// Advisory estimate, present only for TRADE
    pub holding_estimate: Option<HoldingEstimate>,
    pub style: Style,
    #[serde(skip)]
    pub snapshot: Option<IndicatorSnapshot>,
}

impl ScanOutcome {
    fn failed(symbol: &str, style: Style, error: &dyn Display) -> Self {
        Self {
            symbol: symbol.to_string(),
            as_of: None,
            decision: Decision::rejected(format!("Data load failed: {}", error)),
            plan: None,
            holding: None,
            holding_estimate: None,
            style,
            snapshot: None,
        }
    }
}

/// Runs the live decision path for one style.
pub struct Scanner {
    config: ScannerConfig,
    pipeline: IndicatorPipeline,
    engine: RuleEngine,
    planner: RiskPlanner,
}

impl Scanner {
    /// Create a scanner. Fails when capital or risk fraction are invalid.
    pub fn new(config: ScannerConfig) -> Result<Self, RiskError> {
        let sizer = PositionSizer::new(
            config.capital,
            config.risk_fraction,
            config.max_risk_fraction,
        )?;
        let planner = RiskPlanner::new(sizer, config.style, &config.profile);

        Ok(Self {
            config,
            pipeline: IndicatorPipeline::new(),
            engine: RuleEngine::new(),
            planner,
        })
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Decide on one series.
    ///
    /// Insufficient history is an error. A trade the planner cannot size
    /// or price is not: the decision is downgraded to NO_TRADE with the
    /// rule trace kept.
    pub fn scan_series(&self, series: &PriceSeries) -> Result<ScanOutcome, SwingError> {
        let frame = self.pipeline.compute(series)?;
        let snapshot = frame.latest()?;
        let style = self.config.style;

        let mut decision = self.engine.evaluate(&snapshot, style, &self.config.profile);
        let mut plan = None;

        if decision.is_trade() {
            match to_decimal(snapshot.close).and_then(|entry| self.planner.plan(entry)) {
                Ok(p) => plan = Some(p),
                Err(e) => {
                    debug!(symbol = %series.symbol, reason = %e, "Trade blocked by risk");
                    decision.block(format!("Risk rejected: {}", e));
                }
            }
        }

        let traded = plan.is_some();
        let outcome = ScanOutcome {
            symbol: series.symbol.clone(),
            as_of: Some(snapshot.date),
            holding: traded.then(|| self.config.profile.holding_label.clone()),
            holding_estimate: traded.then(|| estimate_holding(&snapshot)),
            decision,
            plan,
            style,
            snapshot: Some(snapshot),
        };

        info!(
            symbol = %outcome.symbol,
            decision = %outcome.decision.verdict,
            style = %style,
            "Scan decision"
        );

        Ok(outcome)
    }

    /// Load and decide on one symbol. Never fails: load and indicator
    /// errors become a NO_TRADE outcome.
    pub fn scan_symbol<S: PriceSource + ?Sized>(&self, symbol: &str, source: &S) -> ScanOutcome {
        let style = self.config.style;

        let series = match source.load(symbol) {
            Ok(series) => series,
            Err(e) => {
                warn!(symbol, error = %e, "Data load failed");
                return ScanOutcome::failed(symbol, style, &e);
            }
        };

        match self.scan_series(&series) {
            Ok(outcome) => outcome,
            Err(SwingError::Indicator(e)) => {
                warn!(symbol, error = %e, "Indicators unavailable");
                ScanOutcome::failed(symbol, style, &e)
            }
            Err(e) => {
                warn!(symbol, error = %e, "Scan failed");
                ScanOutcome::failed(symbol, style, &e)
            }
        }
    }

    /// Scan symbols in order.
    pub fn scan_all<S: PriceSource + ?Sized>(&self, symbols: &[String], source: &S) -> ScanReport {
        let outcomes = symbols
            .iter()
            .map(|symbol| self.scan_symbol(symbol, source))
            .collect();
        ScanReport::new(self.config.style, outcomes)
    }
}

/// Latest complete snapshot per symbol, skipping symbols that fail to load
/// or lack history.
pub fn latest_snapshots<S: PriceSource + ?Sized>(
    symbols: &[String],
    source: &S,
) -> Vec<(String, IndicatorSnapshot)> {
    let pipeline = IndicatorPipeline::new();

    symbols
        .iter()
        .filter_map(|symbol| {
            let snapshot = source
                .load(symbol)
                .map_err(SwingError::from)
                .and_then(|series| Ok(pipeline.compute(&series)?.latest()?));

            match snapshot {
                Ok(snapshot) => Some((symbol.clone(), snapshot)),
                Err(e) => {
                    debug!(symbol = %symbol, error = %e, "Skipping symbol");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashMap;
    use swing_core::error::DataError;
    use swing_core::types::{PriceBar, Verdict};

    struct MemorySource(HashMap<String, Vec<f64>>);

    impl PriceSource for MemorySource {
        fn load(&self, symbol: &str) -> Result<PriceSeries, DataError> {
            let closes = self
                .0
                .get(symbol)
                .ok_or_else(|| DataError::FileNotFound(format!("data/{}_NS.csv", symbol)))?;
            PriceSeries::new(symbol, bars(closes))
        }
    }

    fn bars(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar::new(start + Duration::days(i as i64), c, c + 1.0, c - 1.0, c, 1_000))
            .collect()
    }

    fn zigzag(len: usize) -> Vec<f64> {
        let mut closes = vec![100.0];
        for i in 1..len {
            let step = if i % 7 == 0 { -2.8 } else { 1.0 };
            closes.push(closes[i - 1] + step);
        }
        closes
    }

    fn source() -> MemorySource {
        let mut data = HashMap::new();
        data.insert("ZIG".to_string(), zigzag(80));
        data.insert("RISE".to_string(), (0..80).map(|i| 100.0 + i as f64).collect());
        data.insert("SHORT".to_string(), zigzag(30));
        MemorySource(data)
    }

    fn scanner(style: Style) -> Scanner {
        Scanner::new(ScannerConfig::for_style(style)).unwrap()
    }

    #[test]
    fn test_aggressive_trade_with_plan() {
        let outcome = scanner(Style::Aggressive).scan_symbol("ZIG", &source());

        assert_eq!(outcome.decision.verdict, Verdict::Trade);
        let plan = outcome.plan.unwrap();
        assert_eq!(plan.entry, dec!(137.20));
        assert_eq!(plan.stop, dec!(135.14));
        assert_eq!(plan.target, dec!(143.37));
        assert_eq!(plan.quantity, 48);
        assert_eq!(outcome.holding.as_deref(), Some("1–3 days"));
        assert!(outcome.holding_estimate.is_some());
        assert_eq!(outcome.decision.trace.len(), 4);
    }

    #[test]
    fn test_normal_style_waits() {
        // RSI ~68 is outside the NORMAL band
        let outcome = scanner(Style::Normal).scan_symbol("ZIG", &source());

        assert_eq!(outcome.decision.verdict, Verdict::Wait);
        assert!(outcome.plan.is_none());
        assert!(outcome.holding.is_none());
        assert_eq!(
            outcome.decision.reasons,
            vec!["Waiting for better RSI alignment".to_string()]
        );
    }

    #[test]
    fn test_steady_rise_is_extreme() {
        let outcome = scanner(Style::Aggressive).scan_symbol("RISE", &source());

        assert_eq!(outcome.decision.verdict, Verdict::NoTrade);
        assert!(outcome
            .decision
            .reasons
            .contains(&"RSI is in extreme zone".to_string()));
    }

    #[test]
    fn test_failures_become_no_trade() {
        let scanner = scanner(Style::Normal);

        let missing = scanner.scan_symbol("NOPE", &source());
        assert_eq!(missing.decision.verdict, Verdict::NoTrade);
        assert_eq!(
            missing.decision.reasons,
            vec!["Data load failed: CSV not found: data/NOPE_NS.csv".to_string()]
        );
        assert!(missing.decision.trace.is_empty());

        let short = scanner.scan_symbol("SHORT", &source());
        assert_eq!(
            short.decision.reasons,
            vec!["Data load failed: Not enough data rows (30). Minimum required: 60".to_string()]
        );
    }

    #[test]
    fn test_sizing_rejection_downgrades() {
        let config = ScannerConfig {
            capital: dec!(100),
            ..ScannerConfig::for_style(Style::Aggressive)
        };
        let outcome = Scanner::new(config).unwrap().scan_symbol("ZIG", &source());

        assert_eq!(outcome.decision.verdict, Verdict::NoTrade);
        assert!(outcome.plan.is_none());
        // engine trace is kept
        assert_eq!(outcome.decision.trace.len(), 4);
        let last = outcome.decision.reasons.last().unwrap();
        assert!(last.starts_with("Risk rejected: "));
    }

    #[test]
    fn test_collapsed_levels_downgrade() {
        // Sub-cent prices round the stop onto the entry
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let tiny: Vec<PriceBar> = zigzag(80)
            .iter()
            .map(|c| c * 0.001)
            .enumerate()
            .map(|(i, c)| PriceBar::new(start + Duration::days(i as i64), c, c * 1.01, c * 0.99, c, 1_000))
            .collect();
        let series = PriceSeries::new("TINY", tiny).unwrap();

        let outcome = scanner(Style::Aggressive).scan_series(&series).unwrap();

        assert_eq!(outcome.decision.verdict, Verdict::NoTrade);
        assert!(outcome.plan.is_none());
        assert!(outcome.holding.is_none());
        assert_eq!(outcome.decision.trace.len(), 4);
        assert!(outcome.decision.trace.iter().all(|t| t.result.is_pass()));
        let last = outcome.decision.reasons.last().unwrap();
        assert!(last.starts_with("Risk rejected: Risk per share must be positive"));
    }

    #[test]
    fn test_scan_all_keeps_order() {
        let symbols: Vec<String> = ["SHORT", "ZIG", "NOPE"].iter().map(|s| s.to_string()).collect();
        let report = scanner(Style::Aggressive).scan_all(&symbols, &source());

        let order: Vec<&str> = report.outcomes.iter().map(|o| o.symbol.as_str()).collect();
        assert_eq!(order, vec!["SHORT", "ZIG", "NOPE"]);
        assert_eq!(report.counts().trade, 1);
        assert_eq!(report.counts().no_trade, 2);
    }

    #[test]
    fn test_latest_snapshots_skip_failures() {
        let symbols: Vec<String> = ["ZIG", "SHORT", "NOPE", "RISE"].iter().map(|s| s.to_string()).collect();
        let snapshots = latest_snapshots(&symbols, &source());

        let names: Vec<&str> = snapshots.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(names, vec!["ZIG", "RISE"]);
        assert_eq!(snapshots[0].1.index, 79);
    }
}
