//! Decision rules for swing setups.
//!
//! This crate provides:
//! - The four standard rules (trend, RSI extremes, distribution volume,
//!   style RSI band) and the cascading `RuleEngine` that runs them
//! - `Ranker`, a weighted-point score used only for ordering
//! - A volatility-aware holding-period estimate
//! - Plain-text trade explanations

mod engine;
mod explain;
mod holding;
mod ranker;
mod rules;

pub use engine::{terminates, RuleEngine, ALL_RULES_PASSED};
pub use explain::explain_trade;
pub use holding::{estimate_holding, HoldingAdvice, HoldingEstimate, VolatilityBucket};
pub use ranker::{RankEntry, RankScore, Ranker};
pub use rules::{DistributionRule, RsiExtremesRule, StyleBandRule, TrendRule};
