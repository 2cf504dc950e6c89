//! Core data types for the swing screener.

mod decision;
mod plan;
mod price;
mod snapshot;
mod style;

pub use decision::{Decision, Observed, RuleContext, RuleKind, RuleResult, TraceEntry, Verdict};
pub use plan::TradePlan;
pub use price::{PriceBar, PriceSeries};
pub use snapshot::IndicatorSnapshot;
pub use style::{Style, StyleProfile, StyleTable, UnknownStyle};
