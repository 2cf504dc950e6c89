//! Core traits for the swing screener.

mod indicator;
mod price_source;
mod rule;

pub use indicator::Indicator;
pub use price_source::PriceSource;
pub use rule::{Rule, RuleCheck};
