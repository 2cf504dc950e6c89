//! Price history source trait.

use crate::error::DataError;
use crate::types::PriceSeries;

/// Source of daily price history keyed by symbol.
///
/// Loading is synchronous; callers fan out across blocking tasks.
pub trait PriceSource: Send + Sync {
    /// Load the cleaned, chronologically sorted series for `symbol`.
    fn load(&self, symbol: &str) -> Result<PriceSeries, DataError>;
}
