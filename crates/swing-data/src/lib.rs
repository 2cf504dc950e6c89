//! Data sources for the swing screener.

mod csv_source;
mod universe;

pub use csv_source::{resolve_data_file, CsvPriceSource, DirectorySource};
pub use universe::load_universe;

use std::path::Path;
use swing_core::error::DataError;
use swing_core::types::PriceSeries;

/// Load a price series from a CSV file.
pub fn load_csv(path: impl AsRef<Path>, symbol: &str) -> Result<PriceSeries, DataError> {
    CsvPriceSource::new(path)?.load(symbol)
}
