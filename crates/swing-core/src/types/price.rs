//! Daily OHLCV price data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One daily OHLCV bar.
/// Uses f64 prices for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: u64,
}

impl PriceBar {
    /// Create a new bar.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calculate the bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Range as a percentage of the close.
    #[inline]
    pub fn range_pct(&self) -> f64 {
        self.range() / self.close * 100.0
    }

    /// Check that every price is finite and positive.
    pub fn has_valid_prices(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
    }
}

/// Chronologically ordered bars for one instrument.
///
/// Dates are strictly increasing; construction rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    /// Symbol identifier
    pub symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Create a series, checking the ordering and price invariants.
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, DataError> {
        let symbol = symbol.into();

        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(DataError::OutOfOrder(format!(
                    "{}: {} follows {}",
                    symbol, pair[1].date, pair[0].date
                )));
            }
        }

        if let Some(bad) = bars.iter().find(|b| !b.has_valid_prices()) {
            return Err(DataError::Parse(format!(
                "{}: non-positive price on {}",
                symbol, bad.date
            )));
        }

        Ok(Self { symbol, bars })
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&PriceBar> {
        self.bars.get(index)
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume as f64).collect()
    }

    /// Extract daily range percentages as a vector.
    pub fn range_pcts(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.range_pct()).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &PriceBar> {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_bar_calculations() {
        let bar = PriceBar::new(day(2), 100.0, 110.0, 95.0, 100.0, 1_000_000);

        assert!((bar.range() - 15.0).abs() < 1e-10);
        assert!((bar.range_pct() - 15.0).abs() < 1e-10);
        assert!(bar.has_valid_prices());
    }

    #[test]
    fn test_series_rejects_duplicate_dates() {
        let bars = vec![
            PriceBar::new(day(2), 100.0, 101.0, 99.0, 100.5, 1000),
            PriceBar::new(day(2), 100.5, 102.0, 100.0, 101.5, 1000),
        ];
        assert!(matches!(
            PriceSeries::new("TEST", bars),
            Err(DataError::OutOfOrder(_))
        ));
    }

    #[test]
    fn test_series_rejects_non_positive_price() {
        let bars = vec![PriceBar::new(day(2), 100.0, 101.0, 0.0, 100.5, 1000)];
        assert!(PriceSeries::new("TEST", bars).is_err());
    }

    #[test]
    fn test_series_extractions() {
        let series = PriceSeries::new(
            "TEST",
            vec![
                PriceBar::new(day(2), 100.0, 101.0, 99.0, 100.5, 1000),
                PriceBar::new(day(3), 100.5, 102.0, 100.0, 101.5, 2000),
            ],
        )
        .unwrap();

        assert_eq!(series.closes(), vec![100.5, 101.5]);
        assert_eq!(series.volumes(), vec![1000.0, 2000.0]);
        assert_eq!(series.last().unwrap().date, day(3));
    }
}
