//! Volatility indicators.

use swing_core::traits::Indicator;
use swing_core::types::PriceBar;

use crate::Sma;

/// Average daily range as a percentage of close.
///
/// Input is the per-bar `(high - low) / close * 100` series, see
/// [`AvgRangePct::range_pcts`].
#[derive(Debug, Clone)]
pub struct AvgRangePct {
    mean: Sma,
}

impl AvgRangePct {
    /// Create a new average range indicator.
    pub fn new(period: usize) -> Self {
        Self {
            mean: Sma::new(period),
        }
    }

    /// Per-bar range percentages.
    pub fn range_pcts(bars: &[PriceBar]) -> Vec<f64> {
        bars.iter().map(PriceBar::range_pct).collect()
    }
}

impl Indicator for AvgRangePct {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        self.mean.calculate(data)
    }

    fn period(&self) -> usize {
        self.mean.period()
    }

    fn name(&self) -> &str {
        "AvgRangePct"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_avg_range_pct() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let bars: Vec<PriceBar> = [(102.0, 98.0), (101.0, 99.0), (103.0, 97.0)]
            .iter()
            .enumerate()
            .map(|(i, &(high, low))| {
                PriceBar::new(date + chrono::Days::new(i as u64), 100.0, high, low, 100.0, 1000)
            })
            .collect();

        let pcts = AvgRangePct::range_pcts(&bars);
        assert_eq!(pcts, vec![4.0, 2.0, 6.0]);

        let result = AvgRangePct::new(3).calculate(&pcts);
        assert!(result[1].is_none());
        assert!((result[2].unwrap() - 4.0).abs() < 1e-10);
    }
}
