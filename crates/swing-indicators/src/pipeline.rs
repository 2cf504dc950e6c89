//! Indicator pipeline: derives every indicator once per series.

use swing_core::error::IndicatorError;
use swing_core::traits::Indicator;
use swing_core::types::{IndicatorSnapshot, PriceBar, PriceSeries};
use tracing::debug;

use crate::{AvgRangePct, Rsi, Sma};

/// Minimum bars a series needs before indicators are computed.
pub const MIN_BARS: usize = 60;

/// Computes DMA20/50, RSI14, 20-bar average volume and 10-bar average
/// range for a series.
#[derive(Debug, Clone)]
pub struct IndicatorPipeline {
    dma_fast: Sma,
    dma_slow: Sma,
    rsi: Rsi,
    avg_volume: Sma,
    avg_range: AvgRangePct,
    min_bars: usize,
}

impl IndicatorPipeline {
    /// Create the standard pipeline.
    pub fn new() -> Self {
        Self {
            dma_fast: Sma::new(20),
            dma_slow: Sma::new(50),
            rsi: Rsi::new(14),
            avg_volume: Sma::new(20),
            avg_range: AvgRangePct::new(10),
            min_bars: MIN_BARS,
        }
    }

    /// Minimum bars this pipeline accepts.
    pub fn min_bars(&self) -> usize {
        self.min_bars
    }

    /// Compute all indicators over the full series.
    ///
    /// Fails with `InsufficientData` below the minimum bar count rather
    /// than returning partial indicators.
    pub fn compute(&self, series: &PriceSeries) -> Result<IndicatorFrame, IndicatorError> {
        if series.len() < self.min_bars {
            return Err(IndicatorError::InsufficientData {
                required: self.min_bars,
                available: series.len(),
            });
        }

        let closes = series.closes();
        let volumes = series.volumes();

        let frame = IndicatorFrame {
            bars: series.bars().to_vec(),
            dma_20: self.dma_fast.calculate(&closes),
            dma_50: self.dma_slow.calculate(&closes),
            rsi_14: self.rsi.calculate(&closes),
            avg_volume_20: self.avg_volume.calculate(&volumes),
            avg_range_pct_10: self
                .avg_range
                .calculate(&AvgRangePct::range_pcts(series.bars())),
        };

        debug!(
            symbol = %series.symbol,
            bars = frame.len(),
            complete = frame.complete_count(),
            "Computed indicators"
        );

        Ok(frame)
    }
}

impl Default for IndicatorPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Indicator columns aligned to the bars they were computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    bars: Vec<PriceBar>,
    pub dma_20: Vec<Option<f64>>,
    pub dma_50: Vec<Option<f64>>,
    pub rsi_14: Vec<Option<f64>>,
    pub avg_volume_20: Vec<Option<f64>>,
    pub avg_range_pct_10: Vec<Option<f64>>,
}

impl IndicatorFrame {
    /// Number of bars in the frame.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Snapshot at a bar index, or `None` if any indicator is undefined there.
    pub fn snapshot(&self, index: usize) -> Option<IndicatorSnapshot> {
        let bar = self.bars.get(index)?;
        Some(IndicatorSnapshot {
            index,
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            dma_20: self.dma_20[index]?,
            dma_50: self.dma_50[index]?,
            rsi_14: self.rsi_14[index]?,
            avg_volume_20: self.avg_volume_20[index]?,
            avg_range_pct_10: self.avg_range_pct_10[index]?,
        })
    }

    /// Every fully-defined snapshot, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = IndicatorSnapshot> + '_ {
        (0..self.len()).filter_map(|i| self.snapshot(i))
    }

    /// Number of bars eligible for decisioning.
    pub fn complete_count(&self) -> usize {
        self.snapshots().count()
    }

    /// Most recent fully-defined snapshot.
    pub fn latest(&self) -> Result<IndicatorSnapshot, IndicatorError> {
        (0..self.len())
            .rev()
            .find_map(|i| self.snapshot(i))
            .ok_or(IndicatorError::NoCompleteSnapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;

    fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                PriceBar::new(start + Days::new(i as u64), c, c + 1.0, c - 1.0, c, 1_000)
            })
            .collect();
        PriceSeries::new("TEST", bars).unwrap()
    }

    fn zigzag(len: usize) -> Vec<f64> {
        // six steps up, one larger step down
        let mut closes = vec![100.0];
        for i in 1..len {
            let step = if i % 7 == 0 { -2.8 } else { 1.0 };
            closes.push(closes[i - 1] + step);
        }
        closes
    }

    #[test]
    fn test_insufficient_bars() {
        let series = series_from_closes(&zigzag(59));
        let err = IndicatorPipeline::new().compute(&series).unwrap_err();

        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                required: 60,
                available: 59
            }
        );
    }

    #[test]
    fn test_warm_up_excluded() {
        let frame = IndicatorPipeline::new()
            .compute(&series_from_closes(&zigzag(60)))
            .unwrap();

        assert!(frame.snapshot(48).is_none());
        let first = frame.snapshots().next().unwrap();
        assert_eq!(first.index, 49);
        assert_eq!(frame.complete_count(), 11);
    }

    #[test]
    fn test_latest_snapshot_values() {
        let closes = zigzag(80);
        let frame = IndicatorPipeline::new()
            .compute(&series_from_closes(&closes))
            .unwrap();
        let latest = frame.latest().unwrap();

        assert_eq!(latest.index, 79);
        let dma_20: f64 = closes[60..80].iter().sum::<f64>() / 20.0;
        assert!((latest.dma_20 - dma_20).abs() < 1e-9);
        // 12 gains of 1.0 and two losses of 2.8 in every 14-change window
        let expected_rsi = 100.0 - 100.0 / (1.0 + 12.0 / 5.6);
        assert!((latest.rsi_14 - expected_rsi).abs() < 1e-9);
        assert!((latest.avg_volume_20 - 1_000.0).abs() < 1e-10);
        assert!(latest.is_uptrend());
    }

    #[test]
    fn test_flat_tail_falls_back_to_last_complete_bar() {
        let mut closes = zigzag(60);
        closes.extend(std::iter::repeat(closes[59]).take(15));
        let frame = IndicatorPipeline::new()
            .compute(&series_from_closes(&closes))
            .unwrap();

        // The final 15 closes never move, so RSI is undefined there.
        assert!(frame.snapshot(74).is_none());
        assert!(frame.latest().unwrap().index < 74);
    }

    #[test]
    fn test_all_flat_has_no_complete_snapshot() {
        let frame = IndicatorPipeline::new()
            .compute(&series_from_closes(&[50.0; 70]))
            .unwrap();

        assert_eq!(frame.latest(), Err(IndicatorError::NoCompleteSnapshot));
    }

    proptest! {
        #[test]
        fn prop_pipeline_idempotent(cents in prop::collection::vec(1_000u32..50_000, 60..150)) {
            let closes: Vec<f64> = cents.iter().map(|&c| c as f64 / 100.0).collect();
            let series = series_from_closes(&closes);
            let pipeline = IndicatorPipeline::new();

            let first = pipeline.compute(&series).unwrap();
            let second = pipeline.compute(&series).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_short_series_rejected(len in 0usize..60) {
            let series = series_from_closes(&zigzag(len.max(1))[..len]);
            let is_insufficient = matches!(
                IndicatorPipeline::new().compute(&series),
                Err(IndicatorError::InsufficientData { .. })
            );
            prop_assert!(is_insufficient);
        }
    }
}
