//! Fully-defined indicator view of a single bar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Indicator values attached to one bar index.
///
/// Only bars where every indicator is defined produce a snapshot, so all
/// fields here are plain values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Position of the bar in its series
    pub index: usize,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// 20-bar simple moving average of close
    pub dma_20: f64,
    /// 50-bar simple moving average of close
    pub dma_50: f64,
    /// 14-bar RSI (simple rolling means)
    pub rsi_14: f64,
    /// 20-bar average volume
    pub avg_volume_20: f64,
    /// 10-bar average daily range, percent of close
    pub avg_range_pct_10: f64,
}

impl IndicatorSnapshot {
    /// Nested-above uptrend: close > DMA20 > DMA50.
    #[inline]
    pub fn is_uptrend(&self) -> bool {
        self.close > self.dma_20 && self.dma_20 > self.dma_50
    }

    /// Volume at or above its 20-bar average.
    #[inline]
    pub fn has_volume_support(&self) -> bool {
        self.volume as f64 >= self.avg_volume_20
    }
}
