//! Weighted-point ranking of candidate setups.
//!
//! The score orders instruments; it never gates a trade. The volume
//! component rewards *quiet* volume, the opposite convention to the
//! distribution rule in the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use swing_core::types::IndicatorSnapshot;

const UPTREND_POINTS: u8 = 40;
const RSI_SWEET_SPOT_POINTS: u8 = 25;
const NEAR_DMA_20_POINTS: u8 = 20;
const QUIET_VOLUME_POINTS: u8 = 15;

/// Which components contributed to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankScore {
    pub score: u8,
    pub uptrend: bool,
    pub rsi_sweet_spot: bool,
    pub near_dma_20: bool,
    pub quiet_volume: bool,
}

/// A ranked instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub symbol: String,
    pub date: NaiveDate,
    pub score: u8,
    pub close: f64,
    pub rsi: f64,
    pub components: RankScore,
}

/// Stateless scorer over the latest snapshot of each instrument.
#[derive(Debug, Clone)]
pub struct Ranker {
    rsi_low: f64,
    rsi_high: f64,
    proximity: f64,
}

impl Ranker {
    /// Create the standard ranker: RSI sweet spot 35–60, within 2% of DMA20.
    pub fn new() -> Self {
        Self {
            rsi_low: 35.0,
            rsi_high: 60.0,
            proximity: 0.02,
        }
    }

    /// Score one snapshot, 0 to 100.
    pub fn score(&self, snapshot: &IndicatorSnapshot) -> RankScore {
        let uptrend = snapshot.is_uptrend();
        let rsi_sweet_spot = snapshot.rsi_14 >= self.rsi_low && snapshot.rsi_14 <= self.rsi_high;
        let near_dma_20 = (snapshot.close - snapshot.dma_20).abs() / snapshot.close < self.proximity;
        let quiet_volume = (snapshot.volume as f64) < snapshot.avg_volume_20;

        let score: u8 = [
            (uptrend, UPTREND_POINTS),
            (rsi_sweet_spot, RSI_SWEET_SPOT_POINTS),
            (near_dma_20, NEAR_DMA_20_POINTS),
            (quiet_volume, QUIET_VOLUME_POINTS),
        ]
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, points)| points)
        .sum();

        RankScore {
            score,
            uptrend,
            rsi_sweet_spot,
            near_dma_20,
            quiet_volume,
        }
    }

    /// Score and sort by score, highest first. Ties keep input order.
    pub fn rank<I>(&self, candidates: I) -> Vec<RankEntry>
    where
        I: IntoIterator<Item = (String, IndicatorSnapshot)>,
    {
        let mut entries: Vec<RankEntry> = candidates
            .into_iter()
            .map(|(symbol, snapshot)| {
                let components = self.score(&snapshot);
                RankEntry {
                    symbol,
                    date: snapshot.date,
                    score: components.score,
                    close: snapshot.close,
                    rsi: snapshot.rsi_14,
                    components,
                }
            })
            .collect();

        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}
