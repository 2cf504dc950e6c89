//! Technical indicators and the per-series indicator pipeline.
//!
//! This crate provides:
//! - Simple moving averages (DMA, average volume)
//! - RSI built from simple rolling means of gains and losses
//! - Average daily range percentage
//! - `IndicatorPipeline`, which aligns all of them to bar indices
//!
//! Every indicator returns one value per input point, `None` while
//! warming up, so results can be joined by index.

pub mod momentum;
pub mod moving_average;
pub mod pipeline;
pub mod volatility;

pub use momentum::Rsi;
pub use moving_average::Sma;
pub use pipeline::{IndicatorFrame, IndicatorPipeline, MIN_BARS};
pub use volatility::AvgRangePct;
