//! Single-position replay engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use swing_core::error::{RiskError, SwingError};
use swing_core::types::{IndicatorSnapshot, PriceSeries, Style, StyleProfile};
use swing_indicators::IndicatorPipeline;
use swing_risk::{to_decimal, BacktestEntry, BacktestStopPolicy, PositionSizer, DEFAULT_RISK_CEILING};
use tracing::{debug, info, warn};

use crate::report::BacktestReport;
use crate::statistics::{ExitReason, InstrumentStats, PortfolioSummary, TradeRecord};

/// Backtest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Capital used for sizing every entry
    pub capital: Decimal,
    /// Fraction of capital risked per trade
    pub risk_fraction: Decimal,
    /// Upper bound accepted for `risk_fraction`
    pub max_risk_fraction: Decimal,
    pub style: Style,
    pub profile: StyleProfile,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        let style = Style::default();
        Self {
            capital: dec!(10000),
            risk_fraction: dec!(0.01),
            max_risk_fraction: DEFAULT_RISK_CEILING,
            style,
            profile: style.default_profile(),
        }
    }
}

impl BacktestConfig {
    /// Default configuration for `style` with its default profile.
    pub fn for_style(style: Style) -> Self {
        Self {
            style,
            profile: style.default_profile(),
            ..Self::default()
        }
    }
}

/// Open position carried between bars.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPosition {
    pub entry_date: chrono::NaiveDate,
    pub levels: BacktestEntry,
}

/// Replay state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PositionState {
    #[default]
    Flat,
    InPosition(OpenPosition),
}

/// Replays the trend + style-band entry with a DMA50 stop.
pub struct BacktestSimulator {
    config: BacktestConfig,
    pipeline: IndicatorPipeline,
    sizer: PositionSizer,
    stops: BacktestStopPolicy,
}

impl BacktestSimulator {
    /// Create a simulator. Fails when capital or risk fraction are invalid.
    pub fn new(config: BacktestConfig) -> Result<Self, RiskError> {
        let sizer = PositionSizer::new(
            config.capital,
            config.risk_fraction,
            config.max_risk_fraction,
        )?;

        Ok(Self {
            config,
            pipeline: IndicatorPipeline::new(),
            sizer,
            stops: BacktestStopPolicy,
        })
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Replay one instrument.
    ///
    /// Starts at the first bar with every indicator defined. Exits are
    /// checked stop first, so a bar touching both levels closes at the stop.
    /// A position still open after the last bar is dropped.
    pub fn run(&self, series: &PriceSeries) -> Result<InstrumentStats, SwingError> {
        let frame = self.pipeline.compute(series)?;
        let mut state = PositionState::Flat;
        let mut stats = InstrumentStats::new(series.symbol.clone());

        for snapshot in frame.snapshots() {
            state = match state {
                PositionState::Flat => self.try_enter(&snapshot)?,
                PositionState::InPosition(position) => match check_exit(&position, &snapshot)? {
                    Some(trade) => {
                        debug!(
                            symbol = %series.symbol,
                            exit_date = %trade.exit_date,
                            reason = trade.exit_reason.as_str(),
                            pnl = %trade.pnl,
                            "Position closed"
                        );
                        stats.add_trade(trade);
                        // no re-entry on the exit bar
                        PositionState::Flat
                    }
                    None => PositionState::InPosition(position),
                },
            };
        }

        if let PositionState::InPosition(position) = &state {
            debug!(
                symbol = %series.symbol,
                entry_date = %position.entry_date,
                "Open position at end of data not counted"
            );
        }

        stats.finalize();
        Ok(stats)
    }

    /// Replay many instruments, turning per-instrument failures into
    /// zero-trade records.
    pub fn run_all<I, E>(&self, inputs: I) -> BacktestReport
    where
        I: IntoIterator<Item = (String, Result<PriceSeries, E>)>,
        E: std::fmt::Display,
    {
        let mut instruments = Vec::new();

        for (symbol, loaded) in inputs {
            let stats = match loaded {
                Ok(series) => match self.run(&series) {
                    Ok(stats) => stats,
                    Err(e) => {
                        warn!(symbol = %symbol, error = %e, "Backtest failed");
                        InstrumentStats::failed(symbol, e.to_string())
                    }
                },
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Backtest data unavailable");
                    InstrumentStats::failed(symbol, e.to_string())
                }
            };
            instruments.push(stats);
        }

        let summary = PortfolioSummary::from_instruments(&instruments);
        info!(
            instruments = summary.instruments,
            failed = summary.failed,
            trades = summary.total_trades,
            net_pnl = %summary.net_pnl,
            "Backtest complete"
        );

        BacktestReport {
            config: self.config.clone(),
            instruments,
            summary,
        }
    }

    fn try_enter(&self, snapshot: &IndicatorSnapshot) -> Result<PositionState, SwingError> {
        if !snapshot.is_uptrend() || !self.config.profile.rsi_in_band(snapshot.rsi_14) {
            return Ok(PositionState::Flat);
        }

        match self
            .stops
            .open(snapshot, &self.sizer, self.config.profile.reward_ratio)
        {
            Ok(levels) => {
                debug!(
                    date = %snapshot.date,
                    entry = %levels.entry,
                    stop = %levels.stop,
                    target = %levels.target,
                    quantity = levels.quantity,
                    "Position opened"
                );
                Ok(PositionState::InPosition(OpenPosition {
                    entry_date: snapshot.date,
                    levels,
                }))
            }
            Err(e @ RiskError::UnrepresentablePrice(_)) => Err(e.into()),
            Err(e) => {
                debug!(date = %snapshot.date, reason = %e, "Entry skipped");
                Ok(PositionState::Flat)
            }
        }
    }
}

fn check_exit(
    position: &OpenPosition,
    snapshot: &IndicatorSnapshot,
) -> Result<Option<TradeRecord>, RiskError> {
    let levels = &position.levels;
    let low = to_decimal(snapshot.low)?;
    let high = to_decimal(snapshot.high)?;

    let (exit, exit_reason) = if low <= levels.stop {
        (levels.stop, ExitReason::Stop)
    } else if high >= levels.target {
        (levels.target, ExitReason::Target)
    } else {
        return Ok(None);
    };

    Ok(Some(TradeRecord {
        entry_date: position.entry_date,
        exit_date: snapshot.date,
        entry: levels.entry,
        exit,
        stop: levels.stop,
        target: levels.target,
        quantity: levels.quantity,
        pnl: (exit - levels.entry) * Decimal::from(levels.quantity),
        exit_reason,
    }))
}
