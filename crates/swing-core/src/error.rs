//! Error types for the swing screener.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level screener error.
#[derive(Error, Debug)]
pub enum SwingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Risk error: {0}")]
    Risk(#[from] RiskError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Data ingestion errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("CSV not found: {0}")]
    FileNotFound(String),

    #[error("CSV file is empty")]
    Empty,

    #[error("CSV schema invalid: date column not found")]
    NoDateColumn,

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Bars out of order: {0}")]
    OutOfOrder(String),

    #[error("CSV error: {0}")]
    Csv(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Not enough data rows ({available}). Minimum required: {required}")]
    InsufficientData { required: usize, available: usize },

    #[error("Indicators could not be computed: no bar has every indicator defined")]
    NoCompleteSnapshot,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Risk planning errors.
///
/// `SizingRejected` is a business outcome rather than a fault: callers
/// surface it as a NO_TRADE reason.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("Invalid entry price: {0}")]
    InvalidEntry(Decimal),

    #[error("Price {0} cannot be represented")]
    UnrepresentablePrice(f64),

    #[error("Capital must be greater than 0, got {0}")]
    InvalidCapital(Decimal),

    #[error("Risk fraction {fraction} outside (0, {ceiling}]")]
    InvalidRiskFraction { fraction: Decimal, ceiling: Decimal },

    #[error("Risk per share must be positive (entry {entry}, stop {stop})")]
    NonPositiveRisk { entry: Decimal, stop: Decimal },

    #[error("Position size too small: risk per share {risk_per_share} exceeds max risk {max_risk}")]
    SizingRejected {
        risk_per_share: Decimal,
        max_risk: Decimal,
    },
}

impl RiskError {
    /// True when the error is the sizing business outcome rather than bad input.
    pub fn is_sizing_rejection(&self) -> bool {
        matches!(self, RiskError::SizingRejected { .. })
    }
}

/// Result type alias for screener operations.
pub type SwingResult<T> = Result<T, SwingError>;
