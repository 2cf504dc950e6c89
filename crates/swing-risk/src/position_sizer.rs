//! Risk-based position sizing.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use swing_core::error::RiskError;

/// Highest risk fraction accepted unless configured otherwise.
pub const DEFAULT_RISK_CEILING: Decimal = dec!(0.03);

/// Sizes positions so a stop-out loses at most `capital * risk_fraction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSizer {
    capital: Decimal,
    risk_fraction: Decimal,
}

impl PositionSizer {
    /// Create a sizer, validating capital > 0 and 0 < risk_fraction <= ceiling.
    pub fn new(capital: Decimal, risk_fraction: Decimal, ceiling: Decimal) -> Result<Self, RiskError> {
        if capital <= Decimal::ZERO {
            return Err(RiskError::InvalidCapital(capital));
        }
        if risk_fraction <= Decimal::ZERO || risk_fraction > ceiling {
            return Err(RiskError::InvalidRiskFraction {
                fraction: risk_fraction,
                ceiling,
            });
        }
        Ok(Self {
            capital,
            risk_fraction,
        })
    }

    pub fn capital(&self) -> Decimal {
        self.capital
    }

    pub fn risk_fraction(&self) -> Decimal {
        self.risk_fraction
    }

    /// Capital allowed at risk on one trade.
    pub fn max_risk(&self) -> Decimal {
        self.capital * self.risk_fraction
    }

    /// Whole shares affordable at the given risk per share.
    ///
    /// Rounds down; a result of zero shares is a `SizingRejected` outcome.
    pub fn quantity(&self, risk_per_share: Decimal) -> Result<u64, RiskError> {
        let max_risk = self.max_risk();
        if risk_per_share <= Decimal::ZERO {
            return Err(RiskError::SizingRejected {
                risk_per_share,
                max_risk,
            });
        }

        let shares = (max_risk / risk_per_share).floor().to_u64().unwrap_or(0);
        if shares == 0 {
            return Err(RiskError::SizingRejected {
                risk_per_share,
                max_risk,
            });
        }
        Ok(shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_based_quantity() {
        let sizer = PositionSizer::new(dec!(10000), dec!(0.01), DEFAULT_RISK_CEILING).unwrap();

        assert_eq!(sizer.max_risk(), dec!(100));
        assert_eq!(sizer.quantity(dec!(2)).unwrap(), 50);
        // floor, never round up
        assert_eq!(sizer.quantity(dec!(3)).unwrap(), 33);
    }

    #[test]
    fn test_too_small_rejected() {
        let sizer = PositionSizer::new(dec!(1000), dec!(0.01), DEFAULT_RISK_CEILING).unwrap();

        let err = sizer.quantity(dec!(25)).unwrap_err();
        assert_eq!(
            err,
            RiskError::SizingRejected {
                risk_per_share: dec!(25),
                max_risk: dec!(10)
            }
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            PositionSizer::new(dec!(0), dec!(0.01), DEFAULT_RISK_CEILING),
            Err(RiskError::InvalidCapital(_))
        ));
        assert!(matches!(
            PositionSizer::new(dec!(10000), dec!(0.05), DEFAULT_RISK_CEILING),
            Err(RiskError::InvalidRiskFraction { .. })
        ));
        assert!(PositionSizer::new(dec!(10000), dec!(0.03), DEFAULT_RISK_CEILING).is_ok());
    }
}
