//! Momentum indicators.

use swing_core::traits::Indicator;

/// Relative Strength Index (RSI).
///
/// Uses simple rolling means of gains and losses rather than Wilder's
/// exponential smoothing. The first value appears once `period` price
/// changes exist, i.e. at index `period`.
///
/// Zero-denominator policy: when the average loss is zero the RSI is 100
/// if the average gain is positive and undefined (`None`) when both are
/// zero. No infinities are produced.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// The screener uses 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// RSI from one window's average gain and loss.
    #[inline]
    pub fn from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
        if avg_loss == 0.0 {
            if avg_gain > 0.0 {
                Some(100.0)
            } else {
                None
            }
        } else {
            let rs = avg_gain / avg_loss;
            Some(100.0 - 100.0 / (1.0 + rs))
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if data.len() <= self.period {
            return result;
        }

        // Price changes; index i holds the move from data[i] to data[i + 1]
        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for pair in data.windows(2) {
            let change = pair[1] - pair[0];
            gains.push(change.max(0.0));
            losses.push((-change).max(0.0));
        }

        let period_f64 = self.period as f64;

        // Sum each window directly so an all-zero window stays exactly zero.
        for (offset, (gain_window, loss_window)) in gains
            .windows(self.period)
            .zip(losses.windows(self.period))
            .enumerate()
        {
            let avg_gain = gain_window.iter().sum::<f64>() / period_f64;
            let avg_loss = loss_window.iter().sum::<f64>() / period_f64;
            result[offset + self.period] = Self::from_averages(avg_gain, avg_loss);
        }

        result
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}
