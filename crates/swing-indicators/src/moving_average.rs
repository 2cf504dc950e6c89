//! Moving average indicators.

use swing_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values, aligned to the
/// index of the last value in the window.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result[self.period - 1] = Some(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result[i] = Some(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 5);
        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert!((result[2].unwrap() - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[3].unwrap() - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[4].unwrap() - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let result = sma.calculate(&[1.0, 2.0, 3.0]);

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(Option::is_none));
    }

    #[test]
    fn test_sma_first_defined_index() {
        let sma = Sma::new(20);
        let data: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let result = sma.calculate(&data);

        assert!(result[18].is_none());
        // mean of 100..=119
        assert!((result[19].unwrap() - 109.5).abs() < 1e-10);
    }
}
