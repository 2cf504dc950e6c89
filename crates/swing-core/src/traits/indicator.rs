//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for technical indicators.
///
/// Output is aligned to the input: one entry per data point, `None`
/// while the indicator is warming up or undefined.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically closes or volumes)
    ///
    /// # Returns
    /// A vector the same length as `data`
    fn calculate(&self, data: &[f64]) -> Vec<Option<Self::Output>>;

    /// Get the minimum data points required for the first value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}
