//! Configuration of the saliency metric accumulator.

use burn::config::Config;

use crate::{
    accumulator::SaliencyAccumulator,
    error::{MetricError, MetricResult},
};

/// Configuration for [`SaliencyAccumulator`].
#[derive(Config, Debug, PartialEq)]
pub struct MetricConfig {
    /// Number of decision thresholds swept for the precision/recall curve.
    #[config(default = 256)]
    pub thresholds: usize,
    /// Squared beta of the F-measure. Values below 1 favour precision.
    #[config(default = 0.3)]
    pub beta_sq: f64,
    /// Smoothing term added to both sides of the precision and recall ratios.
    #[config(default = 1e-4)]
    pub epsilon: f64,
    /// Weight of the object term in the S-measure; the region term gets `1 - alpha`.
    #[config(default = 0.5)]
    pub alpha: f64,
}

impl MetricConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::InvalidConfiguration`] if any parameter is out of range.
    pub fn validate(&self) -> MetricResult<()> {
        if self.thresholds == 0 {
            return Err(MetricError::InvalidConfiguration {
                reason: "at least one threshold is required".to_owned(),
            });
        }
        if !(self.beta_sq.is_finite() && self.beta_sq > 0.0) {
            return Err(MetricError::InvalidConfiguration {
                reason: format!("beta_sq must be positive, got {}", self.beta_sq),
            });
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(MetricError::InvalidConfiguration {
                reason: format!("epsilon must be positive, got {}", self.epsilon),
            });
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(MetricError::InvalidConfiguration {
                reason: format!("alpha must lie in [0, 1], got {}", self.alpha),
            });
        }
        Ok(())
    }

    /// Validates the configuration and creates an empty accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::InvalidConfiguration`] if validation fails.
    pub fn init(&self) -> MetricResult<SaliencyAccumulator> {
        self.validate()?;
        Ok(SaliencyAccumulator::new(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_evaluation() {
        let config = MetricConfig::new();
        assert_eq!(config.thresholds, 256);
        assert_eq!(config.beta_sq, 0.3);
        assert_eq!(config.epsilon, 1e-4);
        assert_eq!(config.alpha, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_thresholds_rejected() {
        let config = MetricConfig::new().with_thresholds(0);
        match config.validate() {
            Err(MetricError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("threshold"));
            }
            other => panic!("Expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_parameters_rejected() {
        assert!(MetricConfig::new().with_beta_sq(0.0).validate().is_err());
        assert!(MetricConfig::new().with_epsilon(-1.0).validate().is_err());
        assert!(MetricConfig::new().with_alpha(1.5).validate().is_err());
        assert!(MetricConfig::new().with_alpha(f64::NAN).validate().is_err());
    }

    #[test]
    fn init_builds_empty_accumulator() {
        let accumulator = MetricConfig::new().with_thresholds(8).init().unwrap();
        assert!(accumulator.is_empty());
        assert_eq!(accumulator.precision_sum().len(), 8);
        assert_eq!(accumulator.recall_sum().len(), 8);
    }
}
