//! Configuration for the MEWMA chart.

use argus_estimate::EstimatorConfig;

use crate::error::MewmaError;

/// Configuration for a MEWMA monitoring run.
///
/// Smaller smoothing parameters give the statistic longer memory and better
/// sensitivity to small sustained shifts; `lambda = 1` removes the memory
/// entirely, collapsing the chart onto per-observation T-squared values.
///
/// # Example
///
/// ```
/// use argus_estimate::Method;
/// use argus_mewma::MewmaConfig;
///
/// let config = MewmaConfig::new()
///     .with_lambda(0.2)
///     .with_ic_arl(500.0)
///     .with_method(Method::Robust);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MewmaConfig {
    /// Baseline estimation configuration.
    estimator: EstimatorConfig,
    /// Smoothing parameter in (0, 1].
    lambda: f64,
    /// Target in-control average run length.
    ic_arl: f64,
}

impl MewmaConfig {
    /// Creates a new `MewmaConfig` with default parameters.
    ///
    /// Defaults: classical estimation, `lambda = 0.1`, `ic_arl = 200`.
    pub fn new() -> Self {
        Self {
            estimator: EstimatorConfig::new(),
            lambda: 0.1,
            ic_arl: 200.0,
        }
    }

    /// Sets the smoothing parameter.
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Sets the target in-control average run length.
    pub fn with_ic_arl(mut self, ic_arl: f64) -> Self {
        self.ic_arl = ic_arl;
        self
    }

    /// Sets the estimation method, keeping the current MCD tuning.
    pub fn with_method(mut self, method: argus_estimate::Method) -> Self {
        self.estimator = self.estimator.with_method(method);
        self
    }

    /// Replaces the full estimator configuration.
    pub fn with_estimator(mut self, estimator: EstimatorConfig) -> Self {
        self.estimator = estimator;
        self
    }

    /// Returns the smoothing parameter.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Returns the target in-control average run length.
    pub fn ic_arl(&self) -> f64 {
        self.ic_arl
    }

    /// Returns the estimator configuration.
    pub fn estimator(&self) -> &EstimatorConfig {
        &self.estimator
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), MewmaError> {
        if !self.lambda.is_finite() || self.lambda <= 0.0 || self.lambda > 1.0 {
            return Err(MewmaError::InvalidSmoothing {
                lambda: self.lambda,
            });
        }
        if !self.ic_arl.is_finite() || self.ic_arl <= 1.0 {
            return Err(MewmaError::InvalidInControlArl { arl: self.ic_arl });
        }
        self.estimator.validate()?;
        Ok(())
    }
}

impl Default for MewmaConfig {
    fn default() -> Self {
        Self::new()
    }
}
