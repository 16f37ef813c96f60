//! Configuration for location/scatter estimation.

use std::str::FromStr;

use crate::error::EstimateError;

/// Estimation method for the baseline location vector and scatter matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    /// Arithmetic column means and unbiased sample covariance (N-1 denominator).
    #[default]
    Classical,
    /// Reweighted minimum-covariance-determinant location and scatter
    /// (FastMCD, Rousseeuw & Van Driessen 1999). Resistant to contamination.
    Robust,
}

impl FromStr for Method {
    type Err = EstimateError;

    /// Parses a method selector. Accepts `"classical"` and `"robust"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classical" => Ok(Method::Classical),
            "robust" => Ok(Method::Robust),
            other => Err(EstimateError::InvalidConfiguration {
                value: other.to_string(),
            }),
        }
    }
}

/// Tuning parameters for the FastMCD search.
///
/// The defaults follow the Rousseeuw & Van Driessen (1999) recommendations:
/// 500 random starts, each concentrated for two steps, with the 10 best
/// candidates iterated to convergence. The random subset draws are driven by
/// an explicit seed so a given baseline always produces the same estimate.
///
/// # Example
///
/// ```
/// use argus_estimate::McdConfig;
///
/// let config = McdConfig::new().with_n_starts(200).with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct McdConfig {
    /// Subset size h. `None` means the default `(n + p + 1) / 2`.
    subset_size: Option<usize>,
    /// Number of random starting subsets.
    n_starts: usize,
    /// Number of best candidates iterated to convergence.
    n_best: usize,
    /// Cap on concentration steps per candidate.
    max_csteps: usize,
    /// Seed for the subset draws.
    seed: u64,
}

impl McdConfig {
    /// Creates a new `McdConfig` with default parameters.
    ///
    /// Defaults: `subset_size = None` (meaning `(n + p + 1) / 2`),
    /// `n_starts = 500`, `n_best = 10`, `max_csteps = 100`, `seed = 42`.
    pub fn new() -> Self {
        Self {
            subset_size: None,
            n_starts: 500,
            n_best: 10,
            max_csteps: 100,
            seed: 42,
        }
    }

    /// Sets an explicit subset size h.
    pub fn with_subset_size(mut self, subset_size: usize) -> Self {
        self.subset_size = Some(subset_size);
        self
    }

    /// Sets the number of random starting subsets.
    pub fn with_n_starts(mut self, n_starts: usize) -> Self {
        self.n_starts = n_starts;
        self
    }

    /// Sets the number of candidates iterated to convergence.
    pub fn with_n_best(mut self, n_best: usize) -> Self {
        self.n_best = n_best;
        self
    }

    /// Sets the concentration step cap.
    pub fn with_max_csteps(mut self, max_csteps: usize) -> Self {
        self.max_csteps = max_csteps;
        self
    }

    /// Sets the seed for the random subset draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured subset size, if any.
    pub fn subset_size(&self) -> Option<usize> {
        self.subset_size
    }

    /// Returns the number of random starting subsets.
    pub fn n_starts(&self) -> usize {
        self.n_starts
    }

    /// Returns the number of candidates iterated to convergence.
    pub fn n_best(&self) -> usize {
        self.n_best
    }

    /// Returns the concentration step cap.
    pub fn max_csteps(&self) -> usize {
        self.max_csteps
    }

    /// Returns the subset draw seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), EstimateError> {
        if self.n_starts < 1 {
            return Err(EstimateError::InvalidConfiguration {
                value: format!("n_starts = {}", self.n_starts),
            });
        }
        if self.n_best < 1 {
            return Err(EstimateError::InvalidConfiguration {
                value: format!("n_best = {}", self.n_best),
            });
        }
        if self.max_csteps < 1 {
            return Err(EstimateError::InvalidConfiguration {
                value: format!("max_csteps = {}", self.max_csteps),
            });
        }
        Ok(())
    }
}

impl Default for McdConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a baseline estimation run.
///
/// # Example
///
/// ```
/// use argus_estimate::{EstimatorConfig, Method};
///
/// let config = EstimatorConfig::new().with_method(Method::Robust);
/// assert_eq!(config.method(), Method::Robust);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimatorConfig {
    /// Estimation method.
    method: Method,
    /// FastMCD tuning, used when `method` is [`Method::Robust`].
    mcd: McdConfig,
}

impl EstimatorConfig {
    /// Creates a new configuration with the classical method and default
    /// MCD tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the estimation method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the FastMCD tuning parameters.
    pub fn with_mcd(mut self, mcd: McdConfig) -> Self {
        self.mcd = mcd;
        self
    }

    /// Returns the estimation method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the FastMCD tuning parameters.
    pub fn mcd(&self) -> &McdConfig {
        &self.mcd
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), EstimateError> {
        self.mcd.validate()
    }
}
