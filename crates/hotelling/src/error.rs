//! Error types for the argus-hotelling crate.

use argus_estimate::EstimateError;

/// Error type for all fallible operations in the argus-hotelling crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum T2Error {
    /// Returned when baseline and monitoring matrices disagree on width.
    #[error("column count mismatch: baseline has {train_cols} columns, monitoring has {test_cols}")]
    DimensionMismatch {
        /// Baseline column count.
        train_cols: usize,
        /// Monitoring column count.
        test_cols: usize,
    },

    /// Returned when either input matrix has no rows or no columns.
    #[error("{which} matrix is empty")]
    EmptyData {
        /// Which matrix was empty (`"baseline"` or `"monitoring"`).
        which: &'static str,
    },

    /// Returned when the monitoring matrix contains non-finite values.
    #[error("monitoring matrix contains non-finite values")]
    NonFiniteData,

    /// Returned when a selector string does not name a known option.
    #[error("unrecognized configuration value: {value:?}")]
    InvalidConfiguration {
        /// The selector string that failed to parse.
        value: String,
    },

    /// Returned when the target false-alarm rate is outside (0, 1).
    #[error("false-alarm rate {far} is outside (0, 1)")]
    InvalidFalseAlarmRate {
        /// The rejected false-alarm rate.
        far: f64,
    },

    /// Returned when the target in-control ARL is not greater than 1.
    #[error("in-control ARL {arl} must be greater than 1")]
    InvalidInControlArl {
        /// The rejected ARL.
        arl: f64,
    },

    /// Returned when the F-quantile limit is requested with `n <= p`.
    #[error("F-quantile limit undefined for p = {p}, n = {n}: need n > p")]
    InvalidDegreesOfFreedom {
        /// Feature dimension.
        p: usize,
        /// Baseline sample size.
        n: usize,
    },

    /// Returned when the estimated covariance matrix is not invertible.
    #[error("covariance matrix is singular (dimension {p})")]
    SingularCovariance {
        /// Dimension of the covariance matrix.
        p: usize,
    },

    /// Returned when baseline parameter estimation fails.
    #[error("baseline estimation failed: {0}")]
    Estimation(#[from] EstimateError),

    /// Returned when threshold computation fails numerically.
    #[error("threshold computation failed: {0}")]
    ThresholdFailed(String),
}
