//! Error types for the argus-mewma crate.

use argus_estimate::EstimateError;

/// Error type for all fallible operations in the argus-mewma crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MewmaError {
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

    /// Returned when the smoothing parameter is outside (0, 1].
    #[error("smoothing parameter {lambda} is outside (0, 1]")]
    InvalidSmoothing {
        /// The rejected smoothing parameter.
        lambda: f64,
    },

    /// Returned when the target in-control ARL is not greater than 1.
    #[error("in-control ARL {arl} must be greater than 1")]
    InvalidInControlArl {
        /// The rejected ARL.
        arl: f64,
    },

    /// Returned when the control limit is requested for dimension zero.
    #[error("control limit undefined for dimension 0")]
    InvalidDimension,

    /// Returned when the smoothed covariance matrix is not invertible.
    #[error("covariance matrix is singular (dimension {p})")]
    SingularCovariance {
        /// Dimension of the covariance matrix.
        p: usize,
    },

    /// Returned when baseline parameter estimation fails.
    #[error("baseline estimation failed: {0}")]
    Estimation(#[from] EstimateError),

    /// Returned when control-limit computation fails numerically.
    #[error("control-limit computation failed: {0}")]
    LimitFailed(String),
}
