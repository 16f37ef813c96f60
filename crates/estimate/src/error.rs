//! Error types for the argus-estimate crate.

/// Error type for all fallible operations in the argus-estimate crate.
///
/// Covers input validation failures and numerical problems that may occur
/// while estimating a location vector and scatter matrix.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EstimateError {
    /// Returned when the baseline matrix has no rows or no columns.
    #[error("baseline matrix is empty")]
    EmptyData,

    /// Returned when the baseline matrix has too few rows for its width.
    #[error("too few baseline rows: got {rows} rows for {cols} columns, need rows > columns")]
    TooFewRows {
        /// Number of rows provided.
        rows: usize,
        /// Number of columns provided.
        cols: usize,
    },

    /// Returned when the baseline matrix contains non-finite values (NaN or infinity).
    #[error("baseline matrix contains non-finite values")]
    NonFiniteData,

    /// Returned when an estimated scatter matrix is not positive definite.
    #[error("estimated covariance matrix is singular (dimension {p})")]
    SingularCovariance {
        /// Dimension of the scatter matrix.
        p: usize,
    },

    /// Returned when a selector string does not name a known option.
    #[error("unrecognized configuration value: {value:?}")]
    InvalidConfiguration {
        /// The selector string that failed to parse.
        value: String,
    },

    /// Returned when the configured MCD subset size is out of range.
    #[error("invalid MCD subset size {subset_size}: must be in ({cols}, {rows}]")]
    InvalidSubsetSize {
        /// The configured subset size.
        subset_size: usize,
        /// Number of baseline rows.
        rows: usize,
        /// Number of baseline columns.
        cols: usize,
    },

    /// Returned when an internal distribution computation fails.
    #[error("estimation failed: {0}")]
    EstimationFailed(String),
}
