//! Baseline location and scatter estimation for multivariate monitoring.
//!
//! Control charts compare new observations against a mean vector and
//! covariance matrix estimated from an in-control baseline sample. This
//! crate provides that estimation step with two methods:
//!
//! | Method | Estimator | Use case |
//! |--------|-----------|----------|
//! | Classical | Column means, N-1 sample covariance | Clean baseline |
//! | Robust | Reweighted FastMCD (Rousseeuw & Van Driessen 1999) | Contaminated baseline |
//!
//! # Quick start
//!
//! ```
//! use argus_estimate::{estimate, EstimatorConfig, Method};
//! use ndarray::arr2;
//!
//! let baseline = arr2(&[
//!     [1.0, 2.0],
//!     [2.0, 3.5],
//!     [0.5, 1.8],
//!     [1.5, 2.7],
//! ]);
//! let config = EstimatorConfig::new().with_method(Method::Classical);
//! let fit = estimate(baseline.view(), &config).unwrap();
//! assert_eq!(fit.mean().len(), 2);
//! assert_eq!(fit.cov().shape(), &[2, 2]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! estimate()
//!   ├─ validate shape and finiteness
//!   ├─ mean_and_covariance()   (classical.rs)
//!   └─ mcd_estimate()          (mcd.rs, robust only)
//! ```
//!
//! The [`Cholesky`] factor used for Mahalanobis quadratic forms is exported
//! so chart engines can evaluate distances without re-deriving it.

pub mod cholesky;
pub mod config;
pub mod error;
pub mod result;

pub(crate) mod classical;
pub(crate) mod mcd;

pub use cholesky::Cholesky;
pub use config::{EstimatorConfig, McdConfig, Method};
pub use error::EstimateError;
pub use result::Estimate;

use ndarray::ArrayView2;
use tracing::debug;

/// Estimates the baseline location vector and scatter matrix.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`EstimateError::EmptyData`] | zero rows or zero columns |
/// | [`EstimateError::TooFewRows`] | `n <= p` |
/// | [`EstimateError::NonFiniteData`] | NaN or infinity in the baseline |
/// | [`EstimateError::SingularCovariance`] | degenerate scatter |
/// | [`EstimateError::InvalidSubsetSize`] | MCD subset size out of range |
pub fn estimate(
    data: ArrayView2<f64>,
    config: &EstimatorConfig,
) -> Result<Estimate, EstimateError> {
    config.validate()?;

    let n = data.nrows();
    let p = data.ncols();
    if n == 0 || p == 0 {
        return Err(EstimateError::EmptyData);
    }
    if n <= p {
        return Err(EstimateError::TooFewRows { rows: n, cols: p });
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(EstimateError::NonFiniteData);
    }

    debug!(n, p, method = ?config.method(), "estimating baseline parameters");

    match config.method() {
        Method::Classical => {
            let (mean, cov) = classical::mean_and_covariance(data);
            Ok(Estimate::classical(mean, cov))
        }
        Method::Robust => {
            let fit = mcd::mcd_estimate(data, config.mcd())?;
            Ok(Estimate::robust(
                fit.mean,
                fit.cov,
                fit.support,
                fit.raw_objective,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2};

    #[test]
    fn empty_rows_rejected() {
        let data = Array2::<f64>::zeros((0, 3));
        let result = estimate(data.view(), &EstimatorConfig::new());
        assert!(matches!(result, Err(EstimateError::EmptyData)));
    }

    #[test]
    fn empty_columns_rejected() {
        let data = Array2::<f64>::zeros((5, 0));
        let result = estimate(data.view(), &EstimatorConfig::new());
        assert!(matches!(result, Err(EstimateError::EmptyData)));
    }

    #[test]
    fn too_few_rows_rejected() {
        let data = Array2::<f64>::zeros((3, 3));
        let result = estimate(data.view(), &EstimatorConfig::new());
        assert!(matches!(
            result,
            Err(EstimateError::TooFewRows { rows: 3, cols: 3 })
        ));
    }

    #[test]
    fn non_finite_rejected() {
        let data = arr2(&[[1.0, 2.0], [f64::NAN, 0.5], [0.3, 1.1]]);
        let result = estimate(data.view(), &EstimatorConfig::new());
        assert!(matches!(result, Err(EstimateError::NonFiniteData)));
    }

    #[test]
    fn classical_smoke() {
        let data = arr2(&[[1.0, 2.0], [2.0, 4.0], [3.0, 6.5], [4.0, 7.5]]);
        let fit = estimate(data.view(), &EstimatorConfig::new()).unwrap();
        assert_eq!(fit.method(), Method::Classical);
        assert_eq!(fit.p(), 2);
        assert!(fit.support().is_none());
    }

    #[test]
    fn robust_smoke() {
        let data = arr2(&[
            [0.1, 0.2],
            [-0.3, 0.4],
            [0.5, -0.2],
            [-0.1, -0.4],
            [0.2, 0.3],
            [0.4, -0.1],
            [-0.5, 0.1],
            [0.0, -0.3],
            [0.3, 0.5],
            [-0.2, 0.0],
        ]);
        let config = EstimatorConfig::new().with_method(Method::Robust);
        let fit = estimate(data.view(), &config).unwrap();
        assert_eq!(fit.method(), Method::Robust);
        assert!(fit.support().is_some());
        assert!(fit.raw_objective().is_some());
    }
}
