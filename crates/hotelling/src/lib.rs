//! Hotelling T-squared control chart for multivariate monitoring.
//!
//! The chart estimates a mean vector and covariance matrix from an
//! in-control baseline sample, scores every observation by its squared
//! Mahalanobis distance to that estimate, and flags monitoring observations
//! whose distance exceeds a control limit derived from the baseline.
//!
//! # Quick start
//!
//! ```
//! use argus_hotelling::{monitor, T2Config};
//! use ndarray::arr2;
//!
//! let baseline = arr2(&[
//!     [0.1, -0.2],
//!     [-0.3, 0.4],
//!     [0.5, 0.1],
//!     [-0.1, -0.4],
//!     [0.2, 0.3],
//!     [-0.4, 0.2],
//! ]);
//! let monitoring = arr2(&[[0.0, 0.1], [6.0, 6.0]]);
//!
//! let result = monitor(baseline.view(), monitoring.view(), &T2Config::new()).unwrap();
//! assert_eq!(result.monitoring_statistics().len(), 2);
//! assert_eq!(result.exceedances().len(), 2);
//! ```
//!
//! # Architecture
//!
//! ```text
//! monitor()
//!   ├─ validate shapes
//!   ├─ argus_estimate::estimate()     (baseline mean/covariance)
//!   ├─ squared Mahalanobis distances  (train + monitoring rows)
//!   ├─ f_limit() | kde_quantile()     (threshold.rs, density.rs)
//!   └─ exceedance flags
//! ```

pub mod config;
pub mod error;
pub mod result;
pub mod threshold;

pub(crate) mod density;

pub use config::{AlarmTarget, T2Config, ThresholdRule};
pub use error::T2Error;
pub use result::T2Result;
pub use threshold::f_limit;

use argus_estimate::{estimate, Cholesky, EstimateError};
use ndarray::{Array1, ArrayView2};
use tracing::debug;

/// Runs a T-squared monitoring analysis.
///
/// Estimates baseline parameters from `train`, scores every row of both
/// matrices, derives the control limit according to the configured rule and
/// alarm target, and flags each monitoring observation.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`T2Error::EmptyData`] | either matrix has no rows or columns |
/// | [`T2Error::DimensionMismatch`] | differing column counts |
/// | [`T2Error::NonFiniteData`] | NaN/infinity in the monitoring matrix |
/// | [`T2Error::Estimation`] | baseline estimation failure |
/// | [`T2Error::SingularCovariance`] | covariance not invertible |
/// | [`T2Error::InvalidFalseAlarmRate`], [`T2Error::InvalidInControlArl`] | bad alarm target |
#[tracing::instrument(skip(train, test, config))]
pub fn monitor(
    train: ArrayView2<f64>,
    test: ArrayView2<f64>,
    config: &T2Config,
) -> Result<T2Result, T2Error> {
    config.validate()?;
    validate_shapes(train, test)?;

    let fit = estimate(train, config.estimator()).map_err(singular_to_t2)?;
    let chol = fit.cholesky().map_err(singular_to_t2)?;

    let train_statistics = squared_distances(train, fit.mean(), &chol);
    let monitoring_statistics = squared_distances(test, fit.mean(), &chol);

    let prob = config.alarm().exceedance_probability();
    let threshold = match config.threshold_rule() {
        ThresholdRule::Parametric => f_limit(train.ncols(), train.nrows(), prob)?,
        ThresholdRule::Nonparametric => density::kde_quantile(&train_statistics, prob)?,
    };

    debug!(
        rule = ?config.threshold_rule(),
        prob,
        threshold,
        "resolved T-squared control limit"
    );

    let exceedances: Vec<bool> = monitoring_statistics.iter().map(|&s| s > threshold).collect();

    Ok(T2Result::new(
        train_statistics,
        monitoring_statistics,
        threshold,
        exceedances,
    ))
}

/// Checks both matrices are non-empty, width-aligned, and that the
/// monitoring matrix is finite (the baseline is checked by the estimator).
fn validate_shapes(train: ArrayView2<f64>, test: ArrayView2<f64>) -> Result<(), T2Error> {
    if train.nrows() == 0 || train.ncols() == 0 {
        return Err(T2Error::EmptyData { which: "baseline" });
    }
    if test.nrows() == 0 || test.ncols() == 0 {
        return Err(T2Error::EmptyData {
            which: "monitoring",
        });
    }
    if train.ncols() != test.ncols() {
        return Err(T2Error::DimensionMismatch {
            train_cols: train.ncols(),
            test_cols: test.ncols(),
        });
    }
    if test.iter().any(|v| !v.is_finite()) {
        return Err(T2Error::NonFiniteData);
    }
    Ok(())
}

/// Squared Mahalanobis distance of every row to `(mean, chol)`.
fn squared_distances(data: ArrayView2<f64>, mean: &Array1<f64>, chol: &Cholesky) -> Vec<f64> {
    data.rows()
        .into_iter()
        .map(|row| {
            let diff = &row.to_owned() - mean;
            chol.quadratic_form(diff.view())
        })
        .collect()
}

/// Maps the estimator's singular-covariance failure onto this crate's
/// variant; other estimation errors pass through wrapped.
fn singular_to_t2(err: EstimateError) -> T2Error {
    match err {
        EstimateError::SingularCovariance { p } => T2Error::SingularCovariance { p },
        other => T2Error::Estimation(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2};

    fn baseline() -> Array2<f64> {
        arr2(&[
            [0.1, -0.2],
            [-0.3, 0.4],
            [0.5, 0.1],
            [-0.1, -0.4],
            [0.2, 0.3],
            [-0.4, 0.2],
            [0.3, -0.1],
            [-0.2, -0.3],
        ])
    }

    #[test]
    fn flags_align_with_statistics() {
        let test = arr2(&[[0.0, 0.0], [5.0, 5.0], [0.1, 0.2]]);
        let result = monitor(baseline().view(), test.view(), &T2Config::new()).unwrap();

        assert_eq!(result.monitoring_statistics().len(), 3);
        assert_eq!(result.exceedances().len(), 3);
        for (s, &e) in result
            .monitoring_statistics()
            .iter()
            .zip(result.exceedances())
        {
            assert_eq!(e, *s > result.threshold());
        }
    }

    #[test]
    fn statistics_are_non_negative() {
        let test = arr2(&[[1.0, -1.0], [-2.0, 2.0]]);
        let result = monitor(baseline().view(), test.view(), &T2Config::new()).unwrap();
        for &s in result
            .train_statistics()
            .iter()
            .chain(result.monitoring_statistics())
        {
            assert!(s >= 0.0, "T-squared value {s} must be non-negative");
        }
    }

    #[test]
    fn dimension_mismatch_rejected() {
        let test = arr2(&[[1.0, 2.0, 3.0]]);
        let result = monitor(baseline().view(), test.view(), &T2Config::new());
        assert!(matches!(
            result,
            Err(T2Error::DimensionMismatch {
                train_cols: 2,
                test_cols: 3
            })
        ));
    }

    #[test]
    fn empty_monitoring_rejected() {
        let test = Array2::<f64>::zeros((0, 2));
        let result = monitor(baseline().view(), test.view(), &T2Config::new());
        assert!(matches!(
            result,
            Err(T2Error::EmptyData { which: "monitoring" })
        ));
    }

    #[test]
    fn non_finite_monitoring_rejected() {
        let test = arr2(&[[1.0, f64::INFINITY]]);
        let result = monitor(baseline().view(), test.view(), &T2Config::new());
        assert!(matches!(result, Err(T2Error::NonFiniteData)));
    }

    #[test]
    fn singular_baseline_covariance_rejected() {
        // Second feature is an exact copy of the first.
        let train = arr2(&[
            [1.0, 1.0],
            [2.0, 2.0],
            [3.0, 3.0],
            [4.0, 4.0],
        ]);
        let test = arr2(&[[1.0, 1.0]]);
        let result = monitor(train.view(), test.view(), &T2Config::new());
        assert!(matches!(
            result,
            Err(T2Error::SingularCovariance { p: 2 })
        ));
    }
}
