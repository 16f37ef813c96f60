//! Multivariate EWMA control chart.
//!
//! The MEWMA chart (Lowry, Woodall, Champ & Rigdon 1992) smooths centered
//! monitoring observations through the recursion
//!
//! ```text
//! q_t = lambda * x_t + (1 - lambda) * q_{t-1},    q_0 = 0
//! ```
//!
//! and scores each state with the quadratic form `q_t' Sigma_q^-1 q_t`,
//! where `Sigma_q = lambda / (2 - lambda) * cov` is the recursion's fixed
//! asymptotic covariance. The geometric memory makes the chart far more
//! sensitive to small sustained shifts than per-observation T-squared
//! scoring; the price is a calibrated control limit (see [`control_limit`]).
//!
//! The asymptotic covariance is used at every time step, matching the
//! standard control-limit calibration; the exact time-varying covariance
//! `(1 - (1-lambda)^(2t))` variant pairs with a different calibration and
//! is deliberately not offered.
//!
//! # Quick start
//!
//! ```
//! use argus_mewma::{monitor, MewmaConfig};
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
//! let monitoring = arr2(&[[0.0, 0.1], [4.0, 4.0], [4.0, 4.0]]);
//!
//! let config = MewmaConfig::new().with_lambda(0.2);
//! let result = monitor(baseline.view(), monitoring.view(), &config).unwrap();
//! assert_eq!(result.exceedances().len(), 3);
//! ```
//!
//! # Architecture
//!
//! ```text
//! monitor()
//!   ├─ validate shapes and config
//!   ├─ argus_estimate::estimate()   (baseline mean/covariance)
//!   ├─ smoothed_statistics()        (chart.rs, sequential fold)
//!   ├─ control_limit()              (limit.rs, calibrated table)
//!   └─ exceedance flags
//! ```

pub mod config;
pub mod error;
pub mod limit;
pub mod result;

pub(crate) mod chart;

pub use config::MewmaConfig;
pub use error::MewmaError;
pub use limit::control_limit;
pub use result::MewmaResult;

use argus_estimate::{estimate, Cholesky, EstimateError};
use ndarray::ArrayView2;
use tracing::debug;

/// Runs a MEWMA monitoring analysis.
///
/// Estimates baseline parameters from `train`, folds the smoothed-deviation
/// recursion over `test` in observation order, and flags each observation
/// against the calibrated control limit for the configured
/// `(lambda, ic_arl, p)` triple.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`MewmaError::EmptyData`] | either matrix has no rows or columns |
/// | [`MewmaError::DimensionMismatch`] | differing column counts |
/// | [`MewmaError::NonFiniteData`] | NaN/infinity in the monitoring matrix |
/// | [`MewmaError::InvalidSmoothing`], [`MewmaError::InvalidInControlArl`] | bad config |
/// | [`MewmaError::Estimation`] | baseline estimation failure |
/// | [`MewmaError::SingularCovariance`] | covariance not invertible |
#[tracing::instrument(skip(train, test, config))]
pub fn monitor(
    train: ArrayView2<f64>,
    test: ArrayView2<f64>,
    config: &MewmaConfig,
) -> Result<MewmaResult, MewmaError> {
    config.validate()?;
    validate_shapes(train, test)?;

    let fit = estimate(train, config.estimator()).map_err(singular_to_mewma)?;

    let lambda = config.lambda();
    let sigma_q = fit.cov() * (lambda / (2.0 - lambda));
    let chol = Cholesky::new(sigma_q.view()).ok_or(MewmaError::SingularCovariance {
        p: fit.p(),
    })?;

    let monitoring_statistics = chart::smoothed_statistics(test, fit.mean(), &chol, lambda);
    let threshold = control_limit(lambda, config.ic_arl(), fit.p())?;

    debug!(
        lambda,
        ic_arl = config.ic_arl(),
        p = fit.p(),
        threshold,
        "resolved MEWMA control limit"
    );

    let exceedances: Vec<bool> = monitoring_statistics.iter().map(|&s| s > threshold).collect();

    Ok(MewmaResult::new(
        monitoring_statistics,
        threshold,
        exceedances,
        lambda,
        config.ic_arl(),
    ))
}

/// Checks both matrices are non-empty, width-aligned, and that the
/// monitoring matrix is finite (the baseline is checked by the estimator).
fn validate_shapes(train: ArrayView2<f64>, test: ArrayView2<f64>) -> Result<(), MewmaError> {
    if train.nrows() == 0 || train.ncols() == 0 {
        return Err(MewmaError::EmptyData { which: "baseline" });
    }
    if test.nrows() == 0 || test.ncols() == 0 {
        return Err(MewmaError::EmptyData {
            which: "monitoring",
        });
    }
    if train.ncols() != test.ncols() {
        return Err(MewmaError::DimensionMismatch {
            train_cols: train.ncols(),
            test_cols: test.ncols(),
        });
    }
    if test.iter().any(|v| !v.is_finite()) {
        return Err(MewmaError::NonFiniteData);
    }
    Ok(())
}

/// Maps the estimator's singular-covariance failure onto this crate's
/// variant; other estimation errors pass through wrapped.
fn singular_to_mewma(err: EstimateError) -> MewmaError {
    match err {
        EstimateError::SingularCovariance { p } => MewmaError::SingularCovariance { p },
        other => MewmaError::Estimation(other),
    }
}
