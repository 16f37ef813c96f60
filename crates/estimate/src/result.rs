//! Estimated baseline parameters.

use ndarray::{Array1, Array2};

use crate::cholesky::Cholesky;
use crate::config::Method;
use crate::error::EstimateError;

/// Location vector and scatter matrix estimated from a baseline sample.
///
/// Produced once per analysis run by [`crate::estimate`] and consumed
/// read-only by the chart engines. For robust fits the reweighting support
/// and the raw subset objective are carried along as diagnostics.
#[derive(Debug, Clone)]
pub struct Estimate {
    mean: Array1<f64>,
    cov: Array2<f64>,
    method: Method,
    /// Rows with weight 1 in the MCD reweighting step (robust fits only).
    support: Option<Vec<usize>>,
    /// `ln det` of the best raw h-subset scatter (robust fits only).
    raw_objective: Option<f64>,
}

impl Estimate {
    /// Creates a classical estimate (crate-internal constructor).
    pub(crate) fn classical(mean: Array1<f64>, cov: Array2<f64>) -> Self {
        Self {
            mean,
            cov,
            method: Method::Classical,
            support: None,
            raw_objective: None,
        }
    }

    /// Creates a robust estimate (crate-internal constructor).
    pub(crate) fn robust(
        mean: Array1<f64>,
        cov: Array2<f64>,
        support: Vec<usize>,
        raw_objective: f64,
    ) -> Self {
        Self {
            mean,
            cov,
            method: Method::Robust,
            support: Some(support),
            raw_objective: Some(raw_objective),
        }
    }

    /// Returns the estimated location vector (length p).
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Returns the estimated scatter matrix (p x p, symmetric).
    pub fn cov(&self) -> &Array2<f64> {
        &self.cov
    }

    /// Returns the method that produced this estimate.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the dimension p.
    pub fn p(&self) -> usize {
        self.mean.len()
    }

    /// Returns the MCD reweighting support, if this is a robust estimate.
    pub fn support(&self) -> Option<&[usize]> {
        self.support.as_deref()
    }

    /// Returns the raw MCD subset objective, if this is a robust estimate.
    pub fn raw_objective(&self) -> Option<f64> {
        self.raw_objective
    }

    /// Factorizes the scatter matrix for quadratic-form evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::SingularCovariance`] if the scatter matrix
    /// is not positive definite.
    pub fn cholesky(&self) -> Result<Cholesky, EstimateError> {
        Cholesky::new(self.cov.view())
            .ok_or(EstimateError::SingularCovariance { p: self.p() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn classical_accessors() {
        let est = Estimate::classical(arr1(&[1.0, 2.0]), Array2::eye(2));
        assert_eq!(est.method(), Method::Classical);
        assert_eq!(est.p(), 2);
        assert_eq!(est.support(), None);
        assert_eq!(est.raw_objective(), None);
        assert!(est.cholesky().is_ok());
    }

    #[test]
    fn robust_accessors() {
        let est = Estimate::robust(arr1(&[0.0]), arr2(&[[2.0]]), vec![0, 1, 3], -0.5);
        assert_eq!(est.method(), Method::Robust);
        assert_eq!(est.support(), Some(&[0, 1, 3][..]));
        assert_eq!(est.raw_objective(), Some(-0.5));
    }

    #[test]
    fn singular_cov_fails_factorization() {
        let est = Estimate::classical(arr1(&[0.0, 0.0]), arr2(&[[1.0, 1.0], [1.0, 1.0]]));
        assert!(matches!(
            est.cholesky(),
            Err(EstimateError::SingularCovariance { .. })
        ));
    }

    #[test]
    fn estimate_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Estimate>();
    }
}
