//! The MEWMA recursion and quadratic-form statistic.

use argus_estimate::Cholesky;
use ndarray::{Array1, ArrayView2};

/// Runs the smoothed-deviation recursion over the monitoring rows and
/// scores each state against the asymptotic covariance factor.
///
/// The recursion is `q_t = lambda * x_t + (1 - lambda) * q_{t-1}` with
/// `q_0 = 0`, over rows centered by `mean`; the statistic is the quadratic
/// form `q_t' Sigma_q^-1 q_t` where `chol` factorizes the fixed asymptotic
/// covariance `Sigma_q = lambda / (2 - lambda) * cov`. Expressed as a fold
/// because each state depends on the entire prefix in observation order.
pub(crate) fn smoothed_statistics(
    test: ArrayView2<f64>,
    mean: &Array1<f64>,
    chol: &Cholesky,
    lambda: f64,
) -> Vec<f64> {
    let p = test.ncols();
    let init = (Vec::with_capacity(test.nrows()), Array1::zeros(p));

    let (statistics, _) = test
        .rows()
        .into_iter()
        .fold(init, |(mut acc, q_prev), row| {
            let centered = &row.to_owned() - mean;
            let q = centered * lambda + &q_prev * (1.0 - lambda);
            acc.push(chol.quadratic_form(q.view()));
            (acc, q)
        });

    statistics
}
