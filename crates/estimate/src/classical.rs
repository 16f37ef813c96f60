//! Classical sample mean and covariance estimation.

use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Computes column means and the unbiased sample covariance (N-1 denominator).
///
/// Callers guarantee `data` has at least two rows and one column; validation
/// happens upstream in [`crate::estimate`].
pub(crate) fn mean_and_covariance(data: ArrayView2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = data.nrows();
    let p = data.ncols();

    let mean = data
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(p));

    let mut cov: Array2<f64> = Array2::zeros((p, p));
    for row in data.rows() {
        for i in 0..p {
            let di = row[i] - mean[i];
            for j in i..p {
                cov[[i, j]] += di * (row[j] - mean[j]);
            }
        }
    }
    let denom = (n - 1) as f64;
    for i in 0..p {
        for j in i..p {
            let v = cov[[i, j]] / denom;
            cov[[i, j]] = v;
            cov[[j, i]] = v;
        }
    }

    (mean, cov)
}
