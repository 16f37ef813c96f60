//! Cholesky factorization for symmetric positive-definite matrices.
//!
//! Chart statistics need `x' S^-1 x` quadratic forms and the MCD search needs
//! scatter determinants. Both come out of one lower-triangular factorization,
//! solved by substitution instead of forming an explicit inverse. Dimensions
//! stay small (the feature count of the monitored process), so a dense
//! textbook factorization over `ndarray` storage is sufficient.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Lower-triangular Cholesky factor `L` of a symmetric positive-definite
/// matrix `S = L * L'`.
#[derive(Debug, Clone)]
pub struct Cholesky {
    lower: Array2<f64>,
}

impl Cholesky {
    /// Factorizes a symmetric matrix.
    ///
    /// Returns `None` if the matrix is not square, contains non-finite
    /// values, or is not positive definite up to a relative pivot tolerance.
    /// Only the lower triangle of the input is read.
    pub fn new(matrix: ArrayView2<f64>) -> Option<Self> {
        let p = matrix.nrows();
        if p == 0 || matrix.ncols() != p {
            return None;
        }

        // Pivot tolerance relative to the largest diagonal entry.
        let mut scale = 0.0_f64;
        for j in 0..p {
            let d = matrix[[j, j]];
            if !d.is_finite() {
                return None;
            }
            scale = scale.max(d.abs());
        }
        let tol = (scale.max(f64::MIN_POSITIVE)) * 1e-12;

        let mut lower: Array2<f64> = Array2::zeros((p, p));
        for j in 0..p {
            let mut diag = matrix[[j, j]];
            for k in 0..j {
                diag -= lower[[j, k]] * lower[[j, k]];
            }
            if !diag.is_finite() || diag <= tol {
                return None;
            }
            let root = diag.sqrt();
            lower[[j, j]] = root;

            for i in (j + 1)..p {
                let mut sum = matrix[[i, j]];
                for k in 0..j {
                    sum -= lower[[i, k]] * lower[[j, k]];
                }
                if !sum.is_finite() {
                    return None;
                }
                lower[[i, j]] = sum / root;
            }
        }

        Some(Self { lower })
    }

    /// Dimension of the factorized matrix.
    pub fn dim(&self) -> usize {
        self.lower.nrows()
    }

    /// Solves `S x = b` by forward then backward substitution.
    ///
    /// # Panics
    ///
    /// Panics if `b` does not match the factor dimension.
    pub fn solve(&self, b: ArrayView1<f64>) -> Array1<f64> {
        let mut y = self.forward_substitute(b);
        let p = self.dim();
        // L' x = y
        for i in (0..p).rev() {
            let mut sum = y[i];
            for k in (i + 1)..p {
                sum -= self.lower[[k, i]] * y[k];
            }
            y[i] = sum / self.lower[[i, i]];
        }
        y
    }

    /// Computes the quadratic form `x' S^-1 x` as `||L^-1 x||^2`.
    ///
    /// Non-negative for any `x` by construction.
    ///
    /// # Panics
    ///
    /// Panics if `x` does not match the factor dimension.
    pub fn quadratic_form(&self, x: ArrayView1<f64>) -> f64 {
        let y = self.forward_substitute(x);
        y.iter().map(|&v| v * v).sum()
    }

    /// Natural log of the determinant of `S`, i.e. `2 * sum(ln L[j,j])`.
    pub fn ln_det(&self) -> f64 {
        (0..self.dim())
            .map(|j| self.lower[[j, j]].ln())
            .sum::<f64>()
            * 2.0
    }

    /// Solves `L y = b`.
    fn forward_substitute(&self, b: ArrayView1<f64>) -> Array1<f64> {
        let p = self.dim();
        assert_eq!(b.len(), p, "vector length {} != factor dimension {p}", b.len());
        let mut y = Array1::zeros(p);
        for i in 0..p {
            let mut sum = b[i];
            for k in 0..i {
                sum -= self.lower[[i, k]] * y[k];
            }
            y[i] = sum / self.lower[[i, i]];
        }
        y
    }
}
