//! Calibrated MEWMA control-limit resolver.
//!
//! The in-control run length of the MEWMA recursion has no closed form, so
//! the control limit comes from a calibrated table. This resolver anchors on
//! the h4 values of Prabhu & Runger (1997, Journal of Quality Technology
//! 29(1), Table 1) for an in-control ARL of 200 at p in {2, 4, 6, 10},
//! stored as ratios to the chi-squared(p) quantile at 1 - 1/200:
//!
//! - the ratio is bilinearly interpolated in (lambda, p),
//! - lambda = 1 is anchored at ratio 1, where the chart degenerates to a
//!   Shewhart chi-squared chart whose limit is exact,
//! - other ARL targets reuse the interpolated ratio against the
//!   chi-squared(p) quantile at 1 - 1/arl.
//!
//! Outside the tabulated grid the nearest row/column is used (lambda below
//! 0.05, p = 1, p above 10), which keeps the limit conservative rather than
//! extrapolating. Changing the anchor table changes every threshold, so the
//! table below is versioned with the crate.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::MewmaError;

/// Smoothing-parameter grid of the anchor table.
const LAMBDA_GRID: [f64; 9] = [0.05, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.8, 1.0];

/// Dimension grid of the anchor table.
const P_GRID: [f64; 4] = [2.0, 4.0, 6.0, 10.0];

/// h4 / chi-squared(p, 0.995) ratios derived from Prabhu & Runger (1997),
/// ARL0 = 200. Rows follow `P_GRID`, columns follow `LAMBDA_GRID`; the last
/// column is the exact Shewhart anchor.
const RATIO_TABLE: [[f64; 9]; 4] = [
    [0.6936, 0.8154, 0.9107, 0.9512, 0.9730, 0.9852, 0.9928, 0.9984, 1.0],
    [0.7550, 0.8566, 0.9334, 0.9650, 0.9811, 0.9899, 0.9946, 0.9993, 1.0],
    [0.7872, 0.8772, 0.9441, 0.9710, 0.9845, 0.9915, 0.9958, 0.9996, 1.0],
    [0.8226, 0.9000, 0.9556, 0.9775, 0.9882, 0.9937, 0.9969, 0.9993, 1.0],
];

/// Computes the MEWMA control limit for a `(lambda, ic_arl, p)` triple.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`MewmaError::InvalidSmoothing`] | `lambda` outside (0, 1] |
/// | [`MewmaError::InvalidInControlArl`] | `ic_arl <= 1` |
/// | [`MewmaError::InvalidDimension`] | `p == 0` |
/// | [`MewmaError::LimitFailed`] | chi-squared construction failure |
pub fn control_limit(lambda: f64, ic_arl: f64, p: usize) -> Result<f64, MewmaError> {
    if !lambda.is_finite() || lambda <= 0.0 || lambda > 1.0 {
        return Err(MewmaError::InvalidSmoothing { lambda });
    }
    if !ic_arl.is_finite() || ic_arl <= 1.0 {
        return Err(MewmaError::InvalidInControlArl { arl: ic_arl });
    }
    if p == 0 {
        return Err(MewmaError::InvalidDimension);
    }

    let chi = ChiSquared::new(p as f64).map_err(|e| MewmaError::LimitFailed(e.to_string()))?;
    let anchor = chi.inverse_cdf(1.0 - 1.0 / ic_arl);

    Ok(interpolate_ratio(lambda, p as f64) * anchor)
}

/// Bilinear interpolation of the anchor ratio, clamped to the grid edges.
fn interpolate_ratio(lambda: f64, p: f64) -> f64 {
    let (li, lt) = grid_position(&LAMBDA_GRID, lambda);
    let (pi, pt) = grid_position(&P_GRID, p);

    let row = |r: usize| -> f64 {
        RATIO_TABLE[r][li] * (1.0 - lt) + RATIO_TABLE[r][li + 1] * lt
    };
    row(pi) * (1.0 - pt) + row(pi + 1) * pt
}

/// Locates `value` in an ascending grid, returning the lower bracket index
/// and the interpolation weight toward the upper bracket. Values outside
/// the grid clamp to the nearest edge.
fn grid_position(grid: &[f64], value: f64) -> (usize, f64) {
    if value <= grid[0] {
        return (0, 0.0);
    }
    let last = grid.len() - 1;
    if value >= grid[last] {
        return (last - 1, 1.0);
    }
    let mut i = 0;
    while value > grid[i + 1] {
        i += 1;
    }
    (i, (value - grid[i]) / (grid[i + 1] - grid[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matches_prabhu_runger_p2() {
        // Prabhu & Runger (1997): p = 2, lambda = 0.1, ARL0 = 200 => h4 = 8.64
        let h = control_limit(0.1, 200.0, 2).unwrap();
        assert_relative_eq!(h, 8.64, epsilon = 0.02);
    }

    #[test]
    fn matches_prabhu_runger_p4() {
        // p = 4, lambda = 0.2, ARL0 = 200 => h4 = 13.87
        let h = control_limit(0.2, 200.0, 4).unwrap();
        assert_relative_eq!(h, 13.87, epsilon = 0.02);
    }

    #[test]
    fn interpolated_p3_reference_value() {
        // Interpolated between the p = 2 and p = 4 rows at lambda = 0.1.
        let h = control_limit(0.1, 200.0, 3).unwrap();
        assert_relative_eq!(h, 10.73, epsilon = 0.02);
    }

    #[test]
    fn lambda_one_is_the_shewhart_limit() {
        // With lambda = 1 the recursion keeps no memory and the limit is the
        // chi-squared quantile at 1 - 1/ARL exactly.
        let chi = ChiSquared::new(3.0).unwrap();
        let expected = chi.inverse_cdf(1.0 - 1.0 / 200.0);
        let h = control_limit(1.0, 200.0, 3).unwrap();
        assert_relative_eq!(h, expected, epsilon = 1e-10);
    }

    #[test]
    fn increases_with_ic_arl() {
        let mut last = 0.0;
        for arl in [50.0, 100.0, 200.0, 500.0, 1000.0] {
            let h = control_limit(0.1, arl, 3).unwrap();
            assert!(h > last, "h = {h} at ARL {arl} not above {last}");
            last = h;
        }
    }

    #[test]
    fn increases_with_lambda() {
        // More smoothing (small lambda) shrinks the statistic's stationary
        // spread, so the limit drops with lambda.
        let mut last = 0.0;
        for lambda in [0.05, 0.1, 0.2, 0.4, 0.8, 1.0] {
            let h = control_limit(lambda, 200.0, 4).unwrap();
            assert!(h > last, "h = {h} at lambda {lambda} not above {last}");
            last = h;
        }
    }

    #[test]
    fn increases_with_dimension() {
        let mut last = 0.0;
        for p in [1, 2, 3, 4, 6, 8, 10, 12] {
            let h = control_limit(0.1, 200.0, p).unwrap();
            assert!(h > last, "h = {h} at p = {p} not above {last}");
            last = h;
        }
    }

    #[test]
    fn small_lambda_clamps_to_grid_edge() {
        let edge = control_limit(0.05, 200.0, 2).unwrap();
        let below = control_limit(0.01, 200.0, 2).unwrap();
        assert_relative_eq!(below, edge, epsilon = 1e-12);
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(matches!(
            control_limit(0.0, 200.0, 2),
            Err(MewmaError::InvalidSmoothing { .. })
        ));
        assert!(matches!(
            control_limit(1.5, 200.0, 2),
            Err(MewmaError::InvalidSmoothing { .. })
        ));
        assert!(matches!(
            control_limit(0.1, 1.0, 2),
            Err(MewmaError::InvalidInControlArl { .. })
        ));
        assert!(matches!(
            control_limit(0.1, 200.0, 0),
            Err(MewmaError::InvalidDimension)
        ));
    }

    #[test]
    fn grid_position_brackets() {
        let grid = [0.1, 0.2, 0.4];
        assert_eq!(grid_position(&grid, 0.05), (0, 0.0));
        assert_eq!(grid_position(&grid, 0.1), (0, 0.0));
        let (i, t) = grid_position(&grid, 0.3);
        assert_eq!(i, 1);
        assert_relative_eq!(t, 0.5, epsilon = 1e-12);
        assert_eq!(grid_position(&grid, 0.4), (1, 1.0));
        assert_eq!(grid_position(&grid, 0.9), (1, 1.0));
    }
}
