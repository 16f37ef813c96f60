//! Parametric control limit for the T-squared chart.

use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use crate::error::T2Error;

/// Computes the F-quantile control limit for a T-squared chart with
/// estimated parameters:
///
/// ```text
/// h = p * (n^2 - 1) / (n * (n - p)) * F^-1(prob; p, n - p)
/// ```
///
/// where `n` is the baseline sample size and `p` the feature dimension.
/// As `n` grows the scale factor tends to 1 and the limit approaches the
/// chi-squared(p) quantile at `prob`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`T2Error::InvalidDegreesOfFreedom`] | `p == 0` or `n <= p` |
/// | [`T2Error::InvalidFalseAlarmRate`] | `prob` outside (0, 1) |
/// | [`T2Error::ThresholdFailed`] | F-distribution construction failure |
pub fn f_limit(p: usize, n: usize, prob: f64) -> Result<f64, T2Error> {
    if p == 0 || n <= p {
        return Err(T2Error::InvalidDegreesOfFreedom { p, n });
    }
    if !prob.is_finite() || prob <= 0.0 || prob >= 1.0 {
        return Err(T2Error::InvalidFalseAlarmRate { far: 1.0 - prob });
    }

    let pf = p as f64;
    let nf = n as f64;
    let dist = FisherSnedecor::new(pf, nf - pf)
        .map_err(|e| T2Error::ThresholdFailed(e.to_string()))?;

    let factor = pf * (nf * nf - 1.0) / (nf * (nf - pf));
    Ok(factor * dist.inverse_cdf(prob))
}
