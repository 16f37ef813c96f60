//! FastMCD robust location and scatter estimation.
//!
//! Implements the concentration-step algorithm of Rousseeuw & Van Driessen
//! (1999): many random (p+1)-point starts are each concentrated for two
//! steps, the best few candidates are iterated until their h-subset stops
//! changing, and the subset with the smallest scatter determinant wins.
//! The raw estimate is then rescaled with the Croux & Haesbroeck consistency
//! factor and reweighted once against the 0.975 chi-squared cutoff.
//!
//! Subset draws come from a seeded RNG held in [`McdConfig`], so the same
//! baseline and configuration always yield the same estimate.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::index::sample as index_sample;
use rand::{Rng, SeedableRng};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::debug;

use crate::cholesky::Cholesky;
use crate::classical::mean_and_covariance;
use crate::config::McdConfig;
use crate::error::EstimateError;

/// Cutoff probability for the reweighting step.
const REWEIGHT_QUANTILE: f64 = 0.975;

/// Output of the FastMCD search, before being wrapped into an
/// [`crate::Estimate`].
pub(crate) struct McdFit {
    pub(crate) mean: Array1<f64>,
    pub(crate) cov: Array2<f64>,
    /// Row indices with weight 1 in the reweighting step.
    pub(crate) support: Vec<usize>,
    /// `ln det` of the best raw h-subset scatter.
    pub(crate) raw_objective: f64,
}

/// A concentrated h-subset candidate.
struct Candidate {
    subset: Vec<usize>,
    mean: Array1<f64>,
    cov: Array2<f64>,
    chol: Cholesky,
    objective: f64,
}

/// Runs the reweighted FastMCD estimator.
///
/// Callers guarantee `data` is finite with `n > p >= 1`; the subset size is
/// validated here because it depends on both the data shape and the config.
pub(crate) fn mcd_estimate(
    data: ArrayView2<f64>,
    config: &McdConfig,
) -> Result<McdFit, EstimateError> {
    let n = data.nrows();
    let p = data.ncols();

    let h = config.subset_size().unwrap_or((n + p + 1) / 2);
    if h <= p || h > n {
        return Err(EstimateError::InvalidSubsetSize {
            subset_size: h,
            rows: n,
            cols: p,
        });
    }

    let best = if h == n {
        // Degenerate request: the h-subset is the full sample.
        full_sample_candidate(data)?
    } else {
        search_best_subset(data, h, config)?
    };

    debug!(
        n,
        p,
        h,
        objective = best.objective,
        "FastMCD concentration finished"
    );

    // Consistency correction of the raw scatter.
    let c_raw = consistency_factor(p, h as f64 / n as f64)?;
    let raw_cov = &best.cov * c_raw;
    let raw_chol = Cholesky::new(raw_cov.view())
        .ok_or(EstimateError::SingularCovariance { p })?;

    // Reweighting against the 0.975 chi-squared cutoff.
    let chi_p = ChiSquared::new(p as f64)
        .map_err(|e| EstimateError::EstimationFailed(e.to_string()))?;
    let cutoff = chi_p.inverse_cdf(REWEIGHT_QUANTILE);

    let dists = squared_distances(data, &best.mean, &raw_chol);
    let support: Vec<usize> = dists
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d <= cutoff)
        .map(|(i, _)| i)
        .collect();

    if support.len() <= p {
        return Err(EstimateError::SingularCovariance { p });
    }

    let kept = data.select(Axis(0), &support);
    let (mean, subset_cov) = mean_and_covariance(kept.view());
    let c_rw = consistency_factor(p, REWEIGHT_QUANTILE)?;
    let cov = subset_cov * c_rw;

    if Cholesky::new(cov.view()).is_none() {
        return Err(EstimateError::SingularCovariance { p });
    }

    Ok(McdFit {
        mean,
        cov,
        support,
        raw_objective: best.objective,
    })
}

/// Small-sample consistency factor for a truncated scatter estimate.
///
/// For a subset covering the central `alpha` mass of a normal sample, the
/// scatter shrinks by `F_{p+2}(q_alpha) / alpha` where `q_alpha` is the
/// chi-squared(p) quantile at `alpha` (Croux & Haesbroeck 1999). The
/// returned factor undoes that shrinkage.
fn consistency_factor(p: usize, alpha: f64) -> Result<f64, EstimateError> {
    if alpha >= 1.0 {
        return Ok(1.0);
    }
    let pf = p as f64;
    let chi_p =
        ChiSquared::new(pf).map_err(|e| EstimateError::EstimationFailed(e.to_string()))?;
    let chi_p2 = ChiSquared::new(pf + 2.0)
        .map_err(|e| EstimateError::EstimationFailed(e.to_string()))?;

    let q = chi_p.inverse_cdf(alpha);
    let mass = chi_p2.cdf(q);
    if mass <= 0.0 || !mass.is_finite() {
        return Err(EstimateError::EstimationFailed(format!(
            "consistency factor degenerate for p = {p}, alpha = {alpha}"
        )));
    }
    Ok(alpha / mass)
}

/// Candidate for `h == n`: the classical estimate over the full sample.
fn full_sample_candidate(data: ArrayView2<f64>) -> Result<Candidate, EstimateError> {
    let n = data.nrows();
    let p = data.ncols();
    let subset: Vec<usize> = (0..n).collect();
    let (mean, cov) = mean_and_covariance(data);
    let chol = Cholesky::new(cov.view())
        .ok_or(EstimateError::SingularCovariance { p })?;
    let objective = chol.ln_det();
    Ok(Candidate {
        subset,
        mean,
        cov,
        chol,
        objective,
    })
}

/// Random-start concentration search for the minimum-determinant h-subset.
fn search_best_subset(
    data: ArrayView2<f64>,
    h: usize,
    config: &McdConfig,
) -> Result<Candidate, EstimateError> {
    let n = data.nrows();
    let p = data.ncols();
    let mut rng = StdRng::seed_from_u64(config.seed());

    // Phase 1: short concentration of every random start.
    let mut candidates: Vec<Candidate> = Vec::new();
    for _ in 0..config.n_starts() {
        let Some(seeded) = seed_candidate(data, h, &mut rng) else {
            continue;
        };
        let mut cand = seeded;
        let mut ok = true;
        for _ in 0..2 {
            match c_step(data, h, &cand) {
                Some(next) => cand = next,
                None => {
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            candidates.push(cand);
        }
    }

    if candidates.is_empty() {
        return Err(EstimateError::SingularCovariance { p });
    }

    // Phase 2: iterate the most promising candidates to convergence.
    candidates.sort_by(|a, b| {
        a.objective
            .partial_cmp(&b.objective)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(config.n_best());

    let mut best: Option<Candidate> = None;
    for mut cand in candidates {
        for _ in 0..config.max_csteps() {
            match c_step(data, h, &cand) {
                Some(next) => {
                    let converged = next.subset == cand.subset;
                    cand = next;
                    if converged {
                        break;
                    }
                }
                None => break,
            }
        }
        let better = match &best {
            Some(b) => cand.objective < b.objective,
            None => true,
        };
        if better {
            best = Some(cand);
        }
    }

    best.ok_or(EstimateError::SingularCovariance { p })
}

/// Builds an initial candidate from a random (p+1)-point subset, growing it
/// one random point at a time until its scatter is nonsingular.
fn seed_candidate(data: ArrayView2<f64>, h: usize, rng: &mut StdRng) -> Option<Candidate> {
    let n = data.nrows();
    let p = data.ncols();

    let mut subset: Vec<usize> = index_sample(rng, n, p + 1).into_vec();
    loop {
        if let Some(cand) = evaluate_subset(data, subset.clone()) {
            // Concentrate the seed straight onto its h-subset.
            return c_step(data, h, &cand);
        }
        if subset.len() == n {
            return None;
        }
        let mut extra = rng.random_range(0..n);
        while subset.contains(&extra) {
            extra = rng.random_range(0..n);
        }
        subset.push(extra);
    }
}

/// One concentration step: rank all rows by distance to the candidate and
/// re-estimate from the h closest. The scatter determinant never increases.
fn c_step(data: ArrayView2<f64>, h: usize, cand: &Candidate) -> Option<Candidate> {
    let dists = squared_distances(data, &cand.mean, &cand.chol);
    let subset = h_smallest(&dists, h);
    evaluate_subset(data, subset)
}

/// Estimates mean/scatter from a row subset; `None` if the scatter is singular.
fn evaluate_subset(data: ArrayView2<f64>, subset: Vec<usize>) -> Option<Candidate> {
    let rows = data.select(Axis(0), &subset);
    let (mean, cov) = mean_and_covariance(rows.view());
    let chol = Cholesky::new(cov.view())?;
    let objective = chol.ln_det();
    Some(Candidate {
        subset,
        mean,
        cov,
        chol,
        objective,
    })
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

/// Indices of the `h` smallest values, returned sorted ascending by index.
fn h_smallest(values: &[f64], h: usize) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_unstable_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    idx.truncate(h);
    idx.sort_unstable();
    idx
}
