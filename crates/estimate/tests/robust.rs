//! Integration tests for the FastMCD robust estimator.

use approx::assert_relative_eq;
use argus_estimate::{estimate, EstimatorConfig, McdConfig, Method};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

fn standard_normal_sample(n: usize, p: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Array2::zeros((n, p));
    for i in 0..n {
        for j in 0..p {
            data[[i, j]] = StandardNormal.sample(&mut rng);
        }
    }
    data
}

fn robust_config() -> EstimatorConfig {
    EstimatorConfig::new().with_method(Method::Robust)
}

#[test]
fn clean_data_close_to_classical() {
    let data = standard_normal_sample(400, 2, 11);

    let classical = estimate(data.view(), &EstimatorConfig::new()).unwrap();
    let robust = estimate(data.view(), &robust_config()).unwrap();

    for j in 0..2 {
        assert_relative_eq!(robust.mean()[j], classical.mean()[j], epsilon = 0.15);
    }
    // The reweighted, consistency-corrected scatter should track the sample
    // covariance on clean normal data.
    for i in 0..2 {
        assert_relative_eq!(
            robust.cov()[[i, i]],
            classical.cov()[[i, i]],
            epsilon = 0.25
        );
    }
}

#[test]
fn contamination_does_not_drag_the_robust_estimate() {
    // 80% standard normal, 20% shifted to (8, 8, 8).
    let mut data = standard_normal_sample(300, 3, 5);
    for i in 240..300 {
        for j in 0..3 {
            data[[i, j]] += 8.0;
        }
    }

    let classical = estimate(data.view(), &EstimatorConfig::new()).unwrap();
    let robust = estimate(data.view(), &robust_config()).unwrap();

    for j in 0..3 {
        // Classical mean is pulled toward the contamination cluster...
        assert!(
            classical.mean()[j] > 1.0,
            "classical mean[{j}] = {} should be dragged above 1.0",
            classical.mean()[j]
        );
        // ...while the robust mean stays near the true center.
        assert!(
            robust.mean()[j].abs() < 0.3,
            "robust mean[{j}] = {} should stay near 0",
            robust.mean()[j]
        );
        assert_relative_eq!(robust.cov()[[j, j]], 1.0, epsilon = 0.35);
    }

    // The contaminated rows must be outside the reweighting support.
    let support = robust.support().unwrap();
    assert!(
        support.iter().all(|&i| i < 240),
        "support must not include contaminated rows"
    );
}

#[test]
fn seed_controls_the_subset_search() {
    let data = standard_normal_sample(120, 2, 9);

    let config_a = EstimatorConfig::new()
        .with_method(Method::Robust)
        .with_mcd(McdConfig::new().with_seed(1));
    let config_b = config_a.clone();

    let a = estimate(data.view(), &config_a).unwrap();
    let b = estimate(data.view(), &config_b).unwrap();

    assert_eq!(a.support(), b.support());
    assert_eq!(a.raw_objective(), b.raw_objective());
    for i in 0..2 {
        assert_relative_eq!(a.mean()[i], b.mean()[i], epsilon = 0.0);
    }
}

#[test]
fn support_covers_a_majority_of_clean_data() {
    let data = standard_normal_sample(200, 3, 21);
    let robust = estimate(data.view(), &robust_config()).unwrap();
    let support = robust.support().unwrap();
    // The 0.975 cutoff keeps roughly 97.5% of clean normal rows.
    assert!(
        support.len() >= 180,
        "support of clean data unexpectedly small: {}",
        support.len()
    );
}
