//! Integration tests for EstimateError variants.

use argus_estimate::{estimate, EstimateError, EstimatorConfig, Method};
use ndarray::{arr2, Array2};

#[test]
fn error_empty_data() {
    let data = Array2::<f64>::zeros((0, 2));
    let result = estimate(data.view(), &EstimatorConfig::new());
    assert!(matches!(result, Err(EstimateError::EmptyData)));
}

#[test]
fn error_too_few_rows() {
    // n == p is not enough for an invertible sample covariance.
    let data = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
    let result = estimate(data.view(), &EstimatorConfig::new());
    assert!(matches!(
        result,
        Err(EstimateError::TooFewRows { rows: 2, cols: 2 })
    ));
}

#[test]
fn error_unrecognized_method_string() {
    let err = "bogus".parse::<Method>().unwrap_err();
    match err {
        EstimateError::InvalidConfiguration { value } => assert_eq!(value, "bogus"),
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn error_singular_classical_covariance_is_detected_at_factorization() {
    // Perfectly collinear columns: estimation succeeds, factorization fails.
    let data = arr2(&[
        [1.0, 2.0],
        [2.0, 4.0],
        [3.0, 6.0],
        [4.0, 8.0],
    ]);
    let fit = estimate(data.view(), &EstimatorConfig::new()).unwrap();
    assert!(matches!(
        fit.cholesky(),
        Err(EstimateError::SingularCovariance { p: 2 })
    ));
}

#[test]
fn error_singular_robust_covariance() {
    let data = arr2(&[
        [1.0, 2.0],
        [2.0, 4.0],
        [3.0, 6.0],
        [4.0, 8.0],
        [5.0, 10.0],
        [6.0, 12.0],
    ]);
    let config = EstimatorConfig::new().with_method(Method::Robust);
    let result = estimate(data.view(), &config);
    assert!(matches!(
        result,
        Err(EstimateError::SingularCovariance { .. })
    ));
}
