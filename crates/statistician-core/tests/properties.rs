//! End-to-end checks of the public API on small reference samples.

use approx::assert_relative_eq;
use statistician_core::{
    confidence_interval, homogeneity_report, mean, median, remove_outliers, t_test,
    variance_test, OutlierMethod, StatsError, TTestOptions, VarianceTestOptions,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn is_invalid_input<T: std::fmt::Debug>(result: Result<T, StatsError>) -> bool {
    matches!(result, Err(StatsError::InvalidInput(_)))
}

#[test]
fn test_descriptive_reference_values() {
    assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
    assert_eq!(median(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
    assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
}

#[test]
fn test_confidence_interval_contains_mean() {
    let ci = confidence_interval(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.95).unwrap();
    assert!(ci.contains(3.0));
    assert!(ci.lower <= ci.upper);
    let (lower, upper) = ci.bounds();
    assert_relative_eq!(lower, 1.0368, epsilon = 1e-4);
    assert_relative_eq!(upper, 4.9632, epsilon = 1e-4);
}

#[test]
fn test_t_test_sign_follows_mean_difference() {
    init_logging();
    let a = [1.0, 2.0, 3.0, 4.0, 5.0];
    let b = [2.0, 3.0, 4.0, 5.0, 6.0];

    let forward = t_test(&a, &b, &TTestOptions::default()).unwrap();
    let backward = t_test(&b, &a, &TTestOptions::default()).unwrap();

    assert!(forward.statistic < 0.0);
    assert_relative_eq!(forward.statistic, -backward.statistic, epsilon = 1e-12);
    assert_relative_eq!(forward.p_value, backward.p_value, epsilon = 1e-12);
}

#[test]
fn test_remove_outliers_idempotent() {
    init_logging();
    let data = [
        12.1, 11.8, 12.4, 12.0, 11.9, 35.0, 12.2, 12.3, -8.0, 11.7, 12.0, 12.5, 18.0, 12.1,
    ];
    for method in [OutlierMethod::ZScore, OutlierMethod::Iqr] {
        for threshold in [0.05, 0.3, 0.5, 0.9, 1.0, 1.5, 2.0, 3.0] {
            let once = remove_outliers(&data, method, threshold).unwrap();
            assert!(once.len() >= method.min_observations());
            let twice = remove_outliers(&once, method, threshold).unwrap();
            assert_eq!(once, twice, "{method:?} with threshold {threshold}");
        }
    }
}

#[test]
fn test_remove_outliers_tiny_samples_are_fixed_points() {
    for data in [vec![1.0, 2.0], vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0, 50.0]] {
        let once = remove_outliers(&data, OutlierMethod::ZScore, 0.5).unwrap();
        assert!(!once.is_empty());
        assert_eq!(remove_outliers(&once, OutlierMethod::ZScore, 0.5).unwrap(), once);
    }
}

#[test]
fn test_variance_homogeneity_two_value_groups() {
    let report = homogeneity_report(&[1.0, 3.0], &[1.0, 10.0], 0.05).unwrap();
    assert_eq!(report.len(), 4);
    assert!(report.iter().all(|r| !r.method.is_empty()));
}

#[test]
fn test_variance_homogeneity() {
    let a = [1.0, 2.0, 3.0, 4.0, 5.0];
    let b = [2.0, 3.0, 4.0, 5.0, 6.0];
    let result = variance_test(&a, &b, &VarianceTestOptions::default()).unwrap();
    assert!(!result.reject_null);
    assert_eq!(homogeneity_report(&a, &b, 0.05).unwrap().len(), 4);
}

#[test]
fn test_empty_sample_is_invalid_input() {
    let empty: [f64; 0] = [];
    let full = [1.0, 2.0, 3.0, 4.0, 5.0];

    assert!(is_invalid_input(mean(&empty)));
    assert!(is_invalid_input(median(&empty)));
    assert!(is_invalid_input(remove_outliers(&empty, OutlierMethod::ZScore, 3.0)));
    assert!(is_invalid_input(remove_outliers(&empty, OutlierMethod::Iqr, 1.5)));
    assert!(is_invalid_input(confidence_interval(&empty, 0.95)));
    assert!(is_invalid_input(t_test(&empty, &full, &TTestOptions::default())));
    assert!(is_invalid_input(t_test(&full, &empty, &TTestOptions::default())));
    assert!(is_invalid_input(variance_test(&empty, &full, &VarianceTestOptions::default())));
    assert!(is_invalid_input(homogeneity_report(&full, &empty, 0.05)));
}
