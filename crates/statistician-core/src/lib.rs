//! statistician-core: descriptive statistics and two-sample inference
//!
//! Pure functions over `&[f64]` samples: mean and median, outlier
//! filtering, confidence intervals, t-tests and variance homogeneity tests.
//! NaN values are treated as missing throughout.

pub mod descriptive;
pub mod errors;
pub mod inference;
pub mod types;

pub use errors::{StatsError, StatsResult};
pub use types::*;

pub use descriptive::{
    mean, median, outlier_fences, quantile, remove_outliers, std_dev, std_error, variance,
};
pub use inference::interval::{
    confidence_interval, confidence_interval_with, proportion_interval, sample_size_for_mean,
    sample_size_for_proportion, variance_interval,
};
pub use inference::parametric::{paired_t_test, t_test, TTestOptions};
pub use inference::resampling::{bootstrap, bootstrap_interval};
pub use inference::variance::{
    homogeneity_report, variance_test, LeveneCenter, VarianceTestMethod, VarianceTestOptions,
};
pub use inference::{Alternative, TestResult};
