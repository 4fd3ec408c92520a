//! Descriptive statistics
//!
//! - Central tendency (mean, median)
//! - Dispersion (variance, standard deviation, standard error, quantiles)
//! - Outlier filtering (z-score, IQR)

mod central;
mod dispersion;
mod outliers;

pub use central::{mean, median};
pub use dispersion::{quantile, std_dev, std_error, variance};
pub use outliers::{outlier_fences, remove_outliers};

pub(crate) use central::{mean_of, median_of};
pub(crate) use dispersion::{quantile_sorted, sorted, variance_of};

use crate::{StatsError, StatsResult};

/// Filter NaN values from a slice
pub(crate) fn filter_nan(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| !x.is_nan()).collect()
}

/// Drop NaN values and reject samples shorter than `min`
pub(crate) fn clean_sample(
    data: &[f64],
    min: usize,
    what: &str,
    field: &str,
) -> StatsResult<Vec<f64>> {
    let clean = filter_nan(data);
    if clean.is_empty() {
        return Err(StatsError::empty(field));
    }
    if clean.len() < min {
        return Err(StatsError::too_short(what, field, min, clean.len()));
    }
    Ok(clean)
}
