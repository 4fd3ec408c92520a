//! Mean and median

use super::{clean_sample, sorted};
use crate::StatsResult;

/// Arithmetic mean of the sample
///
/// NaN values are treated as missing.
///
/// # Errors
/// `InvalidInput` if the sample has no non-NaN values.
pub fn mean(data: &[f64]) -> StatsResult<f64> {
    let clean = clean_sample(data, 1, "mean", "sample")?;
    Ok(mean_of(&clean))
}

/// Median of the sample
///
/// For an even number of observations this is the average of the two
/// middle values.
///
/// # Errors
/// `InvalidInput` if the sample has no non-NaN values.
pub fn median(data: &[f64]) -> StatsResult<f64> {
    let clean = clean_sample(data, 1, "median", "sample")?;
    Ok(median_of(&sorted(&clean)))
}

/// Mean of a non-empty, NaN-free slice
pub(crate) fn mean_of(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Median of a sorted, non-empty slice
pub(crate) fn median_of(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
