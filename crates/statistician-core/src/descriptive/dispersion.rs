//! Dispersion measures
//!
//! Variances use Bessel's correction (denominator `n - 1`). Quantiles use
//! linear interpolation between order statistics (Hyndman & Fan type 7),
//! the estimator pandas and NumPy default to.

use super::{clean_sample, mean_of};
use crate::{StatsError, StatsResult};

/// Sample variance
///
/// # Errors
/// `InvalidInput` if fewer than 2 non-NaN observations remain.
pub fn variance(data: &[f64]) -> StatsResult<f64> {
    let clean = clean_sample(data, 2, "variance", "sample")?;
    Ok(variance_of(&clean))
}

/// Sample standard deviation
pub fn std_dev(data: &[f64]) -> StatsResult<f64> {
    variance(data).map(f64::sqrt)
}

/// Standard error of the mean, `s / sqrt(n)`
pub fn std_error(data: &[f64]) -> StatsResult<f64> {
    let clean = clean_sample(data, 2, "standard error", "sample")?;
    Ok((variance_of(&clean) / clean.len() as f64).sqrt())
}

/// Sample quantile at probability `q`
///
/// # Errors
/// `InvalidInput` if the sample is empty or `q` is outside `[0, 1]`.
pub fn quantile(data: &[f64], q: f64) -> StatsResult<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(StatsError::InvalidInput(format!(
            "Invalid quantile probability: {q} (must be in [0, 1])"
        )));
    }
    let clean = clean_sample(data, 1, "quantile", "sample")?;
    Ok(quantile_sorted(&sorted(&clean), q))
}

/// Sample variance of a NaN-free slice with at least 2 values
pub(crate) fn variance_of(data: &[f64]) -> f64 {
    let m = mean_of(data);
    let ss: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    ss / (data.len() - 1) as f64
}

/// Ascending copy of a NaN-free slice
pub(crate) fn sorted(data: &[f64]) -> Vec<f64> {
    let mut v = data.to_vec();
    v.sort_by(|a, b| a.total_cmp(b));
    v
}

/// Type 7 quantile of a sorted, non-empty slice
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let h = q * (sorted.len() - 1) as f64;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_variance() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(variance(&data).unwrap(), 4.571428571428571, epsilon = 1e-12);
        assert_relative_eq!(std_dev(&data).unwrap(), 4.571428571428571_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_std_error() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        // s^2 = 2.5, sem = sqrt(2.5 / 5)
        assert_relative_eq!(std_error(&data).unwrap(), 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_variance_requires_two_values() {
        assert!(variance(&[1.0]).is_err());
        assert!(std_error(&[]).is_err());
    }

    #[test]
    fn test_quantile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&data, 0.25).unwrap(), 1.75);
        assert_relative_eq!(quantile(&data, 0.75).unwrap(), 3.25);
        assert_eq!(quantile(&data, 0.0).unwrap(), 1.0);
        assert_eq!(quantile(&data, 1.0).unwrap(), 4.0);
        assert_eq!(quantile(&[5.0, 1.0, 3.0], 0.5).unwrap(), 3.0);
    }

    #[test]
    fn test_quantile_rejects_bad_probability() {
        assert!(quantile(&[1.0, 2.0], 1.5).is_err());
        assert!(quantile(&[1.0, 2.0], f64::NAN).is_err());
    }
}
