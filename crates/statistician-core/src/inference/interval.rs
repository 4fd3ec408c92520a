//! Confidence intervals
//!
//! - Population mean (Student t, or normal with known sigma)
//! - Population variance (chi-square)
//! - Population proportion (Wald)
//! - Required sample sizes for a target margin of error

use super::{check_confidence, students_t};
use crate::descriptive::{clean_sample, mean_of, variance_of};
use crate::{ConfidenceIntervalOptions, IntervalResult, StatsError, StatsResult};
use log::debug;
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

/// Confidence interval for the population mean
///
/// `mean ± t(1 - alpha/2, n - 1) * s / sqrt(n)`.
///
/// # Arguments
/// * `data` - Sample data
/// * `confidence` - Confidence level in (0, 1), e.g. 0.95
///
/// # Errors
/// `InvalidInput` if `confidence` is outside (0, 1) or fewer than 2
/// observations remain after NaN filtering.
pub fn confidence_interval(data: &[f64], confidence: f64) -> StatsResult<IntervalResult> {
    confidence_interval_with(
        data,
        &ConfidenceIntervalOptions {
            confidence_level: Some(confidence),
            pop_std: None,
        },
    )
}

/// Confidence interval for the population mean with explicit options
///
/// When `pop_std` is given the standard error is `pop_std / sqrt(n)` and the
/// normal quantile replaces the t quantile; a single observation suffices.
pub fn confidence_interval_with(
    data: &[f64],
    options: &ConfidenceIntervalOptions,
) -> StatsResult<IntervalResult> {
    let confidence = options.confidence_level.unwrap_or(0.95);
    check_confidence(confidence)?;

    let (estimate, margin, method) = match options.pop_std {
        None => {
            let clean = clean_sample(data, 2, "Mean confidence interval", "sample")?;
            let n = clean.len() as f64;
            let sem = (variance_of(&clean) / n).sqrt();
            let t = students_t(n - 1.0)?.inverse_cdf((1.0 + confidence) / 2.0);
            debug!("mean CI: t interval, n={}, t={:.4}, sem={:.4}", n, t, sem);
            (mean_of(&clean), t * sem, "Student t interval")
        }
        Some(sigma) => {
            if !sigma.is_finite() || sigma <= 0.0 {
                return Err(StatsError::InvalidInput(format!(
                    "Invalid population standard deviation: {sigma} (must be finite and > 0)"
                )));
            }
            let clean = clean_sample(data, 1, "Mean confidence interval", "sample")?;
            let n = clean.len() as f64;
            let z = z_quantile(confidence)?;
            debug!("mean CI: normal interval with known sigma, n={}, z={:.4}", n, z);
            (mean_of(&clean), z * sigma / n.sqrt(), "Normal interval (known sigma)")
        }
    };

    Ok(IntervalResult {
        lower: estimate - margin,
        upper: estimate + margin,
        estimate,
        confidence_level: confidence,
        method: method.into(),
    })
}

/// Confidence interval for the population variance
///
/// `((n-1)s² / chi2(1 - alpha/2), (n-1)s² / chi2(alpha/2))` with `n - 1`
/// degrees of freedom.
pub fn variance_interval(data: &[f64], confidence: f64) -> StatsResult<IntervalResult> {
    check_confidence(confidence)?;
    let clean = clean_sample(data, 2, "Variance confidence interval", "sample")?;

    let df = (clean.len() - 1) as f64;
    let var = variance_of(&clean);
    let chi2 = ChiSquared::new(df).map_err(StatsError::distribution)?;
    let chi2_lower = chi2.inverse_cdf((1.0 - confidence) / 2.0);
    let chi2_upper = chi2.inverse_cdf((1.0 + confidence) / 2.0);

    Ok(IntervalResult {
        lower: df * var / chi2_upper,
        upper: df * var / chi2_lower,
        estimate: var,
        confidence_level: confidence,
        method: "Chi-square variance interval".into(),
    })
}

/// Wald confidence interval for a population proportion
///
/// `p ± z * sqrt(p(1 - p) / n)`. Bounds are not clipped to [0, 1].
pub fn proportion_interval(p: f64, n: usize, confidence: f64) -> StatsResult<IntervalResult> {
    check_confidence(confidence)?;
    check_proportion(p)?;
    if n == 0 {
        return Err(StatsError::empty("sample"));
    }

    let se = (p * (1.0 - p) / n as f64).sqrt();
    let margin = z_quantile(confidence)? * se;

    Ok(IntervalResult {
        lower: p - margin,
        upper: p + margin,
        estimate: p,
        confidence_level: confidence,
        method: "Wald proportion interval".into(),
    })
}

/// Sample size needed to estimate a mean within `margin` at `confidence`
///
/// `ceil((z * pop_std / margin)^2)`, assuming a known population standard
/// deviation.
pub fn sample_size_for_mean(confidence: f64, margin: f64, pop_std: f64) -> StatsResult<usize> {
    check_confidence(confidence)?;
    check_positive("margin of error", margin)?;
    check_positive("population standard deviation", pop_std)?;

    let z = z_quantile(confidence)?;
    to_sample_size(((z * pop_std) / margin).powi(2))
}

/// Sample size needed to estimate a proportion within `margin`
///
/// `ceil(z^2 * p(1 - p) / margin^2)`; `p = 0.5` gives the most conservative
/// size.
pub fn sample_size_for_proportion(confidence: f64, margin: f64, p: f64) -> StatsResult<usize> {
    check_confidence(confidence)?;
    check_positive("margin of error", margin)?;
    check_proportion(p)?;

    let z = z_quantile(confidence)?;
    to_sample_size(z * z * p * (1.0 - p) / (margin * margin))
}

/// Round a required sample size up, rejecting sizes no `usize` can hold
fn to_sample_size(n: f64) -> StatsResult<usize> {
    let n = n.ceil();
    if !n.is_finite() || n >= usize::MAX as f64 {
        return Err(StatsError::InvalidInput(format!(
            "Required sample size {n} is too large; increase the margin of error"
        )));
    }
    Ok(n as usize)
}

/// Two-sided standard normal critical value for `confidence`
fn z_quantile(confidence: f64) -> StatsResult<f64> {
    let normal = Normal::new(0.0, 1.0).map_err(StatsError::distribution)?;
    Ok(normal.inverse_cdf((1.0 + confidence) / 2.0))
}

fn check_proportion(p: f64) -> StatsResult<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::InvalidInput(format!(
            "Invalid proportion: {p} (must be in [0, 1])"
        )));
    }
    Ok(())
}

fn check_positive(name: &str, value: f64) -> StatsResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(StatsError::InvalidInput(format!(
            "Invalid {name}: {value} (must be finite and > 0)"
        )));
    }
    Ok(())
}
