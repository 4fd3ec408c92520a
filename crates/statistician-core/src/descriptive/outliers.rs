//! Outlier filtering
//!
//! Filtering is repeated until a pass flags nothing, or until applying the
//! next pass would leave fewer values than the method needs. Either way the
//! output is a fixed point: filtering it again with the same method and
//! threshold returns it unchanged.

use super::{clean_sample, mean_of, quantile_sorted, sorted, variance_of};
use crate::{OutlierMethod, StatsError, StatsResult};
use log::debug;

/// Remove outliers from a sample
///
/// - `ZScore`: drops values with `|x - mean| / s > threshold`
/// - `Iqr`: drops values outside `[Q1 - threshold * IQR, Q3 + threshold * IQR]`
///
/// Survivors keep their input order. NaN values are treated as missing and
/// never appear in the output. A pass that would leave fewer observations
/// than the method needs is not applied, so the output always has at least
/// the method's minimum size.
///
/// # Errors
/// `InvalidInput` if `threshold` is not a finite positive number, or the
/// sample has fewer observations than the method needs (2 for z-scores,
/// 4 for quartiles).
pub fn remove_outliers(
    data: &[f64],
    method: OutlierMethod,
    threshold: f64,
) -> StatsResult<Vec<f64>> {
    check_threshold(threshold)?;
    let min = method.min_observations();
    let mut kept = clean_sample(data, min, method.name(), "sample")?;

    let mut pass = 0;
    loop {
        pass += 1;
        let flagged = outlier_rule(&kept, method, threshold);
        let survivors: Vec<f64> = kept.iter().copied().filter(|&x| !flagged(x)).collect();

        let dropped = kept.len() - survivors.len();
        if dropped == 0 {
            break;
        }
        if survivors.len() < min {
            debug!(
                "{} pass {}: keeping {} values, dropping {} would leave fewer than {}",
                method.name(),
                pass,
                kept.len(),
                dropped,
                min
            );
            break;
        }
        debug!(
            "{} pass {}: dropped {} of {} values",
            method.name(),
            pass,
            dropped,
            kept.len()
        );
        kept = survivors;
    }

    Ok(kept)
}

/// Acceptance bounds `(lower, upper)` for a single filtering pass
///
/// For z-scores these are `mean ± threshold * s`; a sample with zero
/// spread accepts everything.
pub fn outlier_fences(
    data: &[f64],
    method: OutlierMethod,
    threshold: f64,
) -> StatsResult<(f64, f64)> {
    check_threshold(threshold)?;
    let clean = clean_sample(data, method.min_observations(), method.name(), "sample")?;
    Ok(fences_of(&clean, method, threshold))
}

fn check_threshold(threshold: f64) -> StatsResult<()> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(StatsError::InvalidInput(format!(
            "Invalid outlier threshold: {threshold} (must be finite and > 0)"
        )));
    }
    Ok(())
}

fn fences_of(data: &[f64], method: OutlierMethod, threshold: f64) -> (f64, f64) {
    match method {
        OutlierMethod::ZScore => {
            let m = mean_of(data);
            let s = variance_of(data).sqrt();
            if s > 0.0 {
                (m - threshold * s, m + threshold * s)
            } else {
                (f64::NEG_INFINITY, f64::INFINITY)
            }
        }
        OutlierMethod::Iqr => {
            let sorted = sorted(data);
            let q1 = quantile_sorted(&sorted, 0.25);
            let q3 = quantile_sorted(&sorted, 0.75);
            let iqr = q3 - q1;
            (q1 - threshold * iqr, q3 + threshold * iqr)
        }
    }
}

/// Predicate flagging outliers for one pass over `data`
fn outlier_rule(data: &[f64], method: OutlierMethod, threshold: f64) -> impl Fn(f64) -> bool {
    // z-scores are compared directly so values equal to the mean are never
    // lost to rounding in the fences
    let (m, s) = match method {
        OutlierMethod::ZScore => (mean_of(data), variance_of(data).sqrt()),
        OutlierMethod::Iqr => (f64::NAN, f64::NAN),
    };
    let (lower, upper) = fences_of(data, method, threshold);

    move |x| match method {
        OutlierMethod::ZScore => s > 0.0 && ((x - m) / s).abs() > threshold,
        OutlierMethod::Iqr => x < lower || x > upper,
    }
}
