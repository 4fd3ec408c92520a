//! Statistical inference
//!
//! - Confidence intervals (mean, variance, proportion) and sample sizes
//! - Two-sample and paired t-tests
//! - Homogeneity of variance (F-test, Levene, Bartlett, rule of thumb)
//! - Bootstrap resampling

pub mod interval;
pub mod parametric;
pub mod resampling;
pub mod variance;

use crate::{StatsError, StatsResult};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Alternative hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alternative {
    #[default]
    TwoSided,
    /// First group's mean is less than the second's
    Less,
    /// First group's mean is greater than the second's
    Greater,
}

/// Generic test result structure for all hypothesis tests
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestResult {
    /// Test statistic (t, F, W, chi2, variance ratio)
    pub statistic: f64,
    /// p-value under the chosen alternative (f64::NAN if not applicable)
    pub p_value: f64,
    /// One-tailed p-value P(T >= |t|) (f64::NAN if not applicable)
    pub p_value_one_tail: f64,
    /// Degrees of freedom (f64::NAN if not applicable)
    pub df: f64,
    /// Denominator degrees of freedom for F statistics (f64::NAN otherwise)
    pub df2: f64,
    /// Critical value of the statistic at `alpha` (f64::NAN if not applicable)
    pub critical_value: f64,
    /// Significance level
    pub alpha: f64,
    /// Whether the null hypothesis is rejected at `alpha`
    pub reject_null: bool,
    /// Group 1 sample size
    pub n1: usize,
    /// Group 2 sample size
    pub n2: usize,
    /// Group 1 mean
    pub mean1: f64,
    /// Group 2 mean
    pub mean2: f64,
    /// Group 1 sample variance
    pub var1: f64,
    /// Group 2 sample variance
    pub var2: f64,
    /// Pooled variance (f64::NAN if not applicable)
    pub pooled_variance: f64,
    /// Hypothesized mean difference
    pub mu: f64,
    /// Pearson correlation between paired observations (f64::NAN if not applicable)
    pub correlation: f64,
    /// Alternative hypothesis
    pub alternative: Alternative,
    /// Test method/name
    pub method: String,
    /// Human-readable decision
    pub conclusion: String,
}

impl Default for TestResult {
    fn default() -> Self {
        Self {
            statistic: f64::NAN,
            p_value: f64::NAN,
            p_value_one_tail: f64::NAN,
            df: f64::NAN,
            df2: f64::NAN,
            critical_value: f64::NAN,
            alpha: 0.05,
            reject_null: false,
            n1: 0,
            n2: 0,
            mean1: f64::NAN,
            mean2: f64::NAN,
            var1: f64::NAN,
            var2: f64::NAN,
            pooled_variance: f64::NAN,
            mu: 0.0,
            correlation: f64::NAN,
            alternative: Alternative::TwoSided,
            method: String::new(),
            conclusion: String::new(),
        }
    }
}

impl TestResult {
    /// Total sample size
    pub fn n(&self) -> usize {
        self.n1 + self.n2
    }
}

/// Reject significance levels outside (0, 1)
pub(crate) fn check_alpha(alpha: f64) -> StatsResult<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(StatsError::InvalidInput(format!(
            "Invalid alpha: {alpha} (must be in (0, 1))"
        )));
    }
    Ok(())
}

/// Reject confidence levels outside (0, 1)
pub(crate) fn check_confidence(confidence: f64) -> StatsResult<()> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(StatsError::confidence(confidence));
    }
    Ok(())
}

/// Standard Student's t distribution with `df` degrees of freedom
pub(crate) fn students_t(df: f64) -> StatsResult<StudentsT> {
    StudentsT::new(0.0, 1.0, df).map_err(StatsError::distribution)
}

/// p-values for a t statistic: (under `alternative`, one-tailed on |t|)
pub(crate) fn t_p_values(dist: &StudentsT, t: f64, alternative: Alternative) -> (f64, f64) {
    let one_tail = dist.sf(t.abs());
    let p = match alternative {
        Alternative::TwoSided => (2.0 * one_tail).min(1.0),
        Alternative::Less => dist.cdf(t),
        Alternative::Greater => dist.sf(t),
    };
    (p, one_tail)
}

/// Critical value of |t| (two-sided) or t (one-sided) at `alpha`
pub(crate) fn t_critical(dist: &StudentsT, alpha: f64, alternative: Alternative) -> f64 {
    match alternative {
        Alternative::TwoSided => dist.inverse_cdf(1.0 - alpha / 2.0),
        Alternative::Greater => dist.inverse_cdf(1.0 - alpha),
        Alternative::Less => dist.inverse_cdf(alpha),
    }
}
