//! Homogeneity of variance for two samples
//!
//! - Rule of thumb (variance ratio <= 4)
//! - F-test (two-sided variance ratio test)
//! - Levene's test, mean- or median-centred (Brown-Forsythe)
//! - Bartlett's test

use super::{check_alpha, TestResult};
use crate::descriptive::{clean_sample, mean_of, median_of, sorted, variance_of};
use crate::{StatsError, StatsResult};
use log::debug;
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor};

/// Largest variance ratio still treated as equal by the rule of thumb
pub const RULE_OF_THUMB_RATIO: f64 = 4.0;

/// Centre used for Levene's absolute deviations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeveneCenter {
    Mean,
    /// Brown-Forsythe variant, robust to non-normal data
    #[default]
    Median,
}

/// Variance homogeneity test to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VarianceTestMethod {
    RuleOfThumb,
    #[default]
    FTest,
    Levene {
        center: LeveneCenter,
    },
    Bartlett,
}

impl VarianceTestMethod {
    /// Display name used in `TestResult::method`
    pub fn name(self) -> &'static str {
        match self {
            VarianceTestMethod::RuleOfThumb => "Rule of thumb",
            VarianceTestMethod::FTest => "F-test",
            VarianceTestMethod::Levene {
                center: LeveneCenter::Mean,
            } => "Levene's test",
            VarianceTestMethod::Levene {
                center: LeveneCenter::Median,
            } => "Levene's test (median, Brown-Forsythe)",
            VarianceTestMethod::Bartlett => "Bartlett's test",
        }
    }
}

/// Options for variance tests
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarianceTestOptions {
    /// Test kind: F-test (default), Levene, Bartlett or rule of thumb
    pub method: VarianceTestMethod,
    /// Significance level (default: 0.05)
    pub alpha: f64,
}

impl Default for VarianceTestOptions {
    fn default() -> Self {
        Self {
            method: VarianceTestMethod::FTest,
            alpha: 0.05,
        }
    }
}

/// Test whether two samples have distinguishable variances
///
/// `reject_null` is true when the variances differ at `alpha`.
///
/// # Errors
/// `InvalidInput` if either sample has fewer than 2 observations, `alpha`
/// is outside (0, 1), or the statistic is undefined (zero variance where
/// the method divides by or takes the log of it).
pub fn variance_test(
    group1: &[f64],
    group2: &[f64],
    options: &VarianceTestOptions,
) -> StatsResult<TestResult> {
    check_alpha(options.alpha)?;
    let g1 = clean_sample(group1, 2, "Variance test", "group 1")?;
    let g2 = clean_sample(group2, 2, "Variance test", "group 2")?;

    let mut result = match options.method {
        VarianceTestMethod::RuleOfThumb => rule_of_thumb(&g1, &g2)?,
        VarianceTestMethod::FTest => f_test(&g1, &g2, options.alpha)?,
        VarianceTestMethod::Levene { center } => levene(&g1, &g2, center, options.alpha)?,
        VarianceTestMethod::Bartlett => bartlett(&g1, &g2, options.alpha)?,
    };

    if options.method != VarianceTestMethod::RuleOfThumb {
        result.reject_null = result.p_value < options.alpha;
        result.conclusion = format!(
            "{} (p value of {} = {:.8})",
            variance_conclusion(result.reject_null),
            result.method,
            result.p_value
        );
    }
    result.alpha = options.alpha;
    result.n1 = g1.len();
    result.n2 = g2.len();
    result.mean1 = mean_of(&g1);
    result.mean2 = mean_of(&g2);
    result.var1 = variance_of(&g1);
    result.var2 = variance_of(&g2);

    debug!(
        "{}: statistic={:.4}, p={:.6}, reject={}",
        result.method, result.statistic, result.p_value, result.reject_null
    );
    Ok(result)
}

/// Run every variance test on the same pair of samples
///
/// Results come back in the order rule of thumb, F-test, Levene
/// (median-centred), Bartlett. A method whose statistic is undefined for
/// these samples (e.g. a zero variance in a denominator) still gets a row,
/// with NaN statistic and p-value and an "Undefined" conclusion.
///
/// # Errors
/// `InvalidInput` if either sample has fewer than 2 observations or
/// `alpha` is outside (0, 1).
pub fn homogeneity_report(
    group1: &[f64],
    group2: &[f64],
    alpha: f64,
) -> StatsResult<Vec<TestResult>> {
    check_alpha(alpha)?;
    let g1 = clean_sample(group1, 2, "Variance test", "group 1")?;
    let g2 = clean_sample(group2, 2, "Variance test", "group 2")?;

    let report: Vec<TestResult> = [
        VarianceTestMethod::RuleOfThumb,
        VarianceTestMethod::FTest,
        VarianceTestMethod::Levene {
            center: LeveneCenter::Median,
        },
        VarianceTestMethod::Bartlett,
    ]
    .into_iter()
    .map(|method| {
        variance_test(&g1, &g2, &VarianceTestOptions { method, alpha }).unwrap_or_else(|e| {
            debug!("{}: {}", method.name(), e);
            TestResult {
                alpha,
                n1: g1.len(),
                n2: g2.len(),
                mean1: mean_of(&g1),
                mean2: mean_of(&g2),
                var1: variance_of(&g1),
                var2: variance_of(&g2),
                method: method.name().into(),
                conclusion: format!("Undefined: {e}"),
                ..TestResult::default()
            }
        })
    })
    .collect();

    Ok(report)
}

fn variance_conclusion(reject_null: bool) -> &'static str {
    if reject_null {
        "Variances are not equal"
    } else {
        "Variances are equal"
    }
}

fn rule_of_thumb(g1: &[f64], g2: &[f64]) -> StatsResult<TestResult> {
    let (v1, v2) = (variance_of(g1), variance_of(g2));
    let (max, min) = (v1.max(v2), v1.min(v2));
    if max == 0.0 {
        return Err(StatsError::InvalidInput(
            "Variance ratio is undefined when both groups have zero variance".into(),
        ));
    }

    let ratio = max / min;
    let reject_null = ratio > RULE_OF_THUMB_RATIO;
    Ok(TestResult {
        statistic: ratio,
        critical_value: RULE_OF_THUMB_RATIO,
        reject_null,
        method: VarianceTestMethod::RuleOfThumb.name().into(),
        conclusion: format!(
            "{} ({:.2} / {:.2} = {:.2})",
            variance_conclusion(reject_null),
            max,
            min,
            ratio
        ),
        ..TestResult::default()
    })
}

fn f_test(g1: &[f64], g2: &[f64], alpha: f64) -> StatsResult<TestResult> {
    let (v1, v2) = (variance_of(g1), variance_of(g2));
    if v2 == 0.0 {
        return Err(StatsError::InvalidInput(
            "F-test is undefined when group 2 has zero variance".into(),
        ));
    }

    let df1 = (g1.len() - 1) as f64;
    let df2 = (g2.len() - 1) as f64;
    let f = v1 / v2;
    let dist = FisherSnedecor::new(df1, df2).map_err(StatsError::distribution)?;
    let p_value = (2.0 * dist.cdf(f).min(dist.sf(f))).min(1.0);

    Ok(TestResult {
        statistic: f,
        p_value,
        df: df1,
        df2,
        critical_value: dist.inverse_cdf(1.0 - alpha / 2.0),
        method: VarianceTestMethod::FTest.name().into(),
        ..TestResult::default()
    })
}

fn levene(g1: &[f64], g2: &[f64], center: LeveneCenter, alpha: f64) -> StatsResult<TestResult> {
    let deviations = |g: &[f64]| -> Vec<f64> {
        let c = match center {
            LeveneCenter::Mean => mean_of(g),
            LeveneCenter::Median => median_of(&sorted(g)),
        };
        g.iter().map(|x| (x - c).abs()).collect()
    };
    let z1 = deviations(g1);
    let z2 = deviations(g2);

    let n = (z1.len() + z2.len()) as f64;
    let (zbar1, zbar2) = (mean_of(&z1), mean_of(&z2));
    let zbar = (z1.iter().sum::<f64>() + z2.iter().sum::<f64>()) / n;

    let between = z1.len() as f64 * (zbar1 - zbar).powi(2)
        + z2.len() as f64 * (zbar2 - zbar).powi(2);
    let within: f64 = z1.iter().map(|z| (z - zbar1).powi(2)).sum::<f64>()
        + z2.iter().map(|z| (z - zbar2).powi(2)).sum::<f64>();
    if within == 0.0 && between == 0.0 {
        return Err(StatsError::InvalidInput(
            "Levene's test is undefined when all absolute deviations are equal".into(),
        ));
    }

    // k = 2 groups: df_between = 1, df_within = N - 2
    let df2 = n - 2.0;
    let dist = FisherSnedecor::new(1.0, df2).map_err(StatsError::distribution)?;
    // Constant deviations within each group but different across groups,
    // e.g. any two-value groups with unequal spread
    let (w, p_value) = if within == 0.0 {
        (f64::INFINITY, 0.0)
    } else {
        let w = df2 * between / within;
        (w, dist.sf(w))
    };

    Ok(TestResult {
        statistic: w,
        p_value,
        df: 1.0,
        df2,
        critical_value: dist.inverse_cdf(1.0 - alpha),
        method: VarianceTestMethod::Levene { center }.name().into(),
        ..TestResult::default()
    })
}

fn bartlett(g1: &[f64], g2: &[f64], alpha: f64) -> StatsResult<TestResult> {
    let (v1, v2) = (variance_of(g1), variance_of(g2));
    if v1 == 0.0 || v2 == 0.0 {
        return Err(StatsError::InvalidInput(
            "Bartlett's test is undefined when a group has zero variance".into(),
        ));
    }

    let (f1, f2) = ((g1.len() - 1) as f64, (g2.len() - 1) as f64);
    let df_within = f1 + f2;
    let pooled = (f1 * v1 + f2 * v2) / df_within;

    // k = 2 groups
    let numerator = df_within * pooled.ln() - (f1 * v1.ln() + f2 * v2.ln());
    let correction = 1.0 + (1.0 / f1 + 1.0 / f2 - 1.0 / df_within) / 3.0;
    let t = numerator / correction;
    let dist = ChiSquared::new(1.0).map_err(StatsError::distribution)?;

    Ok(TestResult {
        statistic: t,
        p_value: dist.sf(t),
        df: 1.0,
        critical_value: dist.inverse_cdf(1.0 - alpha),
        pooled_variance: pooled,
        method: VarianceTestMethod::Bartlett.name().into(),
        ..TestResult::default()
    })
}
