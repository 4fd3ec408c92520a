//! Parametric tests of location
//!
//! - Two-sample t-test (Student pooled, Welch)
//! - Paired t-test

use super::{check_alpha, students_t, t_critical, t_p_values, Alternative, TestResult};
use crate::descriptive::{clean_sample, mean_of, variance_of};
use crate::{StatsError, StatsResult};
use log::debug;

/// Options for t-tests
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TTestOptions {
    /// Assume equal variances (Student's pooled test); `false` selects Welch
    pub equal_variance: bool,
    /// Significance level (default: 0.05)
    pub alpha: f64,
    /// Hypothesized mean difference (default: 0.0)
    pub mu: f64,
    /// Alternative hypothesis
    pub alternative: Alternative,
}

impl Default for TTestOptions {
    fn default() -> Self {
        Self {
            equal_variance: true,
            alpha: 0.05,
            mu: 0.0,
            alternative: Alternative::TwoSided,
        }
    }
}

/// Two-sample t-test for independent samples
///
/// With `equal_variance` the pooled variance and `n1 + n2 - 2` degrees of
/// freedom are used; otherwise Welch's standard error and the
/// Welch-Satterthwaite degrees of freedom.
///
/// # Arguments
/// * `group1` - First sample data
/// * `group2` - Second sample data
/// * `options` - Test options
///
/// # Returns
/// Test result with t-statistic, p-value, df and critical value. The
/// statistic is negative when group 1 has the smaller mean.
pub fn t_test(group1: &[f64], group2: &[f64], options: &TTestOptions) -> StatsResult<TestResult> {
    check_alpha(options.alpha)?;
    let g1 = clean_sample(group1, 2, "t-test", "group 1")?;
    let g2 = clean_sample(group2, 2, "t-test", "group 2")?;

    let (n1, n2) = (g1.len() as f64, g2.len() as f64);
    let (mean1, mean2) = (mean_of(&g1), mean_of(&g2));
    let (var1, var2) = (variance_of(&g1), variance_of(&g2));

    let (se, df, pooled_variance) = if options.equal_variance {
        let df = n1 + n2 - 2.0;
        let pooled = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
        ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df, pooled)
    } else {
        let (a, b) = (var1 / n1, var2 / n2);
        let df = (a + b).powi(2) / (a * a / (n1 - 1.0) + b * b / (n2 - 1.0));
        ((a + b).sqrt(), df, f64::NAN)
    };

    if !(se > 0.0) {
        return Err(StatsError::InvalidInput(
            "t-test is undefined when both groups have zero variance".into(),
        ));
    }

    let t = (mean1 - mean2 - options.mu) / se;
    let dist = students_t(df)?;
    let (p_value, p_value_one_tail) = t_p_values(&dist, t, options.alternative);
    let reject_null = p_value < options.alpha;
    let method = if options.equal_variance {
        "Student two-sample t-test"
    } else {
        "Welch two-sample t-test"
    };
    debug!("{method}: t={t:.4}, df={df:.2}, p={p_value:.6}, reject={reject_null}");

    Ok(TestResult {
        statistic: t,
        p_value,
        p_value_one_tail,
        df,
        critical_value: t_critical(&dist, options.alpha, options.alternative),
        alpha: options.alpha,
        reject_null,
        n1: g1.len(),
        n2: g2.len(),
        mean1,
        mean2,
        var1,
        var2,
        pooled_variance,
        mu: options.mu,
        alternative: options.alternative,
        method: method.into(),
        conclusion: location_conclusion(reject_null),
        ..TestResult::default()
    })
}

/// Paired t-test
///
/// Tests the mean of the differences `group1[i] - group2[i]` against `mu`
/// with `n - 1` degrees of freedom. Pairs with a NaN on either side are
/// dropped. `equal_variance` is ignored.
pub fn paired_t_test(
    group1: &[f64],
    group2: &[f64],
    options: &TTestOptions,
) -> StatsResult<TestResult> {
    check_alpha(options.alpha)?;
    if group1.len() != group2.len() {
        return Err(StatsError::InvalidInput(format!(
            "Paired t-test requires equal lengths (group 1 has {}, group 2 has {})",
            group1.len(),
            group2.len()
        )));
    }

    let (x, y): (Vec<f64>, Vec<f64>) = group1
        .iter()
        .zip(group2)
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(a, b)| (*a, *b))
        .unzip();
    let diffs: Vec<f64> = x.iter().zip(&y).map(|(a, b)| a - b).collect();
    let diffs = clean_sample(&diffs, 2, "Paired t-test", "pairs")?;

    let n = diffs.len() as f64;
    let se = (variance_of(&diffs) / n).sqrt();
    if !(se > 0.0) {
        return Err(StatsError::InvalidInput(
            "Paired t-test is undefined when all differences are equal".into(),
        ));
    }

    let df = n - 1.0;
    let t = (mean_of(&diffs) - options.mu) / se;
    let dist = students_t(df)?;
    let (p_value, p_value_one_tail) = t_p_values(&dist, t, options.alternative);
    let reject_null = p_value < options.alpha;
    debug!("Paired t-test: t={t:.4}, df={df}, p={p_value:.6}, reject={reject_null}");

    Ok(TestResult {
        statistic: t,
        p_value,
        p_value_one_tail,
        df,
        critical_value: t_critical(&dist, options.alpha, options.alternative),
        alpha: options.alpha,
        reject_null,
        n1: x.len(),
        n2: y.len(),
        mean1: mean_of(&x),
        mean2: mean_of(&y),
        var1: variance_of(&x),
        var2: variance_of(&y),
        mu: options.mu,
        correlation: pearson(&x, &y),
        alternative: options.alternative,
        method: "Paired t-test".into(),
        conclusion: location_conclusion(reject_null),
        ..TestResult::default()
    })
}

fn location_conclusion(reject_null: bool) -> String {
    if reject_null {
        "Means are significantly different".into()
    } else {
        "No significant difference between means".into()
    }
}

/// Pearson correlation; NaN when either side is constant
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (mx, my) = (mean_of(x), mean_of(y));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    sxy / (sxx * syy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_t_test_pooled() {
        let g1 = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let g2 = vec![2.0, 3.0, 4.0, 5.0, 6.0];
        let result = t_test(&g1, &g2, &TTestOptions::default()).unwrap();

        assert!(result.statistic < 0.0); // g1 mean < g2 mean
        assert_relative_eq!(result.statistic, -1.0, epsilon = 1e-12);
        assert_eq!(result.df, 8.0);
        assert_relative_eq!(result.pooled_variance, 2.5, epsilon = 1e-12);
        assert_relative_eq!(result.p_value, 0.3466, epsilon = 1e-4);
        assert_relative_eq!(result.p_value_one_tail, 0.1733, epsilon = 1e-4);
        assert_relative_eq!(result.critical_value, 2.306, epsilon = 1e-3);
        assert!(!result.reject_null);
        assert_eq!(result.n(), 10);
    }

    #[test]
    fn test_t_test_welch() {
        let g1 = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let g2 = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let opts = TTestOptions {
            equal_variance: false,
            ..Default::default()
        };
        let result = t_test(&g1, &g2, &opts).unwrap();

        assert!(result.statistic < 0.0);
        assert_relative_eq!(result.statistic, -3.0 / 2.5_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(result.df, 6.25 / 1.0625, epsilon = 1e-12);
        assert!(result.pooled_variance.is_nan());
        // R: t.test(g1, g2, var.equal = FALSE) gives p = 0.1075
        assert_relative_eq!(result.p_value, 0.107531, epsilon = 1e-5);
        assert!(!result.reject_null);
    }

    #[test]
    fn test_t_test_one_sided() {
        let g1 = vec![5.1, 5.3, 4.9, 5.6, 5.2, 5.4];
        let g2 = vec![4.1, 4.3, 4.0, 4.4, 4.2, 3.9];
        let greater = TTestOptions {
            alternative: Alternative::Greater,
            ..Default::default()
        };
        let less = TTestOptions {
            alternative: Alternative::Less,
            ..Default::default()
        };
        let r_greater = t_test(&g1, &g2, &greater).unwrap();
        let r_less = t_test(&g1, &g2, &less).unwrap();

        assert!(r_greater.reject_null);
        assert!(!r_less.reject_null);
        assert_relative_eq!(r_greater.p_value + r_less.p_value, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_t_test_hypothesized_difference() {
        let g1 = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let g2 = vec![2.0, 3.0, 4.0, 5.0, 6.0];
        let opts = TTestOptions {
            mu: -1.0,
            ..Default::default()
        };
        let result = t_test(&g1, &g2, &opts).unwrap();
        assert_relative_eq!(result.statistic, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.p_value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_t_test_invalid_input() {
        let g = vec![1.0, 2.0, 3.0];
        assert!(t_test(&[], &g, &TTestOptions::default()).is_err());
        assert!(t_test(&g, &[1.0], &TTestOptions::default()).is_err());
        assert!(t_test(&[1.0, 1.0], &[2.0, 2.0], &TTestOptions::default()).is_err());

        let bad_alpha = TTestOptions {
            alpha: 1.5,
            ..Default::default()
        };
        assert!(t_test(&g, &g, &bad_alpha).is_err());
    }

    #[test]
    fn test_paired_t_test() {
        let before = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let after = vec![2.0, 3.5, 3.9, 5.2, 6.1];
        let result = paired_t_test(&before, &after, &TTestOptions::default()).unwrap();

        assert!(result.statistic < 0.0);
        assert_eq!(result.df, 4.0);
        assert!(result.reject_null);
        assert!(result.correlation > 0.9);
    }

    #[test]
    fn test_paired_t_test_length_mismatch() {
        let result = paired_t_test(&[1.0, 2.0, 3.0], &[1.0, 2.0], &TTestOptions::default());
        assert!(result.is_err());
    }
}
