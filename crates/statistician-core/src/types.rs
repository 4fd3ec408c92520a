//! Shared option and result types

/// Rule used to flag outliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutlierMethod {
    /// Distance from the mean in sample standard deviations
    ZScore,
    /// Distance outside the interquartile fences
    #[default]
    Iqr,
}

impl OutlierMethod {
    /// Conventional threshold: 3 standard deviations, or 1.5 IQRs
    pub fn default_threshold(self) -> f64 {
        match self {
            OutlierMethod::ZScore => 3.0,
            OutlierMethod::Iqr => 1.5,
        }
    }

    /// Smallest sample the method's statistic can be computed from
    pub fn min_observations(self) -> usize {
        match self {
            OutlierMethod::ZScore => 2,
            OutlierMethod::Iqr => 4,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            OutlierMethod::ZScore => "z-score filter",
            OutlierMethod::Iqr => "IQR filter",
        }
    }
}

/// Interval estimate for a population parameter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalResult {
    /// Lower bound
    pub lower: f64,
    /// Upper bound (always >= lower)
    pub upper: f64,
    /// Point estimate the interval is built around
    pub estimate: f64,
    /// Confidence level used
    pub confidence_level: f64,
    /// Method name
    pub method: String,
}

impl IntervalResult {
    /// Whether `value` lies within the closed interval
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Distance between the bounds
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Half-width of the interval
    pub fn margin(&self) -> f64 {
        self.width() / 2.0
    }

    /// Bounds as a `(lower, upper)` pair
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }
}

/// Options for mean confidence intervals
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceIntervalOptions {
    /// Confidence level (default: 0.95)
    pub confidence_level: Option<f64>,
    /// Known population standard deviation; switches to the normal quantile
    pub pop_std: Option<f64>,
}

/// Options for bootstrap resampling
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BootstrapOptions {
    /// Number of resamples
    pub n_resamples: usize,
    /// Optional seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            n_resamples: 10000,
            seed: None,
        }
    }
}
