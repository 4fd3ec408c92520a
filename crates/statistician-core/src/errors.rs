use thiserror::Error;

/// Errors that can occur during statistical computations
///
/// Every failure in this crate is a rejected input: an empty or too-short
/// sample, or a parameter outside its domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StatsError {
    /// Sample has no observations after NaN filtering
    pub(crate) fn empty(field: &str) -> Self {
        StatsError::InvalidInput(format!("{field} cannot be empty"))
    }

    /// Sample is shorter than the computation needs
    pub(crate) fn too_short(what: &str, field: &str, needed: usize, got: usize) -> Self {
        StatsError::InvalidInput(format!(
            "{what} requires at least {needed} observations in {field} (got {got})"
        ))
    }

    /// Confidence level outside (0, 1)
    pub(crate) fn confidence(value: f64) -> Self {
        StatsError::InvalidInput(format!(
            "Invalid confidence level: {value} (must be in (0, 1))"
        ))
    }

    /// Wrap an error raised while constructing a distribution
    pub(crate) fn distribution(e: impl std::fmt::Display) -> Self {
        StatsError::InvalidInput(format!("distribution parameters rejected: {e}"))
    }
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;
