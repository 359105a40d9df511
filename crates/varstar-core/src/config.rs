use serde::{Deserialize, Serialize};

use crate::error::ExperimentError;

/// Parameters controlling one stratified split.
///
/// The random source is deliberately not part of the configuration: callers
/// pass their own seeded generator to [`crate::split::StratifiedSplit::new`],
/// so reruns stay reproducible without hidden global state.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SplitConfig {
    /// Fraction of each class held out for testing, strictly inside (0, 1)
    pub holdout_fraction: f64,
    /// Number of cross-validation folds carved from the training set
    pub fold_count: usize,
}

impl SplitConfig {
    pub fn new(holdout_fraction: f64, fold_count: usize) -> Self {
        Self {
            holdout_fraction,
            fold_count,
        }
    }

    /// Check both parameters against their documented domains.
    ///
    /// # Errors
    /// [`ExperimentError::InvalidParameter`] when the holdout fraction is
    /// not strictly inside (0, 1) or the fold count is below 2.
    pub fn validate(&self) -> Result<(), ExperimentError> {
        if !self.holdout_fraction.is_finite()
            || self.holdout_fraction <= 0.0
            || self.holdout_fraction >= 1.0
        {
            return Err(ExperimentError::InvalidParameter {
                message: format!(
                    "holdout_fraction must lie strictly inside (0, 1), got {}",
                    self.holdout_fraction
                ),
            });
        }
        if self.fold_count < 2 {
            return Err(ExperimentError::InvalidParameter {
                message: format!("fold_count must be at least 2, got {}", self.fold_count),
            });
        }
        Ok(())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            holdout_fraction: 0.25,
            fold_count: 5,
        }
    }
}
