use ndarray::ArrayView1;

use crate::error::ExperimentError;

/// Distance capability: a stateless, side-effect-free mapping from two
/// equal-length vectors to a non-negative scalar.
pub trait Distance: Send + Sync {
    /// Distance between `a` and `b`.
    ///
    /// # Errors
    /// [`ExperimentError::DimensionMismatch`] when the lengths differ;
    /// implementations add their own numerical preconditions.
    fn compute(
        &self,
        a: ArrayView1<'_, f64>,
        b: ArrayView1<'_, f64>,
    ) -> Result<f64, ExperimentError>;

    /// Short name for logs and reports.
    fn name(&self) -> &str {
        "distance"
    }
}

/// Correlation distance `1 − r`, with `r` the Pearson correlation of the two
/// vectors. Ranges over `[0, 2]`: `0` for perfectly correlated inputs, `2`
/// for perfectly anti-correlated ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationDistance;

impl Distance for CorrelationDistance {
    /// # Errors
    /// Besides the length check, [`ExperimentError::ZeroVariance`] when
    /// either vector is constant (or shorter than two elements, which
    /// leaves no spread to correlate) and
    /// [`ExperimentError::NonFiniteInput`] for NaN or infinite values.
    fn compute(
        &self,
        a: ArrayView1<'_, f64>,
        b: ArrayView1<'_, f64>,
    ) -> Result<f64, ExperimentError> {
        if a.len() != b.len() {
            return Err(ExperimentError::DimensionMismatch {
                expected: a.len(),
                actual: b.len(),
            });
        }
        if a.len() < 2 {
            return Err(ExperimentError::ZeroVariance);
        }
        let n = a.len() as f64;
        let mean_a = a.sum() / n;
        let mean_b = b.sum() / n;
        let mut covariance = 0.0;
        let mut var_a = 0.0;
        let mut var_b = 0.0;
        for (x, y) in a.iter().zip(b.iter()) {
            let dx = x - mean_a;
            let dy = y - mean_b;
            covariance += dx * dy;
            var_a += dx * dx;
            var_b += dy * dy;
        }
        if var_a == 0.0 || var_b == 0.0 {
            return Err(ExperimentError::ZeroVariance);
        }
        let r = covariance / (var_a.sqrt() * var_b.sqrt());
        if !r.is_finite() {
            return Err(ExperimentError::NonFiniteInput);
        }
        // Rounding can push |r| a hair past 1; keep the distance in [0, 2].
        Ok(1.0 - r.clamp(-1.0, 1.0))
    }

    fn name(&self) -> &str {
        "correlation"
    }
}

/// Plain Euclidean distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl Distance for EuclideanDistance {
    /// # Errors
    /// Besides the length check, [`ExperimentError::NonFiniteInput`] for
    /// NaN or infinite values.
    fn compute(
        &self,
        a: ArrayView1<'_, f64>,
        b: ArrayView1<'_, f64>,
    ) -> Result<f64, ExperimentError> {
        if a.len() != b.len() {
            return Err(ExperimentError::DimensionMismatch {
                expected: a.len(),
                actual: b.len(),
            });
        }
        let mut sum = 0.0;
        for (x, y) in a.iter().zip(b.iter()) {
            let d = x - y;
            sum += d * d;
        }
        if !sum.is_finite() {
            return Err(ExperimentError::NonFiniteInput);
        }
        Ok(sum.sqrt())
    }

    fn name(&self) -> &str {
        "euclidean"
    }
}
