use std::f64::consts::PI;

use ndarray::{Array2, ArrayView1, ArrayView2};
use statrs::statistics::Statistics;

use crate::error::ExperimentError;
use crate::math::CholeskyFactor;

/// Kernel density capability: a stateless mapping from a displacement
/// vector and an optional bandwidth matrix to a non-negative density.
pub trait Kernel: Send + Sync {
    /// Density at displacement `x`.
    ///
    /// `bandwidth` must be a symmetric positive-definite `d×d` matrix for
    /// `d = x.len()`; `None` selects the identity bandwidth.
    ///
    /// # Errors
    /// [`ExperimentError::DimensionMismatch`] on shape disagreement,
    /// [`ExperimentError::SingularBandwidth`] when the bandwidth is not
    /// positive-definite.
    fn evaluate(
        &self,
        x: ArrayView1<'_, f64>,
        bandwidth: Option<ArrayView2<'_, f64>>,
    ) -> Result<f64, ExperimentError>;

    /// Short name for logs and reports.
    fn name(&self) -> &str {
        "kernel"
    }
}

/// Multivariate Gaussian kernel
/// `(2π)^(−d/2) · |H|^(−1/2) · exp(−xᵀH⁻¹x / 2)`.
///
/// The Mahalanobis form and the normalizer are combined in log space and
/// exponentiated once, so small densities in high dimension degrade to a
/// clean zero instead of an intermediate overflow or NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianKernel;

impl Kernel for GaussianKernel {
    fn evaluate(
        &self,
        x: ArrayView1<'_, f64>,
        bandwidth: Option<ArrayView2<'_, f64>>,
    ) -> Result<f64, ExperimentError> {
        let d = x.len();
        if d == 0 {
            return Err(ExperimentError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let (mahalanobis, log_det) = match bandwidth {
            Some(h) => {
                if h.nrows() != d {
                    return Err(ExperimentError::DimensionMismatch {
                        expected: d,
                        actual: h.nrows(),
                    });
                }
                if h.ncols() != d {
                    return Err(ExperimentError::DimensionMismatch {
                        expected: d,
                        actual: h.ncols(),
                    });
                }
                let factor = CholeskyFactor::decompose(h)?;
                (factor.quadratic_form(x)?, factor.log_determinant())
            }
            None => (x.dot(&x), 0.0),
        };
        if !mahalanobis.is_finite() {
            return Err(ExperimentError::NonFiniteInput);
        }
        let log_density = -0.5 * (mahalanobis + d as f64 * (2.0 * PI).ln() + log_det);
        Ok(log_density.exp())
    }

    fn name(&self) -> &str {
        "gaussian"
    }
}

/// Scott's rule-of-thumb diagonal bandwidth for a sample of row vectors:
/// `H = diag((σ_j · n^(−1/(d+4)))²)` over per-column sample standard
/// deviations `σ_j`.
///
/// # Errors
/// [`ExperimentError::InvalidParameter`] for fewer than two samples,
/// [`ExperimentError::ZeroVariance`] when a column has no spread (the
/// resulting bandwidth would be singular),
/// [`ExperimentError::NonFiniteInput`] for NaN or infinite samples.
pub fn scotts_rule_bandwidth(
    samples: ArrayView2<'_, f64>,
) -> Result<Array2<f64>, ExperimentError> {
    let n = samples.nrows();
    let d = samples.ncols();
    if n < 2 {
        return Err(ExperimentError::InvalidParameter {
            message: format!("bandwidth estimation needs at least 2 samples, got {}", n),
        });
    }
    if d == 0 {
        return Err(ExperimentError::DimensionMismatch {
            expected: 1,
            actual: 0,
        });
    }
    let factor = (n as f64).powf(-1.0 / (d as f64 + 4.0));
    let mut bandwidth = Array2::<f64>::zeros((d, d));
    for j in 0..d {
        let sigma = samples.column(j).iter().std_dev();
        if !sigma.is_finite() {
            return Err(ExperimentError::NonFiniteInput);
        }
        if sigma == 0.0 {
            return Err(ExperimentError::ZeroVariance);
        }
        bandwidth[[j, j]] = (sigma * factor).powi(2);
    }
    Ok(bandwidth)
}
