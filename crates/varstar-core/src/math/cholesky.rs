use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::ExperimentError;

/// Pivots at or below this fraction of the largest diagonal magnitude mark
/// the matrix as singular.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Lower-triangular Cholesky factor `L` of a symmetric positive-definite
/// matrix `A = L·Lᵀ`.
///
/// Only the lower triangle of the input is read; symmetry is the caller's
/// contract. The factorization doubles as the positive-definiteness check:
/// any zero, negative, or non-finite pivot fails with
/// [`ExperimentError::SingularBandwidth`].
#[derive(Debug, Clone)]
pub struct CholeskyFactor {
    lower: Array2<f64>,
}

impl CholeskyFactor {
    /// Factor a square matrix.
    ///
    /// # Errors
    /// [`ExperimentError::DimensionMismatch`] for a non-square or empty
    /// input, [`ExperimentError::SingularBandwidth`] when the matrix is
    /// singular, indefinite, or numerically too close to singular.
    pub fn decompose(matrix: ArrayView2<'_, f64>) -> Result<Self, ExperimentError> {
        let n = matrix.nrows();
        if matrix.ncols() != n {
            return Err(ExperimentError::DimensionMismatch {
                expected: n,
                actual: matrix.ncols(),
            });
        }
        if n == 0 {
            return Err(ExperimentError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }

        let max_diag = (0..n)
            .map(|i| matrix[[i, i]].abs())
            .fold(0.0_f64, f64::max);
        if !max_diag.is_finite() || max_diag == 0.0 {
            return Err(ExperimentError::SingularBandwidth { dimension: n });
        }
        let tolerance = PIVOT_TOLERANCE * max_diag;

        let mut lower = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in 0..=i {
                let mut sum = matrix[[i, j]];
                for p in 0..j {
                    sum -= lower[[i, p]] * lower[[j, p]];
                }
                if i == j {
                    if !sum.is_finite() || sum <= tolerance {
                        return Err(ExperimentError::SingularBandwidth { dimension: n });
                    }
                    lower[[i, j]] = sum.sqrt();
                } else {
                    lower[[i, j]] = sum / lower[[j, j]];
                }
            }
        }
        Ok(Self { lower })
    }

    pub fn dimension(&self) -> usize {
        self.lower.nrows()
    }

    /// Solve `L·z = b` by forward substitution.
    ///
    /// # Errors
    /// [`ExperimentError::DimensionMismatch`] when `b` does not match the
    /// factor's dimension.
    pub fn forward_solve(&self, b: ArrayView1<'_, f64>) -> Result<Array1<f64>, ExperimentError> {
        let n = self.dimension();
        if b.len() != n {
            return Err(ExperimentError::DimensionMismatch {
                expected: n,
                actual: b.len(),
            });
        }
        let mut z = Array1::<f64>::zeros(n);
        for i in 0..n {
            let mut sum = b[i];
            for j in 0..i {
                sum -= self.lower[[i, j]] * z[j];
            }
            z[i] = sum / self.lower[[i, i]];
        }
        Ok(z)
    }

    /// Quadratic form `bᵀ·A⁻¹·b` for `A = L·Lᵀ`: with `z = L⁻¹·b` the form
    /// equals `z·z`, so one forward solve suffices.
    pub fn quadratic_form(&self, b: ArrayView1<'_, f64>) -> Result<f64, ExperimentError> {
        let z = self.forward_solve(b)?;
        Ok(z.dot(&z))
    }

    /// `ln|A|`, twice the log-sum of the factor diagonal.
    pub fn log_determinant(&self) -> f64 {
        2.0 * (0..self.dimension())
            .map(|i| self.lower[[i, i]].ln())
            .sum::<f64>()
    }
}
