use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

use crate::error::ExperimentError;
use crate::metrics::distance::Distance;

/// Symmetric matrix of pairwise distances between the rows of `patterns`.
///
/// The upper triangle is computed on the rayon pool and mirrored; the
/// diagonal is fixed at zero. Pairwise distances are the quadratic dominant
/// cost of neighbor-based consumers, and the metrics are stateless, so the
/// rows parallelize freely.
///
/// # Errors
/// The first error any pairwise evaluation reports.
pub fn distance_matrix<D>(
    patterns: ArrayView2<'_, f64>,
    metric: &D,
) -> Result<Array2<f64>, ExperimentError>
where
    D: Distance + ?Sized,
{
    let n = patterns.nrows();
    let triangle: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| -> Result<Vec<f64>, ExperimentError> {
            let mut row = Vec::with_capacity(n - i - 1);
            for j in (i + 1)..n {
                row.push(metric.compute(patterns.row(i), patterns.row(j))?);
            }
            Ok(row)
        })
        .collect::<Result<_, _>>()?;

    let mut matrix = Array2::<f64>::zeros((n, n));
    for (i, row) in triangle.iter().enumerate() {
        for (offset, &value) in row.iter().enumerate() {
            let j = i + 1 + offset;
            matrix[[i, j]] = value;
            matrix[[j, i]] = value;
        }
    }
    Ok(matrix)
}
