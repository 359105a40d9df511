use std::collections::BTreeMap;

use crate::data_handling::{Dataset, Pattern, SubjectId};
use crate::error::ExperimentError;

/// One view's contribution to a combined multi-view distance: the two
/// patterns under comparison and the view's weight.
#[derive(Debug, Clone, Copy)]
pub struct ViewTerm<'a> {
    pub a: &'a Pattern,
    pub b: &'a Pattern,
    pub weight: f64,
}

impl<'a> ViewTerm<'a> {
    pub fn new(a: &'a Pattern, b: &'a Pattern, weight: f64) -> Self {
        Self { a, b, weight }
    }
}

/// Weighted multi-view distance `Σ_v weight_v · distance(a_v, b_v)`.
///
/// `distance` is the caller's per-view metric and sees each term's raw
/// patterns. Weights are applied as given; normalization is the caller's
/// responsibility.
pub fn weighted_distance<F>(
    terms: &[ViewTerm<'_>],
    mut distance: F,
) -> Result<f64, ExperimentError>
where
    F: FnMut(&Pattern, &Pattern) -> Result<f64, ExperimentError>,
{
    let mut total = 0.0;
    for term in terms {
        total += term.weight * distance(term.a, term.b)?;
    }
    Ok(total)
}

/// Build the per-view term list for two subjects of `dataset`, one term per
/// entry of `weights` (view name → weight), in lexical view order.
///
/// # Errors
/// [`ExperimentError::InvalidParameter`] for a view name the dataset does
/// not carry, [`ExperimentError::MissingPattern`] when either subject lacks
/// data in a requested view.
pub fn subject_view_terms<'a>(
    dataset: &'a Dataset,
    weights: &BTreeMap<String, f64>,
    a: SubjectId,
    b: SubjectId,
) -> Result<Vec<ViewTerm<'a>>, ExperimentError> {
    let mut terms = Vec::with_capacity(weights.len());
    for (view, &weight) in weights {
        let patterns = dataset
            .view(view)
            .ok_or_else(|| ExperimentError::InvalidParameter {
                message: format!("dataset has no view named '{}'", view),
            })?;
        let pattern_a = patterns
            .get(&a)
            .ok_or(ExperimentError::MissingPattern { id: a })?;
        let pattern_b = patterns
            .get(&b)
            .ok_or(ExperimentError::MissingPattern { id: b })?;
        terms.push(ViewTerm::new(pattern_a, pattern_b, weight));
    }
    Ok(terms)
}
