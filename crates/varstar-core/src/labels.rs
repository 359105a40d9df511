//! Grouping and counting of subjects by class label.

use std::collections::BTreeMap;

use crate::data_handling::{ClassName, SubjectId};
use crate::error::ExperimentError;

/// Count how many subjects carry each class label.
///
/// Every identifier in `labels` is counted exactly once and every distinct
/// class present appears in the result, so the counts sum to `labels.len()`.
pub fn count_unique_classes(
    labels: &BTreeMap<SubjectId, ClassName>,
) -> BTreeMap<ClassName, usize> {
    let mut counts = BTreeMap::new();
    for class in labels.values() {
        *counts.entry(class.clone()).or_insert(0) += 1;
    }
    counts
}

/// Group subject identifiers by class, ascending within each class.
pub fn group_by_class(
    labels: &BTreeMap<SubjectId, ClassName>,
) -> BTreeMap<ClassName, Vec<SubjectId>> {
    let mut groups: BTreeMap<ClassName, Vec<SubjectId>> = BTreeMap::new();
    for (id, class) in labels {
        groups.entry(class.clone()).or_default().push(*id);
    }
    groups
}

/// Group patterns by the class of their subject.
///
/// Ordering within each class follows the ascending-identifier label
/// traversal, so repeated calls yield identical sequences. Patterns whose
/// identifier carries no label are ignored; the label mapping is
/// authoritative.
///
/// # Errors
/// [`ExperimentError::MissingPattern`] if a labeled identifier has no entry
/// in `patterns`.
pub fn sort_into_classes<'a, P>(
    patterns: &'a BTreeMap<SubjectId, P>,
    labels: &BTreeMap<SubjectId, ClassName>,
) -> Result<BTreeMap<ClassName, Vec<&'a P>>, ExperimentError> {
    let mut classes: BTreeMap<ClassName, Vec<&'a P>> = BTreeMap::new();
    for (id, class) in labels {
        let pattern = patterns
            .get(id)
            .ok_or(ExperimentError::MissingPattern { id: *id })?;
        classes.entry(class.clone()).or_default().push(pattern);
    }
    Ok(classes)
}

/// Like [`sort_into_classes`] but retains identifier keys for back-reference.
///
/// # Errors
/// [`ExperimentError::MissingPattern`] if a labeled identifier has no entry
/// in `patterns`.
pub fn sort_into_maps<'a, P>(
    patterns: &'a BTreeMap<SubjectId, P>,
    labels: &BTreeMap<SubjectId, ClassName>,
) -> Result<BTreeMap<ClassName, BTreeMap<SubjectId, &'a P>>, ExperimentError> {
    let mut maps: BTreeMap<ClassName, BTreeMap<SubjectId, &'a P>> = BTreeMap::new();
    for (id, class) in labels {
        let pattern = patterns
            .get(id)
            .ok_or(ExperimentError::MissingPattern { id: *id })?;
        maps.entry(class.clone()).or_default().insert(*id, pattern);
    }
    Ok(maps)
}
