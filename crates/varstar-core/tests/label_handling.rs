//! Integration tests for label counting and grouping.

use std::collections::BTreeMap;

use varstar_core::data_handling::{ClassName, SubjectId};
use varstar_core::error::ExperimentError;
use varstar_core::labels::{
    count_unique_classes, group_by_class, sort_into_classes, sort_into_maps,
};

fn survey_labels() -> BTreeMap<SubjectId, ClassName> {
    // 3 RRLyr, 2 Cepheid, 1 Mira, interleaved identifiers
    let mut labels = BTreeMap::new();
    labels.insert(3, "RRLyr".to_string());
    labels.insert(11, "Cepheid".to_string());
    labels.insert(4, "RRLyr".to_string());
    labels.insert(7, "Mira".to_string());
    labels.insert(1, "Cepheid".to_string());
    labels.insert(9, "RRLyr".to_string());
    labels
}

fn survey_patterns() -> BTreeMap<SubjectId, Vec<f64>> {
    survey_labels()
        .keys()
        .map(|id| (*id, vec![*id as f64, 0.5]))
        .collect()
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

#[test]
fn counts_cover_every_class() {
    let counts = count_unique_classes(&survey_labels());
    assert_eq!(counts.len(), 3);
    assert_eq!(counts["RRLyr"], 3);
    assert_eq!(counts["Cepheid"], 2);
    assert_eq!(counts["Mira"], 1);
}

#[test]
fn counts_sum_to_total() {
    let labels = survey_labels();
    let counts = count_unique_classes(&labels);
    assert_eq!(counts.values().sum::<usize>(), labels.len());
}

#[test]
fn counts_on_empty_labels() {
    let counts = count_unique_classes(&BTreeMap::new());
    assert!(counts.is_empty());
}

// ---------------------------------------------------------------------------
// Identifier grouping
// ---------------------------------------------------------------------------

#[test]
fn groups_identifiers_ascending_within_class() {
    let groups = group_by_class(&survey_labels());
    assert_eq!(groups["RRLyr"], vec![3, 4, 9]);
    assert_eq!(groups["Cepheid"], vec![1, 11]);
    assert_eq!(groups["Mira"], vec![7]);
}

// ---------------------------------------------------------------------------
// Pattern grouping
// ---------------------------------------------------------------------------

#[test]
fn sorts_patterns_into_classes() {
    let patterns = survey_patterns();
    let classes = sort_into_classes(&patterns, &survey_labels()).unwrap();
    assert_eq!(classes.len(), 3);
    assert_eq!(classes["RRLyr"].len(), 3);
    assert_eq!(classes["Cepheid"].len(), 2);
    // Ascending-identifier traversal: RRLyr patterns for ids 3, 4, 9
    assert_eq!(classes["RRLyr"][0], &vec![3.0, 0.5]);
    assert_eq!(classes["RRLyr"][2], &vec![9.0, 0.5]);
}

#[test]
fn sorting_is_deterministic() {
    let patterns = survey_patterns();
    let labels = survey_labels();
    let first = sort_into_classes(&patterns, &labels).unwrap();
    let second = sort_into_classes(&patterns, &labels).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_pattern_is_fatal() {
    let mut patterns = survey_patterns();
    patterns.remove(&7);
    let err = sort_into_classes(&patterns, &survey_labels()).unwrap_err();
    assert_eq!(err, ExperimentError::MissingPattern { id: 7 });
}

#[test]
fn unlabeled_patterns_are_ignored() {
    let mut patterns = survey_patterns();
    patterns.insert(99, vec![99.0, 0.5]);
    let classes = sort_into_classes(&patterns, &survey_labels()).unwrap();
    let grouped: usize = classes.values().map(Vec::len).sum();
    assert_eq!(grouped, 6);
}

#[test]
fn maps_retain_identifiers() {
    let patterns = survey_patterns();
    let maps = sort_into_maps(&patterns, &survey_labels()).unwrap();
    assert_eq!(
        maps["RRLyr"].keys().copied().collect::<Vec<_>>(),
        vec![3, 4, 9]
    );
    assert_eq!(maps["Mira"][&7], &vec![7.0, 0.5]);
}

#[test]
fn maps_report_missing_pattern() {
    let mut patterns = survey_patterns();
    patterns.remove(&1);
    let err = sort_into_maps(&patterns, &survey_labels()).unwrap_err();
    assert_eq!(err, ExperimentError::MissingPattern { id: 1 });
}
