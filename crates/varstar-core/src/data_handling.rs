//! Immutable value types passed between the experiment's collaborators.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::ExperimentError;

/// Integer key uniquely naming one dataset subject.
pub type SubjectId = u64;

/// Class name a subject is labeled with.
pub type ClassName = String;

/// Key naming one cluster in a clustering result.
pub type ClusterId = usize;

/// Feature data attached to one subject in one view.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Flat feature vector
    Vector(Array1<f64>),
    /// 2-D feature array, such as a phase-folded light-curve grid
    Matrix(Array2<f64>),
}

impl Pattern {
    /// View of the underlying vector, or `None` for matrix patterns.
    pub fn as_vector(&self) -> Option<ArrayView1<'_, f64>> {
        match self {
            Pattern::Vector(values) => Some(values.view()),
            Pattern::Matrix(_) => None,
        }
    }

    /// View of the underlying matrix, or `None` for vector patterns.
    pub fn as_matrix(&self) -> Option<ArrayView2<'_, f64>> {
        match self {
            Pattern::Vector(_) => None,
            Pattern::Matrix(values) => Some(values.view()),
        }
    }

    /// Total number of stored elements.
    pub fn len(&self) -> usize {
        match self {
            Pattern::Vector(values) => values.len(),
            Pattern::Matrix(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Array1<f64>> for Pattern {
    fn from(values: Array1<f64>) -> Self {
        Pattern::Vector(values)
    }
}

impl From<Array2<f64>> for Pattern {
    fn from(values: Array2<f64>) -> Self {
        Pattern::Matrix(values)
    }
}

impl From<Vec<f64>> for Pattern {
    fn from(values: Vec<f64>) -> Self {
        Pattern::Vector(Array1::from_vec(values))
    }
}

/// One experiment's subjects: a description, the authoritative class-label
/// mapping, and any number of named views.
///
/// The label mapping decides which subjects exist. A view may cover only a
/// subset of them (consumers must handle missing view data explicitly), but
/// a view can never introduce a subject the labels do not know. Construction
/// is the only mutation point; once built, the record is read-only.
#[derive(Debug, Clone)]
pub struct Dataset {
    description: String,
    labels: BTreeMap<SubjectId, ClassName>,
    views: BTreeMap<String, BTreeMap<SubjectId, Pattern>>,
}

impl Dataset {
    /// Create a dataset carrying labels only; attach feature data with
    /// [`Dataset::with_view`].
    pub fn new(description: impl Into<String>, labels: BTreeMap<SubjectId, ClassName>) -> Self {
        Self {
            description: description.into(),
            labels,
            views: BTreeMap::new(),
        }
    }

    /// Attach a named view, consuming and returning the record.
    ///
    /// # Errors
    /// [`ExperimentError::UnlabeledSubject`] if the view contains an
    /// identifier absent from the label mapping.
    pub fn with_view(
        mut self,
        name: impl Into<String>,
        patterns: BTreeMap<SubjectId, Pattern>,
    ) -> Result<Self, ExperimentError> {
        let name = name.into();
        for id in patterns.keys() {
            if !self.labels.contains_key(id) {
                return Err(ExperimentError::UnlabeledSubject { id: *id, view: name });
            }
        }
        debug!(
            "view '{}': {} of {} subjects carry patterns",
            name,
            patterns.len(),
            self.labels.len()
        );
        self.views.insert(name, patterns);
        Ok(self)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn labels(&self) -> &BTreeMap<SubjectId, ClassName> {
        &self.labels
    }

    /// Class label of one subject.
    pub fn class_of(&self, id: SubjectId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    /// Identifiers of all labeled subjects.
    pub fn subject_ids(&self) -> BTreeSet<SubjectId> {
        self.labels.keys().copied().collect()
    }

    /// Number of labeled subjects.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Names of the attached views, in lexical order.
    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    pub fn view(&self, name: &str) -> Option<&BTreeMap<SubjectId, Pattern>> {
        self.views.get(name)
    }

    /// Pattern of one subject in one view, if present.
    pub fn pattern(&self, view: &str, id: SubjectId) -> Option<&Pattern> {
        self.views.get(view).and_then(|patterns| patterns.get(&id))
    }
}

/// Result of one hard-clustering invocation: per-cluster center matrices and
/// member identifier lists. Immutable once built; the core does not enforce
/// the partition invariant at construction, producers and tests can check it
/// with [`ClusterOutput::is_hard_partition`].
#[derive(Debug, Clone)]
pub struct ClusterOutput {
    centers: BTreeMap<ClusterId, Array2<f64>>,
    members: BTreeMap<ClusterId, Vec<SubjectId>>,
}

impl ClusterOutput {
    pub fn new(
        centers: BTreeMap<ClusterId, Array2<f64>>,
        members: BTreeMap<ClusterId, Vec<SubjectId>>,
    ) -> Self {
        Self { centers, members }
    }

    pub fn centers(&self) -> &BTreeMap<ClusterId, Array2<f64>> {
        &self.centers
    }

    pub fn members(&self) -> &BTreeMap<ClusterId, Vec<SubjectId>> {
        &self.members
    }

    pub fn center(&self, cluster: ClusterId) -> Option<&Array2<f64>> {
        self.centers.get(&cluster)
    }

    pub fn members_of(&self, cluster: ClusterId) -> Option<&[SubjectId]> {
        self.members.get(&cluster).map(Vec::as_slice)
    }

    pub fn cluster_count(&self) -> usize {
        self.members.len()
    }

    /// True when the member lists form a hard partition of `subjects`: no
    /// subject appears twice and the union is exactly `subjects`.
    pub fn is_hard_partition(&self, subjects: &BTreeSet<SubjectId>) -> bool {
        let mut seen = BTreeSet::new();
        for ids in self.members.values() {
            for id in ids {
                if !seen.insert(*id) {
                    return false;
                }
            }
        }
        seen == *subjects
    }
}
