//! Stratified train/test partitioning and cross-validation fold assignment.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SplitConfig;
use crate::data_handling::{ClassName, SubjectId};
use crate::error::ExperimentError;
use crate::labels::group_by_class;

/// Eagerly computed stratified split of one experiment's subjects.
///
/// Construction performs the whole split; every accessor afterwards is a
/// pure read of precomputed sets and consumes no further randomness.
///
/// Guarantees, for any input accepted by [`StratifiedSplit::new`]:
/// - `training` and `testing` are disjoint and their union is the full
///   identifier set;
/// - the folds are pairwise disjoint and their union is `training`;
/// - each class contributes to `testing` and to every fold in proportion to
///   its share of the full set, up to rounding;
/// - the same labels, configuration, and seed reproduce the split
///   bit-identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StratifiedSplit {
    training: BTreeSet<SubjectId>,
    testing: BTreeSet<SubjectId>,
    folds: Vec<BTreeSet<SubjectId>>,
}

impl StratifiedSplit {
    /// Split `labels` into training/testing sets and `config.fold_count`
    /// cross-validation folds.
    ///
    /// Test membership is drawn per class without replacement: a class with
    /// `n` members contributes `round(holdout_fraction * n)` subjects to
    /// `testing`, with half-up rounding applied identically to every class.
    /// The class's remaining members are shuffled and dealt into folds as
    /// contiguous chunks whose sizes differ by at most one, the first
    /// `n mod k` chunks taking the extra subject.
    ///
    /// All validation runs before any randomness is drawn, so a failed
    /// construction leaves `rng` untouched.
    ///
    /// # Errors
    /// - [`ExperimentError::InvalidParameter`] for an out-of-domain
    ///   configuration or an empty label mapping
    /// - [`ExperimentError::EmptyHoldout`] if the fraction selects zero
    ///   test subjects for some class
    /// - [`ExperimentError::ClassTooSmall`] if a class's training remainder
    ///   cannot fill every fold
    pub fn new<R: Rng + ?Sized>(
        labels: &BTreeMap<SubjectId, ClassName>,
        config: &SplitConfig,
        rng: &mut R,
    ) -> Result<Self, ExperimentError> {
        config.validate()?;
        if labels.is_empty() {
            return Err(ExperimentError::InvalidParameter {
                message: "label mapping is empty".to_string(),
            });
        }

        let fraction = config.holdout_fraction;
        let fold_count = config.fold_count;
        let by_class = group_by_class(labels);

        for (class, members) in &by_class {
            let test_count = round_half_up(fraction * members.len() as f64);
            if test_count == 0 {
                return Err(ExperimentError::EmptyHoldout {
                    class: class.clone(),
                    members: members.len(),
                    fraction,
                });
            }
            if members.len() - test_count < fold_count {
                return Err(ExperimentError::ClassTooSmall {
                    class: class.clone(),
                    members: members.len() - test_count,
                    folds: fold_count,
                });
            }
        }

        // First pass: per-class holdout selection.
        let mut testing = BTreeSet::new();
        let mut training_by_class: BTreeMap<&ClassName, Vec<SubjectId>> = BTreeMap::new();
        for (class, members) in &by_class {
            let mut shuffled = members.clone();
            shuffled.shuffle(rng);
            let test_count = round_half_up(fraction * shuffled.len() as f64);
            let (held_out, kept) = shuffled.split_at(test_count);
            testing.extend(held_out.iter().copied());
            debug!(
                "class '{}': {} subjects -> {} training / {} testing",
                class,
                members.len(),
                kept.len(),
                held_out.len()
            );
            training_by_class.insert(class, kept.to_vec());
        }

        // Second pass: per-class fold assignment over the training remainder.
        let mut training = BTreeSet::new();
        let mut folds = vec![BTreeSet::new(); fold_count];
        for kept in training_by_class.values_mut() {
            kept.shuffle(rng);
            training.extend(kept.iter().copied());
            let chunks = near_equal_chunks(kept.as_slice(), fold_count);
            for (fold, chunk) in folds.iter_mut().zip(chunks) {
                fold.extend(chunk.iter().copied());
            }
        }

        Ok(Self {
            training,
            testing,
            folds,
        })
    }

    /// Identifiers reserved for training.
    pub fn training(&self) -> &BTreeSet<SubjectId> {
        &self.training
    }

    /// Identifiers held out for testing.
    pub fn testing(&self) -> &BTreeSet<SubjectId> {
        &self.testing
    }

    /// Cross-validation folds in assignment order; their union is the
    /// training set.
    pub fn folds(&self) -> &[BTreeSet<SubjectId>] {
        &self.folds
    }

    /// One fold by index.
    pub fn fold(&self, index: usize) -> Option<&BTreeSet<SubjectId>> {
        self.folds.get(index)
    }

    pub fn fold_count(&self) -> usize {
        self.folds.len()
    }

    /// Log partition and fold sizes at info level.
    pub fn log_summary(&self) {
        info!(
            "split: {} training / {} testing subjects, {} folds",
            self.training.len(),
            self.testing.len(),
            self.folds.len()
        );
        for (index, fold) in self.folds.iter().enumerate() {
            info!("  fold {}: {} subjects", index, fold.len());
        }
    }
}

/// Half-up rounding, the one rule applied to every class's holdout count.
fn round_half_up(value: f64) -> usize {
    (value + 0.5).floor() as usize
}

/// Split `ids` into `k` contiguous chunks whose sizes differ by at most one,
/// the first `ids.len() % k` chunks taking the extra element.
fn near_equal_chunks(ids: &[SubjectId], k: usize) -> Vec<&[SubjectId]> {
    let base = ids.len() / k;
    let extra = ids.len() % k;
    let mut chunks = Vec::with_capacity(k);
    let mut start = 0;
    for i in 0..k {
        let size = base + usize::from(i < extra);
        chunks.push(&ids[start..start + size]);
        start += size;
    }
    chunks
}
