use std::fmt;

use crate::data_handling::{ClassName, SubjectId};

/// Errors that can occur while partitioning an experiment or evaluating
/// distance/kernel functions.
///
/// Every variant is fatal to the caller: partitioning and metric evaluation
/// are deterministic computations, so retrying with unchanged inputs cannot
/// succeed. No failure is ever reported as a `NaN`, zero, or empty result.
#[derive(Debug, Clone, PartialEq)]
pub enum ExperimentError {
    /// A class has too few training members to fill the requested folds
    ClassTooSmall {
        class: ClassName,
        members: usize,
        folds: usize,
    },
    /// The holdout fraction selects zero test subjects for a class
    EmptyHoldout {
        class: ClassName,
        members: usize,
        fraction: f64,
    },
    /// Bandwidth matrix is singular or not positive-definite
    SingularBandwidth { dimension: usize },
    /// Inputs that must agree in length or shape do not
    DimensionMismatch { expected: usize, actual: usize },
    /// An input has zero variance where a spread is required
    ZeroVariance,
    /// An input contains a NaN or infinite value
    NonFiniteInput,
    /// A labeled subject has no pattern entry
    MissingPattern { id: SubjectId },
    /// A view contains a subject the label mapping does not know
    UnlabeledSubject { id: SubjectId, view: String },
    /// A parameter lies outside its documented domain
    InvalidParameter { message: String },
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::ClassTooSmall {
                class,
                members,
                folds,
            } => write!(
                f,
                "Class '{}' has {} training members, fewer than the {} requested folds",
                class, members, folds
            ),
            ExperimentError::EmptyHoldout {
                class,
                members,
                fraction,
            } => write!(
                f,
                "Holdout fraction {} selects no test subjects from class '{}' ({} members)",
                fraction, class, members
            ),
            ExperimentError::SingularBandwidth { dimension } => write!(
                f,
                "Bandwidth matrix of dimension {} is singular or not positive-definite",
                dimension
            ),
            ExperimentError::DimensionMismatch { expected, actual } => write!(
                f,
                "Dimension mismatch: expected {}, got {}",
                expected, actual
            ),
            ExperimentError::ZeroVariance => {
                write!(f, "Input has zero variance")
            }
            ExperimentError::NonFiniteInput => {
                write!(f, "Input contains a non-finite value")
            }
            ExperimentError::MissingPattern { id } => {
                write!(f, "Subject {} is labeled but has no pattern", id)
            }
            ExperimentError::UnlabeledSubject { id, view } => write!(
                f,
                "View '{}' contains subject {} which has no class label",
                view, id
            ),
            ExperimentError::InvalidParameter { message } => {
                write!(f, "Invalid parameter: {}", message)
            }
        }
    }
}

impl std::error::Error for ExperimentError {}
