//! Core primitives for reproducible classification experiments over
//! variable-star light-curve features.
//!
//! The crate covers the experiment plumbing shared by every classifier
//! built on top of it:
//!
//! - [`data_handling`]: immutable dataset, pattern, and cluster records
//! - [`labels`]: grouping and counting of subjects by class
//! - [`split`]: seeded stratified train/test and cross-validation splits
//! - [`metrics`]: Gaussian kernel density, correlation and Euclidean
//!   distances, multi-view combination, pairwise matrices
//! - [`config`]: split parameters
//! - [`error`]: the crate-wide error type
//!
//! Feature extraction, the classifiers themselves, and experiment
//! orchestration live in consumer crates. Splits take the caller's own
//! seeded [`rand::Rng`], so a rerun with the same seed reproduces an
//! experiment bit for bit.

pub mod config;
pub mod data_handling;
pub mod error;
pub mod labels;
pub mod math;
pub mod metrics;
pub mod split;
