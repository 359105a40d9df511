//! Stateless distance and kernel-density primitives.
//!
//! Everything here is a pure function of its inputs: implementations carry
//! no mutable state, so one instance can serve any number of threads and
//! calls. Labels, splits, and records live elsewhere; this layer only maps
//! vectors to scalars.

pub mod distance;
pub mod kernel;
pub mod multiview;
pub mod pairwise;

pub use distance::{CorrelationDistance, Distance, EuclideanDistance};
pub use kernel::{scotts_rule_bandwidth, GaussianKernel, Kernel};
pub use multiview::{subject_view_terms, weighted_distance, ViewTerm};
pub use pairwise::distance_matrix;
