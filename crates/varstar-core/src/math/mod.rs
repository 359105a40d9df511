//! Numerical building blocks shared by the metric layer.

pub mod cholesky;

pub use cholesky::CholeskyFactor;
