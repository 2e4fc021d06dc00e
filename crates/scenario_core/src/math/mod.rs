//! Numerical building blocks.
//!
//! - [`correlation`]: correlation / covariance matrices and the Cholesky factor
//! - [`statistics`]: moments, percentiles and the summary statistics block

pub mod correlation;
pub mod statistics;
