//! Probability distributions, delegating to the `statrs` crate.

/// Standard normal distribution.
pub mod normal;

pub use normal::{normal_cdf, normal_pdf, StandardNormal};
