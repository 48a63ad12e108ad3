//! # tp-math
//!
//! Mathematical utilities for treeprice: the standard normal distribution
//! (via statrs), 1-D root finders, central finite differences, and a dense
//! matrix newtype (over nalgebra) used for lattice exports.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Central finite-difference derivatives.
pub mod differentiation;

/// Probability distributions.
pub mod distributions;

/// Dense matrix newtype.
pub mod matrix;

/// 1D root-finding solvers.
pub mod solvers1d;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use differentiation::{first_derivative, second_derivative};
pub use distributions::{normal_cdf, normal_pdf};
pub use matrix::Matrix;
pub use solvers1d::{bisection, brent, newton, solve, SolverKind};
