//! # tp-core
//!
//! Core types, option enumerations, configuration, and error definitions for
//! treeprice.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – scalar type aliases, the error hierarchy,
//! the option type / exercise style / barrier enumerations, and the
//! [`TreeParams`] parameter set every tree is built from.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_post!` / `ensure_config!` macros.
pub mod errors;

/// Option type, exercise style, and barrier enumerations.
pub mod option;

/// Market and lattice parameters shared by every tree.
pub mod params;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor in [0, 1].
pub type DiscountFactor = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

/// A probability in [0, 1].
pub type Probability = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use option::{BarrierDirection, BarrierKind, BarrierType, ExerciseStyle, OptionType};
pub use params::TreeParams;
