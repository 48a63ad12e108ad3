//! # treeprice
//!
//! Generalized recombining-tree option pricing: one two-pass lattice engine
//! with Trigeorgis binomial, additive trinomial, and single-barrier variants.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `tp-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! treeprice = "0.1"
//! ```
//!
//! ```rust
//! use treeprice::core::{BarrierKind, ExerciseStyle, OptionType, TreeParams};
//! use treeprice::lattice::{BarrierTree, OptionTree, Trigeorgis};
//!
//! let params = TreeParams::new(10.0, 10.0, 0.3, 0.01, 0.2, 200);
//! let vanilla = Trigeorgis::new(&params, OptionType::Call, ExerciseStyle::European).unwrap();
//! let barrier = |kind| {
//!     BarrierTree::new(&params, 11.0, kind, OptionType::Call, ExerciseStyle::European).unwrap()
//! };
//! let (up_in, up_out) = (barrier(BarrierKind::In), barrier(BarrierKind::Out));
//!
//! let parity = up_in.instrument_value() + up_out.instrument_value() - vanilla.instrument_value();
//! assert!(parity.abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, option enumerations, parameters, and error definitions.
pub use tp_core as core;

/// Normal distribution, root finders, finite differences, matrices.
pub use tp_math as math;

/// Closed-form Black-Scholes-Merton and barrier prices.
pub use tp_analytic as analytic;

/// The tree engine, its variants, implied volatility, and Greeks.
pub use tp_lattice as lattice;
