//! # tp-lattice
//!
//! Generalized recombining-tree option pricing.
//!
//! A single generic engine ([`GeneralTree`]) runs a forward pass that builds
//! the price lattice and a backward pass that builds the value lattice. Model
//! variants plug into it through three rules bundled in [`TreeRules`]:
//!
//! * [`Trigeorgis`] — additive binomial tree in log-price space
//! * [`AdditiveTrinomial`] — additive trinomial tree with a true middle branch
//! * [`BarrierTree`] — Trigeorgis tree with single-barrier knock-in/knock-out
//!
//! Every variant implements [`OptionTree`]. [`implied_volatility`],
//! [`delta`] and [`gamma`] work over any of them.
//!
//! # Example
//!
//! ```
//! use tp_core::{ExerciseStyle, OptionType, TreeParams};
//! use tp_lattice::{OptionTree, Trigeorgis};
//!
//! let params = TreeParams::new(100.0, 100.0, 1.0, 0.06, 0.2, 200).with_dividend(0.03);
//! let tree = Trigeorgis::new(&params, OptionType::Call, ExerciseStyle::European).unwrap();
//! assert!((tree.instrument_value() - 9.135).abs() < 0.05);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Single-barrier Trigeorgis tree.
pub mod barrier;

/// The generic two-pass tree engine.
pub mod engine;

/// Finite-difference Greeks over any tree.
pub mod greeks;

/// Implied volatility backed out of any tree.
pub mod implied_vol;

/// Lattice geometry: child coordinates and the reachable band.
pub mod indexer;

/// Sparse storage for lattice cells.
pub mod store;

/// The trait shared by every tree variant.
pub mod tree;

/// Trigeorgis additive binomial tree.
pub mod trigeorgis;

/// Additive trinomial tree.
pub mod trinomial;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use barrier::BarrierTree;
pub use engine::{GeneralTree, TreeRules, TreeState};
pub use greeks::{delta, gamma};
pub use implied_vol::{implied_volatility, implied_volatility_with};
pub use indexer::{child_indices, Branches, LatticeIndexer};
pub use store::SparseLattice;
pub use tree::OptionTree;
pub use trigeorgis::{Trigeorgis, TrigeorgisJumps};
pub use trinomial::{AdditiveTrinomial, TrinomialJumps};
