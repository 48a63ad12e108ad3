//! # tp-analytic
//!
//! Closed-form option prices used as validation oracles for the lattice
//! engines: Black-Scholes-Merton for European vanillas (with Greeks and an
//! implied-volatility inversion), put-call parity, and reflection-principle
//! formulas for single-barrier options.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Closed-form single-barrier prices.
pub mod barrier;

/// Black-Scholes-Merton prices, Greeks, parity, and implied volatility.
pub mod black_scholes;

pub use barrier::analytic_barrier_price;
pub use black_scholes::{
    black_scholes_implied_volatility, black_scholes_merton, black_scholes_price,
    put_call_parity_call, put_call_parity_put, BlackScholesResults,
};
