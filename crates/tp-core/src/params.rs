//! Market and lattice parameters.
//!
//! [`TreeParams`] is the one configuration object of the library. Every tree
//! variant is built from a `TreeParams` plus its option enumerations, and
//! validates it before allocating a lattice.

use crate::errors::Result;
use crate::{ensure_config, Rate, Real, Size, Time, Volatility};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of a single tree construction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeParams {
    /// Current price of the underlying.
    pub current: Real,
    /// Strike price.
    pub strike: Real,
    /// Time to maturity in years.
    pub ttm: Time,
    /// Continuously compounded risk-free rate.
    pub rf: Rate,
    /// Annualized volatility of the underlying.
    pub volatility: Volatility,
    /// Continuous dividend yield.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend: Rate,
    /// Number of time steps in the lattice.
    pub steps: Size,
}

impl TreeParams {
    /// Create a parameter set with no dividend yield.
    pub fn new(
        current: Real,
        strike: Real,
        ttm: Time,
        rf: Rate,
        volatility: Volatility,
        steps: Size,
    ) -> Self {
        Self {
            current,
            strike,
            ttm,
            rf,
            volatility,
            dividend: 0.0,
            steps,
        }
    }

    /// Set the continuous dividend yield.
    pub fn with_dividend(mut self, dividend: Rate) -> Self {
        self.dividend = dividend;
        self
    }

    /// Set the number of steps.
    pub fn with_steps(mut self, steps: Size) -> Self {
        self.steps = steps;
        self
    }

    /// Set the volatility.
    pub fn with_volatility(mut self, volatility: Volatility) -> Self {
        self.volatility = volatility;
        self
    }

    /// Set the current underlying price.
    pub fn with_current(mut self, current: Real) -> Self {
        self.current = current;
        self
    }

    /// Set the strike.
    pub fn with_strike(mut self, strike: Real) -> Self {
        self.strike = strike;
        self
    }

    /// Length of one time step, `ttm / steps`.
    pub fn dt(&self) -> Time {
        self.ttm / self.steps as Real
    }

    /// Risk-neutral log drift `rf − q − σ²/2`.
    pub fn log_drift(&self) -> Real {
        self.rf - self.dividend - 0.5 * self.volatility * self.volatility
    }

    /// Check the parameters describe a tree that can be built.
    pub fn validate(&self) -> Result<()> {
        ensure_config!(
            self.steps >= 1,
            "must have a step count of at least 1, got {}",
            self.steps
        );
        ensure_config!(
            self.current > 0.0 && self.current.is_finite(),
            "current price must be positive, got {}",
            self.current
        );
        ensure_config!(
            self.strike > 0.0 && self.strike.is_finite(),
            "strike must be positive, got {}",
            self.strike
        );
        ensure_config!(
            self.ttm > 0.0 && self.ttm.is_finite(),
            "time to maturity must be positive, got {}",
            self.ttm
        );
        ensure_config!(
            self.volatility > 0.0 && self.volatility.is_finite(),
            "volatility must be positive, got {}",
            self.volatility
        );
        ensure_config!(
            self.rf.is_finite() && self.dividend.is_finite(),
            "rates must be finite (rf = {}, dividend = {})",
            self.rf,
            self.dividend
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use approx::assert_relative_eq;

    fn base() -> TreeParams {
        TreeParams::new(100.0, 100.0, 1.0, 0.06, 0.2, 50)
    }

    #[test]
    fn derived_quantities() {
        let p = base().with_dividend(0.03);
        assert_relative_eq!(p.dt(), 0.02);
        assert_relative_eq!(p.log_drift(), 0.06 - 0.03 - 0.02);
    }

    #[test]
    fn validation_accepts_sane_inputs() {
        assert!(base().validate().is_ok());
        assert!(base().with_steps(1).validate().is_ok());
    }

    #[test]
    fn validation_rejects_zero_steps() {
        let err = base().with_steps(0).validate().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn validation_rejects_bad_market_inputs() {
        assert!(base().with_volatility(0.0).validate().is_err());
        assert!(base().with_current(-1.0).validate().is_err());
        assert!(base().with_strike(0.0).validate().is_err());
        let mut p = base();
        p.ttm = 0.0;
        assert!(p.validate().is_err());
        p = base();
        p.strike = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_without_dividend() {
        let json =
            r#"{"current":10.0,"strike":10.0,"ttm":0.3,"rf":0.01,"volatility":0.2,"steps":200}"#;
        let p: TreeParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.dividend, 0.0);
        assert_eq!(p.steps, 200);
    }
}
