//! Standard normal distribution.
//!
//! Wraps the `statrs` crate's normal implementation.

use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use std::sync::OnceLock;
use tp_core::Real;

/// The standard normal distribution N(0, 1).
#[derive(Debug, Clone)]
pub struct StandardNormal {
    dist: Normal,
}

impl StandardNormal {
    fn shared() -> &'static StandardNormal {
        static INSTANCE: OnceLock<StandardNormal> = OnceLock::new();
        INSTANCE.get_or_init(StandardNormal::default)
    }

    /// Probability density function.
    pub fn pdf(&self, x: Real) -> Real {
        self.dist.pdf(x)
    }

    /// Cumulative distribution function Φ(x).
    pub fn cdf(&self, x: Real) -> Real {
        self.dist.cdf(x)
    }
}

impl Default for StandardNormal {
    fn default() -> Self {
        // Mean 0 and standard deviation 1 are always accepted by statrs.
        let dist = match Normal::new(0.0, 1.0) {
            Ok(d) => d,
            Err(_) => unreachable!("N(0, 1) is a valid distribution"),
        };
        Self { dist }
    }
}

/// The standard normal probability density function.
///
/// `φ(x) = exp(-x²/2) / √(2π)`
#[inline]
pub fn normal_pdf(x: Real) -> Real {
    StandardNormal::shared().pdf(x)
}

/// The standard normal cumulative distribution function Φ(x).
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    StandardNormal::shared().cdf(x)
}
