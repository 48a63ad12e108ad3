//! Error types for treeprice.
//!
//! A single `thiserror`-derived enum covers every failure the library can
//! report. Precondition checks go through the `ensure!` family of
//! convenience macros defined here.

use thiserror::Error;

/// The top-level error type used throughout treeprice.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Invalid construction parameters: unknown option codes, `steps < 1`,
    /// non-positive market inputs, or tree probabilities outside `[0, 1]`.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A lattice pass was requested out of order.
    #[error("sequence error: {0}")]
    Sequence(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// General runtime error (e.g. a solver failed to converge).
    #[error("{0}")]
    Runtime(String),

    /// A lattice cell outside the reachable band was addressed.
    #[error("cell ({row}, {col}) is outside the reachable band of the lattice")]
    IndexOutOfRange {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
    },
}

/// Shorthand `Result` type used throughout treeprice.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use tp_core::{ensure, errors::Error};
/// fn positive(x: f64) -> tp_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use tp_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> tp_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result > 0.0, "result must be positive, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Configuration(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use tp_core::{ensure_config, errors::Error};
/// fn steps(n: usize) -> tp_core::errors::Result<usize> {
///     ensure_config!(n >= 1, "must have at least one step, got {n}");
///     Ok(n)
/// }
/// assert!(matches!(steps(0), Err(Error::Configuration(_))));
/// ```
#[macro_export]
macro_rules! ensure_config {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Configuration(
                format!($($msg)*)
            ));
        }
    };
}
