//! Implied volatility backed out of a tree.
//!
//! The caller supplies a builder mapping a trial volatility to a fully built
//! tree; the solver then searches for the volatility at which the tree's
//! instrument value matches the target price.

use tp_core::{ensure, errors::Result, Real, Volatility};
use tp_math::solvers1d::{solve, SolverKind};
use tracing::debug;

use crate::tree::{OptionTree, Revaluation};

/// Volatility in `[lower, upper]` at which `build(σ)` is worth `target`,
/// found by bisection.
///
/// Errors from `build` are returned unchanged; a target outside the bracket
/// surfaces the solver's precondition error.
///
/// # Example
///
/// ```
/// use tp_core::{ExerciseStyle, OptionType, TreeParams};
/// use tp_lattice::{implied_volatility, OptionTree, Trigeorgis};
///
/// let base = TreeParams::new(100.0, 100.0, 1.0, 0.05, 0.3, 50);
/// let target = Trigeorgis::new(&base, OptionType::Put, ExerciseStyle::American)
///     .unwrap()
///     .instrument_value();
/// let vol = implied_volatility(
///     target,
///     |v| Trigeorgis::new(&base.with_volatility(v), OptionType::Put, ExerciseStyle::American),
///     0.01,
///     1.0,
///     1e-8,
/// )
/// .unwrap();
/// assert!((vol - 0.3).abs() < 1e-6);
/// ```
pub fn implied_volatility<T, F>(
    target: Real,
    build: F,
    lower: Volatility,
    upper: Volatility,
    accuracy: Real,
) -> Result<Volatility>
where
    T: OptionTree,
    F: Fn(Volatility) -> Result<T>,
{
    implied_volatility_with(SolverKind::Bisection, target, build, lower, upper, accuracy)
}

/// As [`implied_volatility`], with a choice of bracketing solver.
pub fn implied_volatility_with<T, F>(
    solver: SolverKind,
    target: Real,
    build: F,
    lower: Volatility,
    upper: Volatility,
    accuracy: Real,
) -> Result<Volatility>
where
    T: OptionTree,
    F: Fn(Volatility) -> Result<T>,
{
    ensure!(
        target.is_finite(),
        "target price must be finite, got {target}"
    );
    ensure!(
        lower > 0.0 && upper > lower,
        "volatility bracket [{lower}, {upper}] must be positive and non-empty"
    );
    let trees = Revaluation::new(build);
    let result = solve(solver, |v| trees.value(v) - target, lower, upper, accuracy);
    trees.finish()?;
    let vol = result?;
    debug!(?solver, target, vol, "tree implied volatility");
    Ok(vol)
}
