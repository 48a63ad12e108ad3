//! 1D root-finding solvers.
//!
//! All solvers take the objective by value as `Fn(Real) -> Real` and return
//! the abscissa of the root. Bracketing solvers require `f(x_min)` and
//! `f(x_max)` to have opposite signs and report a precondition error
//! otherwise.

use tp_core::{
    errors::{Error, Result},
    Real,
};
use tracing::trace;

const MAX_ITERATIONS: u32 = 100;
const DEFAULT_ACCURACY: Real = 1.0e-11;

fn effective_accuracy(accuracy: Real) -> Real {
    if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    }
}

/// Which bracketing solver to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverKind {
    /// Interval halving; slow but never leaves the bracket.
    #[default]
    Bisection,
    /// Brent's method.
    Brent,
}

/// Dispatch to the bracketing solver selected by `kind`.
pub fn solve<F>(kind: SolverKind, f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    match kind {
        SolverKind::Bisection => bisection(f, x_min, x_max, accuracy),
        SolverKind::Brent => brent(f, x_min, x_max, accuracy),
    }
}

// ── Bisection ────────────────────────────────────────────────────────────────

/// Bisection: halve the bracket until it is narrower than `2 * accuracy`.
pub fn bisection<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    let acc = effective_accuracy(accuracy);
    let mut a = x_min;
    let mut b = x_max;
    let mut fa = f(a);
    let fb = f(b);

    if fa * fb > 0.0 {
        return Err(Error::Precondition(format!(
            "bisection: f({a}) = {fa} and f({b}) = {fb} must have opposite signs"
        )));
    }
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    for iteration in 0..MAX_ITERATIONS {
        let mid = 0.5 * (a + b);
        let fm = f(mid);
        trace!(iteration, x = mid, fx = fm, "bisection step");
        if fm == 0.0 || (b - a) * 0.5 < acc {
            return Ok(mid);
        }
        if fm * fa > 0.0 {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }
    Err(Error::Runtime(
        "bisection solver: maximum iterations reached".into(),
    ))
}

// ── Brent ─────────────────────────────────────────────────────────────────────

/// Brent's method for finding a root of `f(x)` in `[x_min, x_max]`.
///
/// Each step tries inverse quadratic interpolation (secant when only two
/// distinct values are known) and falls back to bisection whenever the
/// interpolated point leaves the safe part of the bracket or converges
/// slower than halving would.
pub fn brent<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    let acc = effective_accuracy(accuracy);
    let (mut a, mut fa) = (x_min, f(x_min));
    let (mut b, mut fb) = (x_max, f(x_max));

    if fa * fb > 0.0 {
        return Err(Error::Precondition(format!(
            "brent: f({a}) and f({b}) must have opposite signs"
        )));
    }
    if fa == 0.0 {
        return Ok(a);
    }
    // `b` is always the best estimate so far.
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    // Previous and second-previous estimates.
    let (mut c, mut fc) = (a, fa);
    let mut d = c;
    let mut bisected = true;

    for iteration in 0..MAX_ITERATIONS {
        trace!(iteration, x = b, fx = fb, "brent step");
        if fb == 0.0 || (b - a).abs() < acc {
            return Ok(b);
        }

        let interpolated = if fa != fc && fb != fc {
            a * fb * fc / ((fa - fb) * (fa - fc))
                + b * fa * fc / ((fb - fa) * (fb - fc))
                + c * fa * fb / ((fc - fa) * (fc - fb))
        } else {
            b - fb * (b - a) / (fb - fa)
        };

        let quarter = (3.0 * a + b) / 4.0;
        let outside = !(quarter.min(b) < interpolated && interpolated < quarter.max(b));
        let last_move = if bisected { (b - c).abs() } else { (c - d).abs() };
        let use_bisection =
            outside || (interpolated - b).abs() >= 0.5 * last_move || last_move < acc;

        let s = if use_bisection { 0.5 * (a + b) } else { interpolated };
        bisected = use_bisection;
        let fs = f(s);

        d = c;
        c = b;
        fc = fb;
        if fa * fs < 0.0 {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
    }
    Err(Error::Runtime(
        "brent solver: maximum iterations reached".into(),
    ))
}

// ── Newton-Raphson ────────────────────────────────────────────────────────────

/// Safeguarded Newton-Raphson using the function value and its derivative.
///
/// `f_df` returns `(f(x), f'(x))`. The root must be bracketed by
/// `[x_min, x_max]`; whenever a Newton step would leave the current bracket
/// (or the derivative vanishes) a bisection step is taken instead.
pub fn newton<F>(f_df: F, x0: Real, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> (Real, Real),
{
    let acc = effective_accuracy(accuracy);
    let (f_lo, _) = f_df(x_min);
    let (f_hi, _) = f_df(x_max);
    if f_lo * f_hi > 0.0 {
        return Err(Error::Precondition(format!(
            "newton: f({x_min}) and f({x_max}) must have opposite signs"
        )));
    }
    // Orient the bracket so that f(lo) < 0 < f(hi).
    let (mut lo, mut hi) = if f_lo < 0.0 {
        (x_min, x_max)
    } else {
        (x_max, x_min)
    };
    let mut x = x0.clamp(x_min.min(x_max), x_min.max(x_max));

    for iteration in 0..MAX_ITERATIONS {
        let (fx, dfx) = f_df(x);
        trace!(iteration, x, fx, "newton step");
        if fx.abs() < acc {
            return Ok(x);
        }
        if fx < 0.0 {
            lo = x;
        } else {
            hi = x;
        }
        let candidate = if dfx.abs() > f64::EPSILON {
            Some(x - fx / dfx)
        } else {
            None
        };
        let inside = |v: Real| v > lo.min(hi) && v < lo.max(hi);
        let next = match candidate {
            Some(v) if inside(v) => v,
            _ => 0.5 * (lo + hi),
        };
        if (next - x).abs() < acc {
            return Ok(next);
        }
        x = next;
    }
    Err(Error::Runtime(
        "newton solver: maximum iterations reached".into(),
    ))
}
