//! Central finite-difference derivatives of scalar functions.

use tp_core::Real;

/// First derivative of `f` at `x` by central differences:
/// `(f(x + h) − f(x − h)) / 2h`.
pub fn first_derivative<F>(f: F, x: Real, h: Real) -> Real
where
    F: Fn(Real) -> Real,
{
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Second derivative of `f` at `x` by central differences:
/// `(f(x + h) − 2f(x) + f(x − h)) / h²`.
pub fn second_derivative<F>(f: F, x: Real, h: Real) -> Real
where
    F: Fn(Real) -> Real,
{
    (f(x + h) - 2.0 * f(x) + f(x - h)) / (h * h)
}
