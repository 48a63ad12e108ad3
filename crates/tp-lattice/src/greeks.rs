//! Finite-difference Greeks over any tree.
//!
//! The tree is rebuilt at bumped spot prices and differenced centrally.
//! Bumps should span a few lattice spacings; smaller bumps pick up the
//! odd-even oscillation of the tree price in the spot.

use tp_core::{ensure, errors::Result, Real};
use tp_math::differentiation::{first_derivative, second_derivative};

use crate::tree::{OptionTree, Revaluation};

fn check_bump(spot: Real, h: Real) -> Result<()> {
    ensure!(
        h > 0.0 && h < spot,
        "bump must lie in (0, spot), got h = {h} for spot {spot}"
    );
    Ok(())
}

/// `∂V/∂S` at `spot` by central differences with bump `h`.
///
/// `build` maps a spot price to a fully built tree.
pub fn delta<T, F>(build: F, spot: Real, h: Real) -> Result<Real>
where
    T: OptionTree,
    F: Fn(Real) -> Result<T>,
{
    check_bump(spot, h)?;
    let trees = Revaluation::new(build);
    let value = first_derivative(|s| trees.value(s), spot, h);
    trees.finish()?;
    Ok(value)
}

/// `∂²V/∂S²` at `spot` by central differences with bump `h`.
pub fn gamma<T, F>(build: F, spot: Real, h: Real) -> Result<Real>
where
    T: OptionTree,
    F: Fn(Real) -> Result<T>,
{
    check_bump(spot, h)?;
    let trees = Revaluation::new(build);
    let value = second_derivative(|s| trees.value(s), spot, h);
    trees.finish()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tp_analytic::black_scholes_merton;
    use tp_core::{Error, ExerciseStyle, OptionType, TreeParams};

    use crate::trigeorgis::Trigeorgis;

    fn build(
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> impl Fn(Real) -> Result<Trigeorgis> {
        move |spot| {
            let params = TreeParams::new(spot, 100.0, 1.0, 0.06, 0.2, 200).with_dividend(0.03);
            Trigeorgis::new(&params, option_type, exercise)
        }
    }

    #[test]
    fn call_greeks_match_black_scholes() {
        let bs = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.06, 0.03, 0.2, 1.0);
        let d = delta(build(OptionType::Call, ExerciseStyle::European), 100.0, 5.0).unwrap();
        let g = gamma(build(OptionType::Call, ExerciseStyle::European), 100.0, 5.0).unwrap();
        assert!(d > 0.0 && d < 1.0, "delta = {d}");
        assert!(g > 0.0, "gamma = {g}");
        assert_abs_diff_eq!(d, bs.delta, epsilon = 0.01);
        assert_abs_diff_eq!(g, bs.gamma, epsilon = 0.003);
    }

    #[test]
    fn american_put_delta_is_negative() {
        let d = delta(build(OptionType::Put, ExerciseStyle::American), 100.0, 5.0).unwrap();
        assert!(d < 0.0 && d > -1.0, "delta = {d}");
    }

    #[test]
    fn bad_bump_is_rejected() {
        let build = build(OptionType::Call, ExerciseStyle::European);
        assert!(matches!(
            delta(&build, 100.0, 0.0),
            Err(Error::Precondition(_))
        ));
        assert!(gamma(&build, 10.0, 20.0).is_err());
    }
}
