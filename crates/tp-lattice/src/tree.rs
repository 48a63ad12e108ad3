//! The [`OptionTree`] trait and helpers shared by the tree variants.

use std::cell::RefCell;
use std::marker::PhantomData;

use tp_core::{errors::Error, errors::Result, ExerciseStyle, OptionType, Real, TreeParams};
use tp_math::Matrix;

use crate::engine::GeneralTree;

/// An option priced on a fully built recombining tree.
pub trait OptionTree {
    /// The underlying two-pass tree.
    fn lattice(&self) -> &GeneralTree;

    /// Parameters the tree was built from.
    fn params(&self) -> &TreeParams;

    /// Value of the option at the root.
    fn instrument_value(&self) -> Real;

    /// Call or put.
    fn option_type(&self) -> OptionType;

    /// European or American.
    fn exercise_style(&self) -> ExerciseStyle;

    /// Dense price lattice in real-price units.
    fn price_tree(&self) -> Matrix {
        self.lattice().price_tree()
    }

    /// Dense value lattice.
    fn value_tree(&self) -> Matrix {
        self.lattice().value_tree()
    }
}

/// Payoff of exercising at log-price `x`.
pub(crate) fn exercise_value(option_type: OptionType, strike: Real, x: Real) -> Real {
    option_type.intrinsic(x.exp(), strike)
}

/// Payoff over a column of log prices.
pub(crate) fn terminal_payoffs(option_type: OptionType, strike: Real, xs: &[Real]) -> Vec<Real> {
    xs.iter()
        .map(|&x| exercise_value(option_type, strike, x))
        .collect()
}

/// Continuation value, raised to the exercise value for American options.
///
/// The exercise value is the terminal payoff rule evaluated at the node, which
/// is only correct for payoffs that depend on the current price alone.
pub(crate) fn rollback(
    exercise: ExerciseStyle,
    continuation: Real,
    option_type: OptionType,
    strike: Real,
    x: Real,
) -> Real {
    match exercise {
        ExerciseStyle::European => continuation,
        ExerciseStyle::American => continuation.max(exercise_value(option_type, strike, x)),
    }
}

/// Instrument value as a plain function of one input, for numerical routines
/// that expect `Fn(Real) -> Real`.
///
/// Trees that fail to build evaluate to NaN; the first failure is kept and
/// reported by [`Revaluation::finish`].
pub(crate) struct Revaluation<T, F> {
    build: F,
    failure: RefCell<Option<Error>>,
    _tree: PhantomData<fn() -> T>,
}

impl<T, F> Revaluation<T, F>
where
    T: OptionTree,
    F: Fn(Real) -> Result<T>,
{
    pub(crate) fn new(build: F) -> Self {
        Self {
            build,
            failure: RefCell::new(None),
            _tree: PhantomData,
        }
    }

    pub(crate) fn value(&self, input: Real) -> Real {
        match (self.build)(input) {
            Ok(tree) => tree.instrument_value(),
            Err(e) => {
                self.failure.borrow_mut().get_or_insert(e);
                Real::NAN
            }
        }
    }

    pub(crate) fn finish(self) -> Result<()> {
        match self.failure.into_inner() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
