//! Additive trinomial tree.
//!
//! Log-price space with a true middle branch. With `ν = r − q − σ²/2` and
//! `dx = σ√(3Δt)`, writing `m = (σ²Δt + ν²Δt²) / dx²`:
//!
//! * `p_up = ½(m + νΔt/dx)`
//! * `p_mid = 1 − m`
//! * `p_down = ½(m − νΔt/dx)`
//!
//! Every column is fully populated (`2j + 1` prices). The price lattice does
//! not depend on the exercise style, so the other style can be valued by a
//! second backward pass alone.

use tp_core::{
    ensure_config, errors::Result, DiscountFactor, ExerciseStyle, OptionType, Probability, Real,
    TreeParams,
};
use tp_math::Matrix;
use tracing::debug;

use crate::engine::{root_value, GeneralTree, NodeValueFn, TerminalValueFn};
use crate::indexer::Branches;
use crate::tree::{rollback, terminal_payoffs, OptionTree};

/// Jump size, probabilities and discount of an additive trinomial tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrinomialJumps {
    /// Log-price spacing between adjacent rows.
    pub dx: Real,
    /// Probability of an up move.
    pub p_up: Probability,
    /// Probability of staying level.
    pub p_mid: Probability,
    /// Probability of a down move.
    pub p_down: Probability,
    /// Discount factor over one step.
    pub discount: DiscountFactor,
}

impl TrinomialJumps {
    /// Constants for the given parameters. Fails if any probability falls
    /// outside `[0, 1]`.
    pub fn new(params: &TreeParams) -> Result<Self> {
        let dt = params.dt();
        let nu = params.log_drift();
        let sigma = params.volatility;
        let dx = sigma * (3.0 * dt).sqrt();
        let m = (sigma * sigma * dt + nu * nu * dt * dt) / (dx * dx);
        let drift = nu * dt / dx;
        let jumps = Self {
            dx,
            p_up: 0.5 * (m + drift),
            p_mid: 1.0 - m,
            p_down: 0.5 * (m - drift),
            discount: (-params.rf * dt).exp(),
        };
        for (name, p) in [
            ("p_up", jumps.p_up),
            ("p_mid", jumps.p_mid),
            ("p_down", jumps.p_down),
        ] {
            ensure_config!(
                (0.0..=1.0).contains(&p),
                "additive trinomial: {name} = {p} is not a probability (try more steps)"
            );
        }
        Ok(jumps)
    }

    /// Children of log-price `x`: `[x + dx, x, x − dx]`.
    pub fn children(&self, x: Real) -> Branches<Option<Real>> {
        Branches::new(Some(x + self.dx), Some(x), Some(x - self.dx))
    }

    /// Discounted expectation over the three children.
    pub fn continuation(&self, values: Branches<Option<Real>>) -> Real {
        self.discount
            * (self.p_up * values.up.unwrap_or(0.0)
                + self.p_mid * values.mid.unwrap_or(0.0)
                + self.p_down * values.down.unwrap_or(0.0))
    }
}

/// A vanilla option on an additive trinomial tree.
///
/// American exercise compares continuation against the payoff at the node,
/// which is valid because a vanilla payoff depends only on the current price.
#[derive(Debug, Clone)]
pub struct AdditiveTrinomial {
    params: TreeParams,
    option_type: OptionType,
    exercise: ExerciseStyle,
    jumps: TrinomialJumps,
    tree: GeneralTree,
    value: Real,
}

impl AdditiveTrinomial {
    /// Build and value the tree.
    pub fn new(
        params: &TreeParams,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> Result<Self> {
        params.validate()?;
        let jumps = TrinomialJumps::new(params)?;
        let strike = params.strike;

        let children = |x: Real, _: usize, _: usize| jumps.children(x);
        let mut tree = GeneralTree::new(params.steps)?;
        tree.build_prices(params.current.ln(), &children)?;
        let value = backward_rules(&jumps, option_type, strike, exercise, |terminal, node| {
            tree.build_values(terminal, node)
        })?;

        debug!(
            %option_type,
            %exercise,
            steps = params.steps,
            dx = jumps.dx,
            p_mid = jumps.p_mid,
            value,
            "additive trinomial tree built"
        );
        Ok(Self {
            params: *params,
            option_type,
            exercise,
            jumps,
            tree,
            value,
        })
    }

    /// Build from single-letter codes (`"C"`/`"P"`, `"E"`/`"A"`).
    pub fn from_codes(params: &TreeParams, option_type: &str, exercise: &str) -> Result<Self> {
        Self::new(params, option_type.parse()?, exercise.parse()?)
    }

    /// Value the same price lattice under `exercise`.
    ///
    /// Only the backward pass runs; the tree is left untouched.
    pub fn compute_other_style_price(&self, exercise: ExerciseStyle) -> Result<Real> {
        let values = backward_rules(
            &self.jumps,
            self.option_type,
            self.params.strike,
            exercise,
            |terminal, node| self.tree.backward(terminal, node),
        )?;
        root_value(&values, self.tree.indexer())
    }

    /// Tree constants.
    pub fn jumps(&self) -> &TrinomialJumps {
        &self.jumps
    }

    /// Dense price lattice in log-price units.
    pub fn log_price_tree(&self) -> Matrix {
        self.tree.price_tree()
    }
}

/// Run `pass` with the vanilla terminal and node rules for `exercise`.
fn backward_rules<R>(
    jumps: &TrinomialJumps,
    option_type: OptionType,
    strike: Real,
    exercise: ExerciseStyle,
    pass: impl FnOnce(&TerminalValueFn<'_>, &NodeValueFn<'_>) -> Result<R>,
) -> Result<R> {
    let terminal = |xs: &[Real]| -> Vec<Real> { terminal_payoffs(option_type, strike, xs) };
    let node = |x: Real, _: usize, _: usize, values: Branches<Option<Real>>| {
        rollback(exercise, jumps.continuation(values), option_type, strike, x)
    };
    pass(&terminal, &node)
}

impl OptionTree for AdditiveTrinomial {
    fn lattice(&self) -> &GeneralTree {
        &self.tree
    }

    fn params(&self) -> &TreeParams {
        &self.params
    }

    fn instrument_value(&self) -> Real {
        self.value
    }

    fn option_type(&self) -> OptionType {
        self.option_type
    }

    fn exercise_style(&self) -> ExerciseStyle {
        self.exercise
    }

    fn price_tree(&self) -> Matrix {
        self.tree.price_tree_with(Real::exp)
    }
}
