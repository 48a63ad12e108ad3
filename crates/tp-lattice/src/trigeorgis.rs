//! Trigeorgis additive binomial tree.
//!
//! Works in log-price space `x = ln S`. With `ν = r − q − σ²/2`:
//!
//! * `dx = √(ν²Δt² + σ²Δt)`, up move `+dx`, down move `−dx`
//! * `p_up = ½ + ½ νΔt / dx`, `p_down = 1 − p_up`
//! * per-step discount `e^{−rΔt}`
//!
//! The middle branch is never written, so column `j` holds `j + 1` prices
//! spaced two rows apart.

use tp_core::{
    ensure_config, errors::Result, DiscountFactor, ExerciseStyle, OptionType, Probability, Real,
    TreeParams,
};
use tp_math::Matrix;
use tracing::debug;

use crate::engine::{GeneralTree, TreeRules};
use crate::indexer::Branches;
use crate::tree::{rollback, terminal_payoffs, OptionTree};

/// Jump sizes, probabilities and discount of a Trigeorgis tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrigeorgisJumps {
    /// Log-price up move.
    pub dx_up: Real,
    /// Log-price down move (`−dx_up`).
    pub dx_down: Real,
    /// Probability of an up move.
    pub p_up: Probability,
    /// Probability of a down move.
    pub p_down: Probability,
    /// Discount factor over one step.
    pub discount: DiscountFactor,
}

impl TrigeorgisJumps {
    /// Constants for the given parameters.
    pub fn new(params: &TreeParams) -> Result<Self> {
        let dt = params.dt();
        let nu = params.log_drift();
        let sigma = params.volatility;
        let dx_up = (nu * nu * dt * dt + sigma * sigma * dt).sqrt();
        let p_up = 0.5 + 0.5 * nu * dt / dx_up;
        ensure_config!(
            (0.0..=1.0).contains(&p_up),
            "Trigeorgis: invalid probability {p_up}"
        );
        Ok(Self {
            dx_up,
            dx_down: -dx_up,
            p_up,
            p_down: 1.0 - p_up,
            discount: (-params.rf * dt).exp(),
        })
    }

    /// Children of log-price `x`: `[x + dx_up, absent, x + dx_down]`.
    pub fn children(&self, x: Real) -> Branches<Option<Real>> {
        Branches::new(Some(x + self.dx_up), None, Some(x + self.dx_down))
    }

    /// Discounted expectation over the up and down children. Absent children
    /// are worth nothing.
    pub fn continuation(&self, values: Branches<Option<Real>>) -> Real {
        self.discount
            * (self.p_up * values.up.unwrap_or(0.0) + self.p_down * values.down.unwrap_or(0.0))
    }
}

/// A vanilla option on a Trigeorgis tree.
///
/// American exercise compares continuation against the payoff at the node,
/// which is valid because a vanilla payoff depends only on the current price.
#[derive(Debug, Clone)]
pub struct Trigeorgis {
    params: TreeParams,
    option_type: OptionType,
    exercise: ExerciseStyle,
    jumps: TrigeorgisJumps,
    tree: GeneralTree,
    value: Real,
}

impl Trigeorgis {
    /// Build and value the tree.
    pub fn new(
        params: &TreeParams,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> Result<Self> {
        params.validate()?;
        let jumps = TrigeorgisJumps::new(params)?;
        let strike = params.strike;

        let children = |x: Real, _: usize, _: usize| jumps.children(x);
        let terminal = |xs: &[Real]| -> Vec<Real> { terminal_payoffs(option_type, strike, xs) };
        let node = |x: Real, _: usize, _: usize, values: Branches<Option<Real>>| {
            rollback(exercise, jumps.continuation(values), option_type, strike, x)
        };
        let rules = TreeRules {
            children_price: &children,
            terminal_value: &terminal,
            node_value: &node,
        };
        let tree = GeneralTree::evaluate(params.current.ln(), params.steps, &rules)?;
        let value = tree.instrument_value()?;

        debug!(
            %option_type,
            %exercise,
            steps = params.steps,
            dx = jumps.dx_up,
            p_up = jumps.p_up,
            value,
            "trigeorgis tree built"
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

    /// Tree constants.
    pub fn jumps(&self) -> &TrigeorgisJumps {
        &self.jumps
    }

    /// Log-price up move.
    pub fn dx_up(&self) -> Real {
        self.jumps.dx_up
    }

    /// Probability of an up move.
    pub fn p_up(&self) -> Probability {
        self.jumps.p_up
    }

    /// Probability of a down move.
    pub fn p_down(&self) -> Probability {
        self.jumps.p_down
    }

    /// Discount factor over one step.
    pub fn discount(&self) -> DiscountFactor {
        self.jumps.discount
    }

    /// Dense price lattice in log-price units.
    pub fn log_price_tree(&self) -> Matrix {
        self.tree.price_tree()
    }
}

impl OptionTree for Trigeorgis {
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
