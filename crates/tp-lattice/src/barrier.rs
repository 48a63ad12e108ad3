//! Single-barrier options on a Trigeorgis tree.
//!
//! The barrier direction follows from where the barrier sits relative to the
//! current price: above it is an up barrier, at or below it a down barrier.
//! A node is *alive* when its real price passes the barrier indicator of
//! [`BarrierType`].
//!
//! * **Knock-out**: children that fail the indicator are never written, so the
//!   knocked-out region is absent from the price lattice and worth nothing.
//! * **Knock-in**: the price lattice is the full Trigeorgis lattice. A vanilla
//!   value lattice of the same exercise style is computed on it first; once a
//!   node passes the indicator the option has knocked in and takes the vanilla
//!   value there. Before that, only the discounted continuation counts.
//!
//! For European exercise the knock-in and knock-out values on the same lattice
//! add up to the vanilla value.

use tp_core::{
    ensure_config, errors::Result, BarrierDirection, BarrierKind, BarrierType, ExerciseStyle,
    OptionType, Real, TreeParams,
};
use tp_math::Matrix;
use tracing::debug;

use crate::engine::GeneralTree;
use crate::indexer::Branches;
use crate::tree::{exercise_value, rollback, terminal_payoffs, OptionTree};
use crate::trigeorgis::TrigeorgisJumps;

/// A single-barrier option on a Trigeorgis tree.
///
/// American exercise compares continuation against the payoff at the node,
/// which is valid because the payoff depends only on the current price and
/// the barrier state of that node.
#[derive(Debug, Clone)]
pub struct BarrierTree {
    params: TreeParams,
    barrier: Real,
    barrier_type: BarrierType,
    option_type: OptionType,
    exercise: ExerciseStyle,
    jumps: TrigeorgisJumps,
    tree: GeneralTree,
    value: Real,
}

impl BarrierTree {
    /// Build and value the tree for barrier level `barrier`.
    pub fn new(
        params: &TreeParams,
        barrier: Real,
        kind: BarrierKind,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> Result<Self> {
        params.validate()?;
        ensure_config!(
            barrier > 0.0 && barrier.is_finite(),
            "barrier must be positive, got {barrier}"
        );
        let jumps = TrigeorgisJumps::new(params)?;
        let barrier_type = BarrierType::new(BarrierDirection::infer(params.current, barrier), kind);
        let strike = params.strike;

        // Compared in log space so a barrier equal to the spot classifies the root exactly.
        let log_barrier = barrier.ln();
        let alive = |x: Real| barrier_type.indicator(x, log_barrier);
        let terminal = |xs: &[Real]| -> Vec<Real> {
            xs.iter()
                .map(|&x| {
                    if alive(x) {
                        exercise_value(option_type, strike, x)
                    } else {
                        0.0
                    }
                })
                .collect()
        };

        let mut tree = GeneralTree::new(params.steps)?;
        let root = params.current.ln();
        let value = match kind {
            BarrierKind::Out => {
                let children = |x: Real, _: usize, _: usize| {
                    if alive(x) {
                        jumps.children(x).map(|child| child.filter(|&c| alive(c)))
                    } else {
                        Branches::default()
                    }
                };
                let node = |x: Real, _: usize, _: usize, values: Branches<Option<Real>>| {
                    if alive(x) {
                        rollback(exercise, jumps.continuation(values), option_type, strike, x)
                    } else {
                        0.0
                    }
                };
                tree.build_prices(root, &children)?;
                tree.build_values(&terminal, &node)?
            }
            BarrierKind::In => {
                let children = |x: Real, _: usize, _: usize| jumps.children(x);
                tree.build_prices(root, &children)?;

                let vanilla_terminal =
                    |xs: &[Real]| -> Vec<Real> { terminal_payoffs(option_type, strike, xs) };
                let vanilla_node = |x: Real, _: usize, _: usize, values: Branches<Option<Real>>| {
                    rollback(exercise, jumps.continuation(values), option_type, strike, x)
                };
                let vanilla = tree.backward(&vanilla_terminal, &vanilla_node)?;

                let node = |x: Real, row: usize, col: usize, values: Branches<Option<Real>>| {
                    if alive(x) {
                        vanilla.get(row, col).unwrap_or(0.0)
                    } else {
                        jumps.continuation(values)
                    }
                };
                tree.build_values(&terminal, &node)?
            }
        };

        debug!(
            %barrier_type,
            %option_type,
            %exercise,
            barrier,
            steps = params.steps,
            value,
            "barrier tree built"
        );
        Ok(Self {
            params: *params,
            barrier,
            barrier_type,
            option_type,
            exercise,
            jumps,
            tree,
            value,
        })
    }

    /// Build from single-letter codes (`"I"`/`"O"`, `"C"`/`"P"`, `"E"`/`"A"`).
    pub fn from_codes(
        params: &TreeParams,
        barrier: Real,
        kind: &str,
        option_type: &str,
        exercise: &str,
    ) -> Result<Self> {
        Self::new(
            params,
            barrier,
            kind.parse()?,
            option_type.parse()?,
            exercise.parse()?,
        )
    }

    /// Barrier level.
    pub fn barrier(&self) -> Real {
        self.barrier
    }

    /// Knock-in or knock-out.
    pub fn barrier_kind(&self) -> BarrierKind {
        self.barrier_type.kind()
    }

    /// Full barrier classification.
    pub fn barrier_type(&self) -> BarrierType {
        self.barrier_type
    }

    /// Side of the current price the barrier sits on.
    pub fn direction(&self) -> BarrierDirection {
        self.barrier_type.direction()
    }

    /// Whether a node at real price `price` passes the barrier indicator.
    pub fn is_alive(&self, price: Real) -> bool {
        self.barrier_type.indicator(price, self.barrier)
    }

    /// Tree constants.
    pub fn jumps(&self) -> &TrigeorgisJumps {
        &self.jumps
    }
}

impl OptionTree for BarrierTree {
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
