//! The generic two-pass tree engine.
//!
//! [`GeneralTree`] knows nothing about options. A model variant hands it three
//! rules:
//!
//! * **children price**: prices of the up/mid/down children of a node;
//!   `None` leaves that child unwritten (binomial trees have no middle child,
//!   knock-out trees drop children beyond the barrier)
//! * **terminal value**: payoff over every populated terminal price
//! * **node value**: backward-induction step from the children's values
//!
//! The forward pass fills the price lattice from the root; the backward pass
//! fills the value lattice from the terminal column. Both visit exactly the
//! reachable band of each column and skip cells whose price was never written.

use tp_core::{
    ensure_post,
    errors::{Error, Result},
    Real, Size,
};
use tp_math::Matrix;
use tracing::debug;

use crate::indexer::{child_indices, Branches, LatticeIndexer};
use crate::store::SparseLattice;

/// Forward rule: `(price, row, col) -> child prices`.
pub type ChildrenPriceFn<'a> = dyn Fn(Real, usize, usize) -> Branches<Option<Real>> + 'a;

/// Terminal rule: populated terminal prices (row order) to values of the same length.
pub type TerminalValueFn<'a> = dyn Fn(&[Real]) -> Vec<Real> + 'a;

/// Backward rule: `(price, row, col, child values) -> node value`.
///
/// An absent child value means the child was never written in the price lattice.
pub type NodeValueFn<'a> = dyn Fn(Real, usize, usize, Branches<Option<Real>>) -> Real + 'a;

/// The three rules a model variant supplies to the engine.
#[derive(Clone, Copy)]
pub struct TreeRules<'a> {
    /// Prices of a node's children.
    pub children_price: &'a ChildrenPriceFn<'a>,
    /// Payoff over the terminal column.
    pub terminal_value: &'a TerminalValueFn<'a>,
    /// Backward-induction step.
    pub node_value: &'a NodeValueFn<'a>,
}

/// Construction state of a [`GeneralTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeState {
    /// No lattice has been built.
    Uninitialized,
    /// The price lattice exists; values have not been computed.
    PriceBuilt,
    /// Both lattices exist and the instrument value is available.
    Ready,
}

/// A recombining tree with a price lattice and a value lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralTree {
    indexer: LatticeIndexer,
    prices: Option<SparseLattice>,
    values: Option<SparseLattice>,
}

impl GeneralTree {
    /// An empty tree for `steps` time steps.
    pub fn new(steps: Size) -> Result<Self> {
        Ok(Self {
            indexer: LatticeIndexer::new(steps)?,
            prices: None,
            values: None,
        })
    }

    /// Build a tree and run both passes.
    pub fn evaluate(root: Real, steps: Size, rules: &TreeRules<'_>) -> Result<Self> {
        let mut tree = Self::new(steps)?;
        tree.build_prices(root, rules.children_price)?;
        tree.build_values(rules.terminal_value, rules.node_value)?;
        Ok(tree)
    }

    /// Current construction state.
    pub fn state(&self) -> TreeState {
        match (&self.prices, &self.values) {
            (None, _) => TreeState::Uninitialized,
            (Some(_), None) => TreeState::PriceBuilt,
            (Some(_), Some(_)) => TreeState::Ready,
        }
    }

    /// Lattice geometry.
    pub fn indexer(&self) -> LatticeIndexer {
        self.indexer
    }

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.indexer.steps()
    }

    /// Forward pass: write `root` at `(mid_row, 0)` and propagate prices.
    pub fn build_prices(&mut self, root: Real, children_price: &ChildrenPriceFn<'_>) -> Result<()> {
        if self.prices.is_some() {
            return Err(Error::Sequence("price lattice is already built".into()));
        }
        let mut prices = SparseLattice::with_indexer(self.indexer);
        prices.set(self.indexer.mid_row(), 0, root)?;

        for col in 0..self.indexer.steps() {
            for row in self.indexer.reachable_rows(col) {
                let Some(price) = prices.get(row, col) else {
                    continue;
                };
                let targets = child_indices(row, col).into_array();
                let children = children_price(price, row, col).into_array();
                for ((r, c), child) in targets.into_iter().zip(children) {
                    if let Some(child) = child {
                        prices.set(r, c, child)?;
                    }
                }
            }
        }

        debug!(
            steps = self.indexer.steps(),
            populated = prices.total_populated(),
            "price lattice built"
        );
        self.prices = Some(prices);
        Ok(())
    }

    /// Backward pass against the built price lattice, without storing it.
    ///
    /// Lets a caller value the same price lattice under different rules.
    pub fn backward(
        &self,
        terminal_value: &TerminalValueFn<'_>,
        node_value: &NodeValueFn<'_>,
    ) -> Result<SparseLattice> {
        let prices = self.prices.as_ref().ok_or_else(|| {
            Error::Sequence(
                "value lattice requested before the price lattice was built".into(),
            )
        })?;
        let last = self.indexer.steps();
        let mut values = SparseLattice::with_indexer(self.indexer);

        let (rows, terminal_prices): (Vec<usize>, Vec<Real>) = prices.populated(last).unzip();
        let terminal = terminal_value(&terminal_prices);
        ensure_post!(
            terminal.len() == rows.len(),
            "terminal rule returned {} values for {} terminal prices",
            terminal.len(),
            rows.len()
        );
        for (row, value) in rows.into_iter().zip(terminal) {
            values.set(row, last, value)?;
        }

        for col in (0..last).rev() {
            for row in self.indexer.reachable_rows(col) {
                let Some(price) = prices.get(row, col) else {
                    continue;
                };
                let children = child_indices(row, col).map(|(r, c)| values.get(r, c));
                values.set(row, col, node_value(price, row, col, children))?;
            }
        }
        Ok(values)
    }

    /// Backward pass, stored as the value lattice. Returns the instrument value.
    pub fn build_values(
        &mut self,
        terminal_value: &TerminalValueFn<'_>,
        node_value: &NodeValueFn<'_>,
    ) -> Result<Real> {
        if self.values.is_some() {
            return Err(Error::Sequence("value lattice is already built".into()));
        }
        let values = self.backward(terminal_value, node_value)?;
        let root = root_value(&values, self.indexer)?;
        debug!(
            steps = self.indexer.steps(),
            populated = values.total_populated(),
            value = root,
            "value lattice built"
        );
        self.values = Some(values);
        Ok(root)
    }

    /// Value lattice at the root.
    pub fn instrument_value(&self) -> Result<Real> {
        let values = self.values.as_ref().ok_or_else(|| {
            Error::Sequence(
                "instrument value requested before the value lattice was built".into(),
            )
        })?;
        root_value(values, self.indexer)
    }

    /// The price lattice, once built.
    pub fn price_lattice(&self) -> Option<&SparseLattice> {
        self.prices.as_ref()
    }

    /// The value lattice, once built.
    pub fn value_lattice(&self) -> Option<&SparseLattice> {
        self.values.as_ref()
    }

    /// Dense price lattice. An unbuilt lattice exports as all zeros.
    pub fn price_tree(&self) -> Matrix {
        self.dense(self.prices.as_ref())
    }

    /// Dense price lattice with `f` applied to populated cells only.
    pub fn price_tree_with<F: Fn(Real) -> Real>(&self, f: F) -> Matrix {
        match &self.prices {
            Some(prices) => prices.map(f).to_dense(),
            None => self.dense(None),
        }
    }

    /// Dense value lattice. An unbuilt lattice exports as all zeros.
    pub fn value_tree(&self) -> Matrix {
        self.dense(self.values.as_ref())
    }

    fn dense(&self, lattice: Option<&SparseLattice>) -> Matrix {
        lattice.map_or_else(
            || Matrix::zeros(self.indexer.rows(), self.indexer.columns()),
            SparseLattice::to_dense,
        )
    }
}

/// Root cell of a value lattice.
pub(crate) fn root_value(values: &SparseLattice, indexer: LatticeIndexer) -> Result<Real> {
    values.get(indexer.mid_row(), 0).ok_or_else(|| {
        Error::Postcondition("root of the value lattice was never written".into())
    })
}
