//! Sparse lattice storage.
//!
//! Each column stores only its reachable band (`2j + 1` cells for column
//! `j`), and each cell is `Option<Real>`: `None` means the cell was never
//! written. A written `0.0` is an ordinary value, distinct from absence.

use tp_core::{errors::Error, errors::Result, Real, Size};
use tp_math::Matrix;

use crate::indexer::LatticeIndexer;

/// Cells of one lattice (prices or values).
#[derive(Debug, Clone, PartialEq)]
pub struct SparseLattice {
    indexer: LatticeIndexer,
    columns: Vec<Vec<Option<Real>>>,
}

impl SparseLattice {
    /// An empty lattice for `steps` time steps.
    pub fn new(steps: Size) -> Result<Self> {
        LatticeIndexer::new(steps).map(Self::with_indexer)
    }

    /// An empty lattice with the given geometry.
    pub fn with_indexer(indexer: LatticeIndexer) -> Self {
        let columns = (0..indexer.columns())
            .map(|col| vec![None; indexer.band_width(col)])
            .collect();
        Self { indexer, columns }
    }

    /// Geometry of this lattice.
    pub fn indexer(&self) -> LatticeIndexer {
        self.indexer
    }

    /// Value at `(row, col)`, or `None` if never written or unreachable.
    pub fn get(&self, row: usize, col: usize) -> Option<Real> {
        let offset = self.indexer.band_offset(row, col)?;
        self.columns[col][offset]
    }

    /// Write exactly one cell. Fails outside the reachable band.
    pub fn set(&mut self, row: usize, col: usize, value: Real) -> Result<()> {
        let offset = self
            .indexer
            .band_offset(row, col)
            .ok_or(Error::IndexOutOfRange { row, col })?;
        self.columns[col][offset] = Some(value);
        Ok(())
    }

    /// Whether `(row, col)` has been written.
    pub fn is_populated(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// Populated cells of column `col` as `(row, value)`, top row first.
    pub fn populated(&self, col: usize) -> impl Iterator<Item = (usize, Real)> + '_ {
        let start = self.indexer.reachable_rows(col).start;
        self.columns
            .get(col)
            .into_iter()
            .flat_map(|cells| cells.iter().enumerate())
            .filter_map(move |(offset, cell)| cell.map(|v| (start + offset, v)))
    }

    /// Number of populated cells in column `col`.
    pub fn populated_count(&self, col: usize) -> usize {
        self.populated(col).count()
    }

    /// Number of populated cells in the whole lattice.
    pub fn total_populated(&self) -> usize {
        self.columns.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Apply `f` to every populated cell; absent cells stay absent.
    pub fn map<F: Fn(Real) -> Real>(&self, f: F) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|cells| cells.iter().map(|c| c.map(&f)).collect())
            .collect();
        Self {
            indexer: self.indexer,
            columns,
        }
    }

    /// Dense `rows × columns` export; absent cells render as `0.0`.
    pub fn to_dense(&self) -> Matrix {
        let mut dense = Matrix::zeros(self.indexer.rows(), self.indexer.columns());
        for col in 0..self.indexer.columns() {
            for (row, value) in self.populated(col) {
                dense[(row, col)] = value;
            }
        }
        dense
    }
}
