//! `Matrix`: dense two-dimensional export of a lattice.
//!
//! A thin newtype around `nalgebra::DMatrix<f64>`. Rows are price offsets,
//! columns are time steps.

use nalgebra::DMatrix;
use std::ops::{Index, IndexMut};
use tp_core::Real;

/// A dynamically-sized 2D matrix of `Real` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(DMatrix<Real>);

impl Matrix {
    /// Create a zero-filled `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self(DMatrix::zeros(rows, cols))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.0.ncols()
    }

    /// Column `j` as a vector.
    pub fn column(&self, j: usize) -> Vec<Real> {
        self.0.column(j).iter().copied().collect()
    }

    /// Number of non-zero entries.
    pub fn count_nonzero(&self) -> usize {
        self.0.iter().filter(|&&x| x != 0.0).count()
    }

    /// Borrow the inner `DMatrix` for linear-algebra work.
    pub fn inner(&self) -> &DMatrix<Real> {
        &self.0
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Real;
    fn index(&self, (i, j): (usize, usize)) -> &Real {
        &self.0[(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Real {
        &mut self.0[(i, j)]
    }
}
