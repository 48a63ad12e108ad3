//! Lattice geometry.
//!
//! A lattice with `steps = N` has `N + 1` columns (time steps) and `2N + 1`
//! rows (price offsets). The root sits at `(N, 0)`. Column `j` reaches rows
//! `N - j ..= N + j`, so the populated region is a triangle that opens to the
//! right. Moving "up" decreases the row index.

use std::ops::Range;

use tp_core::{ensure_config, errors::Result, Size};

/// The up, middle and down children of a node.
///
/// Used for child coordinates, child prices and child values alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Branches<T> {
    /// Child reached by an up move.
    pub up: T,
    /// Child at the same price level.
    pub mid: T,
    /// Child reached by a down move.
    pub down: T,
}

impl<T> Branches<T> {
    /// Bundle three children.
    pub fn new(up: T, mid: T, down: T) -> Self {
        Self { up, mid, down }
    }

    /// Apply `f` to each child.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Branches<U> {
        Branches {
            up: f(self.up),
            mid: f(self.mid),
            down: f(self.down),
        }
    }

    /// Children in `[up, mid, down]` order.
    pub fn into_array(self) -> [T; 3] {
        [self.up, self.mid, self.down]
    }
}

/// Coordinates of the three children of `(row, col)`.
///
/// The caller guarantees `row >= 1`, which holds for every reachable cell of
/// a non-terminal column.
pub fn child_indices(row: usize, col: usize) -> Branches<(usize, usize)> {
    Branches {
        up: (row - 1, col + 1),
        mid: (row, col + 1),
        down: (row + 1, col + 1),
    }
}

/// Shape of a lattice with a given number of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatticeIndexer {
    steps: Size,
}

impl LatticeIndexer {
    /// Geometry for `steps` time steps. Fails for `steps < 1`.
    pub fn new(steps: Size) -> Result<Self> {
        ensure_config!(
            steps >= 1,
            "must have a step count of at least 1, got {steps}"
        );
        Ok(Self { steps })
    }

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Number of rows, `2 * steps + 1`.
    pub fn rows(&self) -> usize {
        2 * self.steps + 1
    }

    /// Number of columns, `steps + 1`.
    pub fn columns(&self) -> usize {
        self.steps + 1
    }

    /// Row of the root node.
    pub fn mid_row(&self) -> usize {
        self.steps
    }

    /// Rows reachable in column `col`: `steps - col .. steps + col + 1`.
    ///
    /// Both lattice passes iterate exactly this range. Empty for columns past
    /// the last one.
    pub fn reachable_rows(&self, col: usize) -> Range<usize> {
        if col > self.steps {
            return 0..0;
        }
        self.steps - col..self.steps + col + 1
    }

    /// Number of reachable rows in column `col`.
    pub fn band_width(&self, col: usize) -> usize {
        self.reachable_rows(col).len()
    }

    /// Whether `(row, col)` lies inside the reachable triangle.
    pub fn is_reachable(&self, row: usize, col: usize) -> bool {
        self.reachable_rows(col).contains(&row)
    }

    /// Position of `(row, col)` within its column's band.
    pub(crate) fn band_offset(&self, row: usize, col: usize) -> Option<usize> {
        let rows = self.reachable_rows(col);
        rows.contains(&row).then(|| row - rows.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_core::Error;

    #[test]
    fn children_are_adjacent_rows_of_next_column() {
        let c = child_indices(5, 2);
        assert_eq!(c.up, (4, 3));
        assert_eq!(c.mid, (5, 3));
        assert_eq!(c.down, (6, 3));
    }

    #[test]
    fn dimensions() {
        let ix = LatticeIndexer::new(4).unwrap();
        assert_eq!(ix.rows(), 9);
        assert_eq!(ix.columns(), 5);
        assert_eq!(ix.mid_row(), 4);
    }

    #[test]
    fn reachable_band_is_symmetric_about_mid_row() {
        let ix = LatticeIndexer::new(4).unwrap();
        assert_eq!(ix.reachable_rows(0), 4..5);
        assert_eq!(ix.reachable_rows(2), 2..7);
        assert_eq!(ix.reachable_rows(4), 0..9);
        assert_eq!(ix.reachable_rows(5), 0..0);
        for col in 0..=4 {
            assert_eq!(ix.band_width(col), 2 * col + 1);
            let r = ix.reachable_rows(col);
            assert_eq!(ix.mid_row() - r.start, r.end - 1 - ix.mid_row());
        }
    }

    #[test]
    fn reachability() {
        let ix = LatticeIndexer::new(3).unwrap();
        assert!(ix.is_reachable(3, 0));
        assert!(!ix.is_reachable(2, 0));
        assert!(ix.is_reachable(0, 3));
        assert!(!ix.is_reachable(0, 2));
        assert!(!ix.is_reachable(7, 3));
        assert_eq!(ix.band_offset(1, 2), Some(0));
        assert_eq!(ix.band_offset(5, 2), Some(4));
        assert_eq!(ix.band_offset(0, 2), None);
    }

    #[test]
    fn zero_steps_is_a_configuration_error() {
        assert!(matches!(
            LatticeIndexer::new(0),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn branches_map_preserves_order() {
        let b = Branches::new(1, 2, 3).map(|x| x * 10);
        assert_eq!(b.into_array(), [10, 20, 30]);
    }
}
