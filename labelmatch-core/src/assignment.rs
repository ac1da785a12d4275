//! Minimum-cost assignment on rectangular cost matrices.
//!
//! The optimal one-to-one mapping only needs the narrow
//! [`AssignmentSolver`] interface: hand over a [`CostMatrix`], receive the
//! matched `(row, col)` pairs. [`KuhnMunkres`] is the default solver.

use crate::error::AssignmentError;

/// Dense row-major matrix of signed assignment costs.
///
/// # Examples
/// ```
/// use labelmatch_core::CostMatrix;
///
/// let costs = CostMatrix::from_rows(vec![vec![1, 2], vec![3, 4]])?;
/// assert_eq!((costs.rows(), costs.cols()), (2, 2));
/// assert_eq!(costs.get(1, 0), Some(3));
/// assert_eq!(costs.get(2, 0), None);
/// # Ok::<(), labelmatch_core::AssignmentError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    costs: Vec<i64>,
}

impl CostMatrix {
    /// Builds a matrix from equally sized rows.
    ///
    /// # Errors
    /// Returns [`AssignmentError::RaggedMatrix`] when a row's length differs
    /// from the first row's.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, AssignmentError> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut costs = Vec::with_capacity(row_count.saturating_mul(cols));
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(AssignmentError::RaggedMatrix {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            costs.extend(values);
        }
        Ok(Self {
            rows: row_count,
            cols,
            costs,
        })
    }

    /// Number of rows.
    #[must_use]
    #[rustfmt::skip]
    pub const fn rows(&self) -> usize { self.rows }

    /// Number of columns.
    #[must_use]
    #[rustfmt::skip]
    pub const fn cols(&self) -> usize { self.cols }

    /// Returns `true` when the matrix has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Returns the cost at `(row, col)`, or `None` outside the matrix.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.costs.get(row * self.cols + col).copied()
    }

    fn transposed(&self) -> Self {
        let mut costs = Vec::with_capacity(self.costs.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                costs.push(self.costs[row * self.cols + col]);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            costs,
        }
    }
}

/// Solves the minimum-cost assignment problem.
///
/// Implementations return `(row, col)` pairs in which every row and every
/// column appears at most once, `min(rows, cols)` pairs in total, and whose
/// summed cost is minimal among all such assignments.
pub trait AssignmentSolver {
    /// Computes a minimum-cost assignment for `costs`.
    ///
    /// # Errors
    /// Returns [`AssignmentError`] when the solver cannot handle the matrix.
    fn solve_min_cost_assignment(
        &self,
        costs: &CostMatrix,
    ) -> Result<Vec<(usize, usize)>, AssignmentError>;
}

/// Kuhn–Munkres (Hungarian) solver with dual potentials.
///
/// Runs in `O(n² · m)` for an `n × m` matrix with `n <= m` (taller matrices
/// are transposed first), which is cubic in the label count. This is the
/// expensive path of the crate; keep label cardinality in the low hundreds.
///
/// # Examples
/// ```
/// use labelmatch_core::{AssignmentSolver, CostMatrix, KuhnMunkres};
///
/// let costs = CostMatrix::from_rows(vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]])?;
/// let mut pairs = KuhnMunkres.solve_min_cost_assignment(&costs)?;
/// pairs.sort_unstable();
/// assert_eq!(pairs, vec![(0, 1), (1, 0), (2, 2)]);
/// # Ok::<(), labelmatch_core::AssignmentError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct KuhnMunkres;

impl AssignmentSolver for KuhnMunkres {
    fn solve_min_cost_assignment(
        &self,
        costs: &CostMatrix,
    ) -> Result<Vec<(usize, usize)>, AssignmentError> {
        if costs.is_empty() {
            return Ok(Vec::new());
        }
        if costs.rows() <= costs.cols() {
            return Ok(solve_wide(costs));
        }
        let pairs = solve_wide(&costs.transposed())
            .into_iter()
            .map(|(col, row)| (row, col))
            .collect();
        Ok(pairs)
    }
}

/// Hungarian method for `rows <= cols`, using 1-based working arrays where
/// index 0 is a sentinel column.
fn solve_wide(costs: &CostMatrix) -> Vec<(usize, usize)> {
    let n = costs.rows();
    let m = costs.cols();
    let cost = |row: usize, col: usize| i128::from(costs.costs[(row - 1) * m + (col - 1)]);
    let infinity = i128::MAX / 4;

    let mut row_potential = vec![0_i128; n + 1];
    let mut col_potential = vec![0_i128; m + 1];
    // `matched_row[col]` is the 1-based row matched to `col`, or 0.
    let mut matched_row = vec![0_usize; m + 1];
    let mut way = vec![0_usize; m + 1];

    for row in 1..=n {
        matched_row[0] = row;
        let mut col0 = 0_usize;
        let mut min_slack = vec![infinity; m + 1];
        let mut used = vec![false; m + 1];
        loop {
            used[col0] = true;
            let row0 = matched_row[col0];
            let mut delta = infinity;
            let mut col1 = 0_usize;
            for col in 1..=m {
                if used[col] {
                    continue;
                }
                let slack = cost(row0, col) - row_potential[row0] - col_potential[col];
                if slack < min_slack[col] {
                    min_slack[col] = slack;
                    way[col] = col0;
                }
                if min_slack[col] < delta {
                    delta = min_slack[col];
                    col1 = col;
                }
            }
            for col in 0..=m {
                if used[col] {
                    row_potential[matched_row[col]] += delta;
                    col_potential[col] -= delta;
                } else {
                    min_slack[col] -= delta;
                }
            }
            col0 = col1;
            if matched_row[col0] == 0 {
                break;
            }
        }
        // Flip the augmenting path back to the sentinel.
        loop {
            let col1 = way[col0];
            matched_row[col0] = matched_row[col1];
            col0 = col1;
            if col0 == 0 {
                break;
            }
        }
    }

    (1..=m)
        .filter_map(|col| {
            let row = matched_row[col];
            (row != 0).then(|| (row - 1, col - 1))
        })
        .collect()
}
