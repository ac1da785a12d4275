//! Optimal one-to-one mapping via minimum-cost assignment.
//!
//! Rows are the observed predicted labels and columns the observed gold
//! labels, both in ascending order. Each cell holds the negated joint count,
//! turning "maximise matched observations" into "minimise cost". When there
//! are fewer predicted labels than gold labels, zero-cost padding rows make
//! the matrix at least as tall as it is wide; matches on padding rows are
//! discarded.

use tracing::{Span, debug, field, instrument};

use crate::assignment::{AssignmentSolver, CostMatrix, KuhnMunkres};
use crate::confusion::{ConfusionMatrix, Label};
use crate::error::{AssignmentError, Result};

use super::Mapping;

/// Cost matrix together with the labels its rows and columns stand for.
pub(super) struct LabelledCosts<'a, G, P> {
    pub(super) costs: CostMatrix,
    pub(super) predicted: Vec<&'a P>,
    pub(super) gold: Vec<&'a G>,
}

fn negated_cost(count: u128) -> core::result::Result<i64, AssignmentError> {
    i64::try_from(count)
        .map(|value| -value)
        .map_err(|_| AssignmentError::CostOverflow { count })
}

impl<G: Label, P: Label> ConfusionMatrix<G, P> {
    pub(super) fn labelled_costs(&self) -> Result<LabelledCosts<'_, G, P>> {
        let gold: Vec<&G> = self.gold_labels().into_iter().collect();
        let predicted: Vec<&P> = self.predicted_labels().collect();

        let mut rows = Vec::with_capacity(predicted.len().max(gold.len()));
        for (_, gold_counts) in self.by_predicted() {
            let row = gold
                .iter()
                .map(|label| negated_cost(gold_counts.get(*label).copied().unwrap_or(0)))
                .collect::<core::result::Result<Vec<i64>, AssignmentError>>()?;
            rows.push(row);
        }
        while rows.len() < gold.len() {
            rows.push(vec![0; gold.len()]);
        }

        Ok(LabelledCosts {
            costs: CostMatrix::from_rows(rows)?,
            predicted,
            gold,
        })
    }

    /// Computes the optimal one-to-one mapping with the default
    /// [`KuhnMunkres`] solver.
    ///
    /// Among all mappings that use every gold label at most once, the result
    /// maximises the matched count. This is the expensive path: cubic in the
    /// number of labels. Prefer it only while label cardinality stays small
    /// (low hundreds).
    ///
    /// # Errors
    /// Returns [`crate::EvalError::Assignment`] when a count exceeds
    /// `i64::MAX` and so cannot be negated into a cost.
    ///
    /// # Examples
    /// ```
    /// use labelmatch_core::ConfusionMatrix;
    ///
    /// let matrix: ConfusionMatrix<&str, u32> =
    ///     [("A", 1, 9), ("B", 2, 9), ("A", 2, 10)].into_iter().collect();
    /// let mapping = matrix.one_to_one_optimal_mapping()?;
    /// assert_eq!(mapping.get(&1), Some(&"A"));
    /// assert_eq!(mapping.get(&2), Some(&"B"));
    /// # Ok::<(), labelmatch_core::EvalError>(())
    /// ```
    pub fn one_to_one_optimal_mapping(&self) -> Result<Mapping<P, G>> {
        self.one_to_one_optimal_mapping_with(&KuhnMunkres)
    }

    /// Computes the optimal one-to-one mapping with a caller-supplied
    /// [`AssignmentSolver`].
    ///
    /// # Errors
    /// Returns [`crate::EvalError::Assignment`] when the cost matrix cannot
    /// be built, when `solver` fails, or when it reports a pair outside the
    /// matrix.
    #[instrument(
        name = "mapping.one_to_one_optimal",
        err,
        skip(self, solver),
        fields(rows = field::Empty, cols = field::Empty),
    )]
    pub fn one_to_one_optimal_mapping_with<S>(&self, solver: &S) -> Result<Mapping<P, G>>
    where
        S: AssignmentSolver + ?Sized,
    {
        let LabelledCosts {
            costs,
            predicted,
            gold,
        } = self.labelled_costs()?;
        let span = Span::current();
        span.record("rows", costs.rows());
        span.record("cols", costs.cols());

        let pairs = solver.solve_min_cost_assignment(&costs)?;
        let mut mapping = Mapping::new();
        for (row, col) in pairs {
            let out_of_bounds = AssignmentError::OutOfBounds {
                row,
                col,
                rows: costs.rows(),
                cols: costs.cols(),
            };
            if row >= costs.rows() {
                return Err(out_of_bounds.into());
            }
            let Some(&gold_label) = gold.get(col) else {
                return Err(out_of_bounds.into());
            };
            // Rows past the predicted labels are padding.
            if let Some(&predicted_label) = predicted.get(row) {
                mapping.insert(predicted_label.clone(), gold_label.clone());
            }
        }

        debug!(
            mapped = mapping.len(),
            padding_rows = costs.rows().saturating_sub(predicted.len()),
            "optimal one-to-one mapping computed"
        );
        Ok(mapping)
    }
}
