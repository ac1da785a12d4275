//! Scoring mappings against accumulated counts.

use tracing::debug;

use crate::confusion::{ConfusionMatrix, Label};
use crate::error::{EvalError, Result};

use super::{Mapping, MappingStrategy};

/// Matched and unmatched observation counts for a mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Score {
    /// Observations whose predicted label maps to their gold label.
    pub right: u128,
    /// Every other observation, including unmapped predicted labels.
    pub wrong: u128,
    /// `right / (right + wrong)`, in `[0.0, 1.0]`.
    pub accuracy: f64,
}

impl Score {
    /// Builds a score from matched and unmatched counts.
    ///
    /// # Errors
    /// Returns [`EvalError::EmptyInput`] when `right + wrong == 0`, since
    /// accuracy is undefined without observations, and
    /// [`EvalError::CountOverflow`] when the sum does not fit in `u128`.
    ///
    /// # Examples
    /// ```
    /// use labelmatch_core::Score;
    ///
    /// let score = Score::from_counts(3, 1)?;
    /// assert_eq!(score.accuracy, 0.75);
    /// assert!(Score::from_counts(0, 0).is_err());
    /// # Ok::<(), labelmatch_core::EvalError>(())
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "accuracy is a floating-point ratio of counts."
    )]
    pub fn from_counts(right: u128, wrong: u128) -> Result<Self> {
        let total = right
            .checked_add(wrong)
            .ok_or(EvalError::CountOverflow {
                context: "eval_mapping",
            })?;
        if total == 0 {
            return Err(EvalError::EmptyInput {
                context: "eval_mapping",
            });
        }
        Ok(Self {
            right,
            wrong,
            accuracy: (right as f64) / (total as f64),
        })
    }

    /// Total number of scored observations.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.right + self.wrong
    }
}

impl<G: Label, P: Label> ConfusionMatrix<G, P> {
    /// Scores `mapping` against the recorded observations.
    ///
    /// An observation counts as right when its predicted label maps to its
    /// gold label and as wrong otherwise, including when the predicted label
    /// is absent from `mapping`.
    ///
    /// # Errors
    /// Returns [`EvalError::EmptyInput`] when nothing has been recorded.
    /// Sums are exact: totals beyond `u64::MAX` are kept in `u128`.
    ///
    /// # Examples
    /// ```
    /// use labelmatch_core::ConfusionMatrix;
    ///
    /// let matrix: ConfusionMatrix<&str, u32> =
    ///     [("A", 1, 9), ("B", 2, 9), ("A", 2, 10)].into_iter().collect();
    /// let score = matrix.eval_mapping(&matrix.many_to_one_mapping())?;
    /// assert_eq!((score.right, score.wrong), (19, 9));
    /// # Ok::<(), labelmatch_core::EvalError>(())
    /// ```
    pub fn eval_mapping(&self, mapping: &Mapping<P, G>) -> Result<Score> {
        let mut right = 0_u128;
        let mut wrong = 0_u128;
        for ((gold, predicted), count) in self.as_confusion_items() {
            let tally = if mapping.get(predicted) == Some(gold) {
                &mut right
            } else {
                &mut wrong
            };
            *tally = tally
                .checked_add(count)
                .ok_or(EvalError::CountOverflow {
                    context: "eval_mapping",
                })?;
        }
        let score = Score::from_counts(right, wrong)?;
        debug!(right, wrong, accuracy = score.accuracy, "mapping evaluated");
        Ok(score)
    }

    /// Computes and scores the greedy one-to-one mapping.
    ///
    /// # Errors
    /// Returns [`EvalError::EmptyInput`] when nothing has been recorded.
    pub fn one_to_one_greedy(&self) -> Result<Score> {
        self.score(MappingStrategy::Greedy)
    }

    /// Computes and scores the optimal one-to-one mapping.
    ///
    /// # Errors
    /// Returns [`EvalError::EmptyInput`] when nothing has been recorded, or
    /// an assignment error from [`Self::one_to_one_optimal_mapping`].
    pub fn one_to_one_optimal(&self) -> Result<Score> {
        self.score(MappingStrategy::Optimal)
    }

    /// Computes and scores the many-to-one mapping.
    ///
    /// # Errors
    /// Returns [`EvalError::EmptyInput`] when nothing has been recorded.
    pub fn many_to_one(&self) -> Result<Score> {
        self.score(MappingStrategy::ManyToOne)
    }
}
