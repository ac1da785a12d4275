//! Precision, recall and F-scores.
//!
//! Two input conventions are supported. The *component* form takes the
//! number of matched items together with the gold and proposed totals; the
//! *posneg* form takes true-positive, false-positive and false-negative
//! counts. Any ratio whose denominator is zero is reported as `0.0` rather
//! than as an error, so scoring an empty proposal never fails.

/// Precision and recall of a set of proposed items against gold items.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrecisionRecall {
    /// Fraction of proposed items that were correct.
    pub precision: f64,
    /// Fraction of gold items that were found.
    pub recall: f64,
}

impl PrecisionRecall {
    /// Weighted harmonic mean of precision and recall; see [`fscore`].
    #[must_use]
    pub fn fscore(&self, beta: f64) -> f64 {
        fscore(self.precision, self.recall, beta)
    }

    /// Extends the pair with its F-score for `beta`.
    #[must_use]
    pub fn with_fscore(self, beta: f64) -> PrecisionRecallF {
        PrecisionRecallF {
            precision: self.precision,
            recall: self.recall,
            fscore: self.fscore(beta),
        }
    }
}

/// Precision, recall and the F-score derived from them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrecisionRecallF {
    /// Fraction of proposed items that were correct.
    pub precision: f64,
    /// Fraction of gold items that were found.
    pub recall: f64,
    /// Weighted harmonic mean of `precision` and `recall`.
    pub fscore: f64,
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "ratios of counts are floating-point by definition."
)]
fn ratio(numerator: u64, denominator: u128) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        (numerator as f64) / (denominator as f64)
    }
}

/// Computes precision and recall from a matched count and the sizes of the
/// gold and proposed sets.
///
/// # Examples
/// ```
/// use labelmatch_core::precision_recall;
///
/// let pr = precision_recall(10, 10, 20);
/// assert_eq!((pr.precision, pr.recall), (0.5, 1.0));
/// ```
#[must_use]
pub fn precision_recall(n_matched: u64, n_gold: u64, n_proposed: u64) -> PrecisionRecall {
    PrecisionRecall {
        precision: ratio(n_matched, u128::from(n_proposed)),
        recall: ratio(n_matched, u128::from(n_gold)),
    }
}

/// Computes precision and recall from true-positive, false-positive and
/// false-negative counts.
#[must_use]
pub fn precision_recall_posneg(
    true_positives: u64,
    false_positives: u64,
    false_negatives: u64,
) -> PrecisionRecall {
    let tp = u128::from(true_positives);
    PrecisionRecall {
        precision: ratio(true_positives, tp + u128::from(false_positives)),
        recall: ratio(true_positives, tp + u128::from(false_negatives)),
    }
}

/// Returns the F-score `(β² + 1)·p·r / (β²·p + r)`.
///
/// `beta = 1.0` gives the balanced F1 score. Larger values of `beta` pull
/// the score towards recall, smaller ones towards precision. A zero
/// denominator yields `0.0`.
///
/// # Examples
/// ```
/// use labelmatch_core::fscore;
///
/// assert_eq!(fscore(0.5, 0.5, 1.0), 0.5);
/// assert_eq!(fscore(0.0, 0.0, 1.0), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the F-score is a floating-point mean."
)]
pub fn fscore(precision: f64, recall: f64, beta: f64) -> f64 {
    let beta_sq = beta * beta;
    let denominator = beta_sq * precision + recall;
    if denominator == 0.0 {
        return 0.0;
    }
    (beta_sq + 1.0) * precision * recall / denominator
}

/// Computes precision, recall and F-score from a matched count and the sizes
/// of the gold and proposed sets.
#[must_use]
pub fn precision_recall_f(
    n_matched: u64,
    n_gold: u64,
    n_proposed: u64,
    beta: f64,
) -> PrecisionRecallF {
    precision_recall(n_matched, n_gold, n_proposed).with_fscore(beta)
}

/// Computes precision, recall and F-score from true-positive,
/// false-positive and false-negative counts.
#[must_use]
pub fn precision_recall_f_posneg(
    true_positives: u64,
    false_positives: u64,
    false_negatives: u64,
    beta: f64,
) -> PrecisionRecallF {
    precision_recall_posneg(true_positives, false_positives, false_negatives).with_fscore(beta)
}

/// Shortcut for the F-score of [`precision_recall`].
#[must_use]
pub fn fscore_from_components(n_matched: u64, n_gold: u64, n_proposed: u64, beta: f64) -> f64 {
    precision_recall(n_matched, n_gold, n_proposed).fscore(beta)
}

/// Shortcut for the F-score of [`precision_recall_posneg`].
#[must_use]
pub fn fscore_from_components_posneg(
    true_positives: u64,
    false_positives: u64,
    false_negatives: u64,
    beta: f64,
) -> f64 {
    precision_recall_posneg(true_positives, false_positives, false_negatives).fscore(beta)
}
