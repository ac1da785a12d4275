//! Joint (gold, predicted) observation counts.
//!
//! [`ConfusionMatrix`] is the accumulator callers feed observations into.
//! [`JointCount`] is its flattened, pair-keyed view and the input to the
//! information measures. Both store counts in ordered maps, so every
//! iteration order is reproducible across runs.
//!
//! Observations arrive as `u64` counts but cells and totals are held as
//! `u128`. Every stored value is a sum of `u64` inputs, so exceeding
//! `u128::MAX` would take more than 2^64 additions.

use std::collections::{BTreeMap, BTreeSet, btree_map};
use std::fmt;

/// Identifier usable as a gold or predicted label.
///
/// Labels carry no numeric meaning: only equality and the total order are
/// used, the latter for deterministic iteration and tie-breaking.
pub trait Label: Clone + Ord + fmt::Debug {}

impl<T: Clone + Ord + fmt::Debug> Label for T {}

/// Non-negative counts keyed by an ordered `(x, y)` pair.
///
/// Pairs that were never recorded have an implicit count of zero and are not
/// stored. Counts are added as `u64` and summed exactly as `u128`.
///
/// # Examples
/// ```
/// use labelmatch_core::JointCount;
///
/// let joint: JointCount<&str, u32> = [(("a", 1), 3), (("b", 1), 2)].into_iter().collect();
/// assert_eq!(joint.get(&"a", &1), 3);
/// assert_eq!(joint.get(&"a", &2), 0);
/// assert_eq!(joint.total(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JointCount<X, Y> {
    counts: BTreeMap<(X, Y), u128>,
}

impl<X: Label, Y: Label> Default for JointCount<X, Y> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Label, Y: Label> JointCount<X, Y> {
    /// Creates an empty joint count.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Adds `count` to the `(x, y)` pair. A zero count is a no-op.
    pub fn add(&mut self, x: X, y: Y, count: u64) {
        self.accumulate(x, y, u128::from(count));
    }

    fn accumulate(&mut self, x: X, y: Y, count: u128) {
        if count == 0 {
            return;
        }
        *self.counts.entry((x, y)).or_insert(0) += count;
    }

    /// Returns the count recorded for `(x, y)`, or zero.
    #[must_use]
    pub fn get(&self, x: &X, y: &Y) -> u128 {
        // The tuple key owns its labels, so build a probe from clones.
        self.counts
            .get(&(x.clone(), y.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct pairs with a non-zero count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` when no pair has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Exact sum of every recorded count.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.counts.values().sum()
    }

    /// Iterates `((x, y), count)` entries in ascending `(x, y)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&(X, Y), u128)> + '_ {
        self.counts.iter().map(|(pair, &count)| (pair, count))
    }

    /// Iterates the raw counts in ascending `(x, y)` order.
    pub fn counts(&self) -> impl Iterator<Item = u128> + '_ {
        self.counts.values().copied()
    }

    /// Returns the marginal counts `(count_x, count_y)`.
    #[must_use]
    pub fn marginals(&self) -> (BTreeMap<X, u128>, BTreeMap<Y, u128>) {
        let mut count_x = BTreeMap::<X, u128>::new();
        let mut count_y = BTreeMap::<Y, u128>::new();
        for ((x, y), &count) in &self.counts {
            *count_x.entry(x.clone()).or_insert(0) += count;
            *count_y.entry(y.clone()).or_insert(0) += count;
        }
        (count_x, count_y)
    }

    /// Adds every count from `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        for ((x, y), &count) in &other.counts {
            self.accumulate(x.clone(), y.clone(), count);
        }
    }

    /// Returns the pairwise sum of `self` and `other`, leaving both untouched.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        // Clone the larger side and fold the smaller one into it.
        let (mut base, extra) = if self.len() >= other.len() {
            (self.clone(), other)
        } else {
            (other.clone(), self)
        };
        base.merge(extra);
        base
    }

    /// Returns at most `limit` pairs (all when `None`) ordered from the
    /// highest count to the lowest.
    ///
    /// Pairs with equal counts are listed in descending `(x, y)` order.
    #[must_use]
    pub fn top_pairs(&self, limit: Option<usize>) -> Vec<((X, Y), u128)> {
        let mut pairs: Vec<((X, Y), u128)> = self
            .counts
            .iter()
            .map(|(pair, &count)| (pair.clone(), count))
            .collect();
        pairs.sort_by(|(left_pair, left), (right_pair, right)| {
            right.cmp(left).then_with(|| right_pair.cmp(left_pair))
        });
        if let Some(limit) = limit {
            pairs.truncate(limit);
        }
        pairs
    }
}

impl<X: Label, Y: Label> FromIterator<((X, Y), u64)> for JointCount<X, Y> {
    fn from_iter<I: IntoIterator<Item = ((X, Y), u64)>>(iter: I) -> Self {
        let mut joint = Self::new();
        joint.extend(iter);
        joint
    }
}

impl<X: Label, Y: Label> Extend<((X, Y), u64)> for JointCount<X, Y> {
    fn extend<I: IntoIterator<Item = ((X, Y), u64)>>(&mut self, iter: I) {
        for ((x, y), count) in iter {
            self.add(x, y, count);
        }
    }
}

impl<X, Y> IntoIterator for JointCount<X, Y> {
    type Item = ((X, Y), u128);
    type IntoIter = btree_map::IntoIter<(X, Y), u128>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

/// Accumulates joint counts of `(gold, predicted)` label pairs.
///
/// Counts are organised by predicted label so per-predicted aggregation (as
/// used by the mapping strategies) is a single map lookup. The matrix only
/// grows: observations are never removed.
///
/// # Examples
/// ```
/// use labelmatch_core::ConfusionMatrix;
///
/// let mut matrix = ConfusionMatrix::new();
/// matrix.add("A", 1, 9);
/// matrix.add_one("B", 2);
/// assert_eq!(matrix.count(&"A", &1), 9);
/// assert_eq!(matrix.total(), 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix<G, P> {
    by_predicted: BTreeMap<P, BTreeMap<G, u128>>,
}

impl<G: Label, P: Label> Default for ConfusionMatrix<G, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Label, P: Label> ConfusionMatrix<G, P> {
    /// Creates an empty confusion matrix.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            by_predicted: BTreeMap::new(),
        }
    }

    /// Records `count` observations of `gold` labelled as `predicted`.
    ///
    /// A zero `count` is a no-op and does not create an entry.
    pub fn add(&mut self, gold: G, predicted: P, count: u64) {
        self.accumulate(gold, predicted, u128::from(count));
    }

    fn accumulate(&mut self, gold: G, predicted: P, count: u128) {
        if count == 0 {
            return;
        }
        *self
            .by_predicted
            .entry(predicted)
            .or_default()
            .entry(gold)
            .or_insert(0) += count;
    }

    /// Records a single observation of `gold` labelled as `predicted`.
    pub fn add_one(&mut self, gold: G, predicted: P) {
        self.add(gold, predicted, 1);
    }

    /// Iterates `((gold, predicted), count)` for every recorded pair.
    ///
    /// Pairs are ordered by predicted label, then by gold label.
    pub fn as_confusion_items(&self) -> impl Iterator<Item = ((&G, &P), u128)> + '_ {
        self.by_predicted.iter().flat_map(|(predicted, gold_counts)| {
            gold_counts
                .iter()
                .map(move |(gold, &count)| ((gold, predicted), count))
        })
    }

    /// Collects the recorded pairs into an owned [`JointCount`] keyed by
    /// `(gold, predicted)`.
    #[must_use]
    pub fn joint_counts(&self) -> JointCount<G, P> {
        let mut joint = JointCount::new();
        for ((gold, predicted), count) in self.as_confusion_items() {
            joint.accumulate(gold.clone(), predicted.clone(), count);
        }
        joint
    }

    /// Returns the count recorded for `(gold, predicted)`, or zero.
    #[must_use]
    pub fn count(&self, gold: &G, predicted: &P) -> u128 {
        self.by_predicted
            .get(predicted)
            .and_then(|gold_counts| gold_counts.get(gold))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the gold-label distribution observed for `predicted`.
    #[must_use]
    pub fn gold_counts_for(&self, predicted: &P) -> Option<&BTreeMap<G, u128>> {
        self.by_predicted.get(predicted)
    }

    /// Iterates predicted labels with their gold-label distributions in
    /// ascending predicted order.
    pub fn by_predicted(&self) -> impl Iterator<Item = (&P, &BTreeMap<G, u128>)> + '_ {
        self.by_predicted.iter()
    }

    /// Iterates every observed predicted label in ascending order.
    pub fn predicted_labels(&self) -> impl Iterator<Item = &P> + '_ {
        self.by_predicted.keys()
    }

    /// Returns every observed gold label in ascending order.
    #[must_use]
    pub fn gold_labels(&self) -> BTreeSet<&G> {
        self.by_predicted
            .values()
            .flat_map(BTreeMap::keys)
            .collect()
    }

    /// Exact sum of every recorded count.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.as_confusion_items().map(|(_, count)| count).sum()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_predicted.is_empty()
    }

    /// Adds every observation recorded in `other` into `self`.
    ///
    /// This is how per-worker accumulators are combined.
    pub fn merge(&mut self, other: &Self) {
        for ((gold, predicted), count) in other.as_confusion_items() {
            self.accumulate(gold.clone(), predicted.clone(), count);
        }
    }

    /// Returns the combination of `self` and `other`, leaving both untouched.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut combined = self.clone();
        combined.merge(other);
        combined
    }
}

impl<G: Label, P: Label> FromIterator<(G, P, u64)> for ConfusionMatrix<G, P> {
    fn from_iter<I: IntoIterator<Item = (G, P, u64)>>(iter: I) -> Self {
        let mut matrix = Self::new();
        matrix.extend(iter);
        matrix
    }
}

impl<G: Label, P: Label> Extend<(G, P, u64)> for ConfusionMatrix<G, P> {
    fn extend<I: IntoIterator<Item = (G, P, u64)>>(&mut self, iter: I) {
        for (gold, predicted, count) in iter {
            self.add(gold, predicted, count);
        }
    }
}
