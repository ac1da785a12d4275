//! Greedy one-to-one mapping.

use std::collections::BTreeSet;

use tracing::debug;

use crate::confusion::{ConfusionMatrix, Label};

use super::Mapping;

impl<G: Label, P: Label> ConfusionMatrix<G, P> {
    /// Computes the greedy one-to-one mapping.
    ///
    /// Pairs are visited by descending count, ties broken by ascending gold
    /// label and then ascending predicted label. A pair is kept when neither
    /// its predicted nor its gold label has been used yet. The result is a
    /// heuristic: it can miss the assignment with the largest total count.
    ///
    /// # Examples
    /// ```
    /// use labelmatch_core::ConfusionMatrix;
    ///
    /// let matrix: ConfusionMatrix<&str, u32> =
    ///     [("A", 1, 9), ("B", 2, 9), ("A", 2, 10)].into_iter().collect();
    /// let mapping = matrix.one_to_one_greedy_mapping();
    /// assert_eq!(mapping.get(&2), Some(&"A"));
    /// assert_eq!(mapping.get(&1), None);
    /// ```
    #[must_use]
    pub fn one_to_one_greedy_mapping(&self) -> Mapping<P, G> {
        let mut by_count: Vec<((&G, &P), u128)> = self.as_confusion_items().collect();
        by_count.sort_by(|(left_pair, left_count), (right_pair, right_count)| {
            right_count
                .cmp(left_count)
                .then_with(|| left_pair.cmp(right_pair))
        });

        let mut mapping = Mapping::new();
        let mut used_gold = BTreeSet::new();
        for ((gold, predicted), _) in by_count {
            if mapping.contains(predicted) || used_gold.contains(gold) {
                continue;
            }
            used_gold.insert(gold);
            mapping.insert(predicted.clone(), gold.clone());
        }

        debug!(mapped = mapping.len(), "greedy one-to-one mapping computed");
        mapping
    }
}
