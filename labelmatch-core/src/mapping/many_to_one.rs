//! Many-to-one mapping.

use tracing::debug;

use crate::confusion::{ConfusionMatrix, Label};

use super::Mapping;

impl<G: Label, P: Label> ConfusionMatrix<G, P> {
    /// Computes the many-to-one mapping: every predicted label goes to the
    /// gold label it co-occurs with most often.
    ///
    /// Ties resolve to the smallest gold label. Several predicted labels may
    /// share a gold label, so the matched count is never below that of a
    /// one-to-one mapping.
    ///
    /// # Examples
    /// ```
    /// use labelmatch_core::ConfusionMatrix;
    ///
    /// let matrix: ConfusionMatrix<&str, u32> =
    ///     [("A", 1, 9), ("B", 2, 9), ("A", 2, 10)].into_iter().collect();
    /// let mapping = matrix.many_to_one_mapping();
    /// assert_eq!(mapping.get(&1), Some(&"A"));
    /// assert_eq!(mapping.get(&2), Some(&"A"));
    /// ```
    #[must_use]
    pub fn many_to_one_mapping(&self) -> Mapping<P, G> {
        let mut mapping = Mapping::new();
        for (predicted, gold_counts) in self.by_predicted() {
            let mut best: Option<(&G, u128)> = None;
            // Ascending gold order plus a strict comparison keeps the
            // smallest gold label among equal counts.
            for (gold, &count) in gold_counts {
                if best.is_none_or(|(_, top)| count > top) {
                    best = Some((gold, count));
                }
            }
            if let Some((gold, _)) = best {
                mapping.insert(predicted.clone(), gold.clone());
            }
        }

        debug!(mapped = mapping.len(), "many-to-one mapping computed");
        mapping
    }
}
