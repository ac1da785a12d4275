//! Correspondences between predicted and gold labels.
//!
//! Three strategies derive a [`Mapping`] from a [`ConfusionMatrix`]:
//!
//! - [`ConfusionMatrix::one_to_one_greedy_mapping`] walks pairs from the
//!   highest count down and keeps the first unused match on both sides.
//! - [`ConfusionMatrix::one_to_one_optimal_mapping`] solves the assignment
//!   problem exactly. It is the only super-quadratic call in the crate.
//! - [`ConfusionMatrix::many_to_one_mapping`] sends every predicted label to
//!   its most frequent gold label, with no uniqueness constraint.
//!
//! Matched counts always satisfy `greedy <= optimal <= many-to-one`.
//! [`ConfusionMatrix::eval_mapping`] scores any mapping, including ones
//! supplied by the caller.

mod greedy;
mod many_to_one;
mod optimal;
mod score;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::confusion::{ConfusionMatrix, Label};
use crate::error::Result;

pub use self::score::Score;

/// A function from predicted labels to gold labels.
///
/// Each predicted label maps to at most one gold label. Mappings need not be
/// total (unmapped predicted labels always score as wrong) and need not be
/// injective; see [`Mapping::is_one_to_one`].
///
/// # Examples
/// ```
/// use labelmatch_core::Mapping;
///
/// let mapping: Mapping<u32, &str> = [(1, "A"), (2, "A")].into_iter().collect();
/// assert_eq!(mapping.get(&1), Some(&"A"));
/// assert_eq!(mapping.get(&3), None);
/// assert!(!mapping.is_one_to_one());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mapping<P, G> {
    targets: BTreeMap<P, G>,
}

impl<P: Label, G: Label> Default for Mapping<P, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Label, G: Label> Mapping<P, G> {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            targets: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, predicted: P, gold: G) {
        self.targets.insert(predicted, gold);
    }

    /// Returns the gold label assigned to `predicted`.
    #[must_use]
    pub fn get(&self, predicted: &P) -> Option<&G> {
        self.targets.get(predicted)
    }

    /// Returns `true` when `predicted` has an assigned gold label.
    #[must_use]
    pub fn contains(&self, predicted: &P) -> bool {
        self.targets.contains_key(predicted)
    }

    /// Number of mapped predicted labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` when no predicted label is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterates `(predicted, gold)` assignments in ascending predicted order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, &G)> + '_ {
        self.targets.iter()
    }

    /// Returns `true` when no gold label is the target of two predicted
    /// labels.
    ///
    /// Consumers that expect a one-to-one mapping treat a `false` result as
    /// a caller bug rather than a recoverable condition.
    #[must_use]
    pub fn is_one_to_one(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.targets.values().all(|gold| seen.insert(gold))
    }
}

impl<P: Label, G: Label> FromIterator<(P, G)> for Mapping<P, G> {
    /// Collects `(predicted, gold)` pairs; a later pair for the same
    /// predicted label replaces the earlier one.
    fn from_iter<I: IntoIterator<Item = (P, G)>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

/// Selects one of the mapping strategies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum MappingStrategy {
    /// Greedy one-to-one matching by descending count.
    Greedy,
    /// Optimal one-to-one matching via the assignment problem.
    Optimal,
    /// Most frequent gold label per predicted label.
    ManyToOne,
}

impl MappingStrategy {
    /// Every strategy, in increasing order of matched count.
    pub const ALL: [Self; 3] = [Self::Greedy, Self::Optimal, Self::ManyToOne];

    /// Returns the stable name of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Optimal => "optimal",
            Self::ManyToOne => "many-to-one",
        }
    }
}

impl fmt::Display for MappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<G: Label, P: Label> ConfusionMatrix<G, P> {
    /// Computes the mapping selected by `strategy`.
    ///
    /// # Errors
    /// Only [`MappingStrategy::Optimal`] can fail; see
    /// [`Self::one_to_one_optimal_mapping`].
    pub fn mapping(&self, strategy: MappingStrategy) -> Result<Mapping<P, G>> {
        match strategy {
            MappingStrategy::Greedy => Ok(self.one_to_one_greedy_mapping()),
            MappingStrategy::Optimal => self.one_to_one_optimal_mapping(),
            MappingStrategy::ManyToOne => Ok(self.many_to_one_mapping()),
        }
    }

    /// Computes and scores the mapping selected by `strategy`.
    ///
    /// # Errors
    /// Returns [`crate::EvalError::EmptyInput`] when nothing has been
    /// recorded, or any error from [`Self::mapping`].
    pub fn score(&self, strategy: MappingStrategy) -> Result<Score> {
        let mapping = self.mapping(strategy)?;
        self.eval_mapping(&mapping)
    }
}
