//! Labelmatch core library.
//!
//! Scores a predicted labelling against a gold-standard labelling whose
//! label vocabularies are unrelated. Observations accumulate in a
//! [`ConfusionMatrix`]; from there the crate derives a label [`Mapping`]
//! with one of three [`MappingStrategy`] variants, scores it, and computes
//! information-theoretic agreement measures over the joint counts.
//! Precision/recall helpers and seeded sampling from discrete distributions
//! round out the toolkit.
//!
//! ```
//! use labelmatch_core::{ConfusionMatrix, MappingStrategy};
//!
//! let mut matrix = ConfusionMatrix::new();
//! matrix.add("A", 1, 9);
//! matrix.add("B", 2, 9);
//! matrix.add("A", 2, 10);
//!
//! let optimal = matrix.score(MappingStrategy::Optimal)?;
//! assert_eq!((optimal.right, optimal.wrong), (18, 10));
//! assert!(matrix.mutual_information()? > 0.0);
//! # Ok::<(), labelmatch_core::EvalError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assignment;
mod confusion;
mod entropy;
mod error;
mod information;
mod mapping;
mod prf;
mod sampling;
#[cfg(test)]
mod test_utils;

pub use crate::{
    assignment::{AssignmentSolver, CostMatrix, KuhnMunkres},
    confusion::{ConfusionMatrix, JointCount, Label},
    entropy::{entropy, entropy_of_multinomial, kl_divergence, xlog2x},
    error::{AssignmentError, AssignmentErrorCode, EvalError, EvalErrorCode, Result},
    information::{
        conditional_entropy_x_given_y, conditional_entropy_y_given_x, joint_entropy,
        mutual_information, variation_of_information,
    },
    mapping::{Mapping, MappingStrategy, Score},
    prf::{
        PrecisionRecall, PrecisionRecallF, fscore, fscore_from_components,
        fscore_from_components_posneg, precision_recall, precision_recall_f,
        precision_recall_f_posneg, precision_recall_posneg,
    },
    sampling::{jittered_probs, sample_log_multinomial, sample_multinomial, sample_simplex},
};
