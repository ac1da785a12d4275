//! Information measures over joint counts.
//!
//! All measures are assembled from three count-based entropies: the joint
//! entropy `H(X,Y)` over every recorded pair and the marginal entropies
//! `H(X)` and `H(Y)`. Each one goes through [`entropy_of_multinomial`] so the
//! terms of an expression are always normalised the same way.
//!
//! The algebraic results are non-negative. Floating-point cancellation can
//! leave a residue of order `1e-16` below zero; such residues are clamped to
//! `0.0`.

use tracing::instrument;

use crate::confusion::{ConfusionMatrix, JointCount, Label};
use crate::entropy::entropy_of_multinomial;
use crate::error::{EvalError, Result};

#[derive(Clone, Copy, Debug)]
struct EntropyTerms {
    joint: f64,
    x: f64,
    y: f64,
}

fn entropy_terms<X: Label, Y: Label>(
    joint: &JointCount<X, Y>,
    context: &'static str,
) -> Result<EntropyTerms> {
    if joint.is_empty() {
        return Err(EvalError::EmptyInput { context });
    }
    let (count_x, count_y) = joint.marginals();
    Ok(EntropyTerms {
        joint: entropy_of_multinomial(joint.counts())?,
        x: entropy_of_multinomial(count_x.into_values())?,
        y: entropy_of_multinomial(count_y.into_values())?,
    })
}

fn clamp_non_negative(value: f64) -> f64 {
    if value < 0.0 { 0.0 } else { value }
}

/// Returns the joint entropy `H(X,Y)` in bits.
///
/// # Errors
/// Returns [`EvalError::EmptyInput`] when `joint` holds no observations.
pub fn joint_entropy<X: Label, Y: Label>(joint: &JointCount<X, Y>) -> Result<f64> {
    if joint.is_empty() {
        return Err(EvalError::EmptyInput {
            context: "joint_entropy",
        });
    }
    entropy_of_multinomial(joint.counts())
}

/// Returns the mutual information `I(X;Y) = H(X) + H(Y) − H(X,Y)` in bits.
///
/// The result is zero exactly when `X` and `Y` are independent under the
/// empirical joint distribution.
///
/// # Errors
/// Returns [`EvalError::EmptyInput`] when `joint` holds no observations.
///
/// # Examples
/// ```
/// use labelmatch_core::{JointCount, mutual_information};
///
/// let joint: JointCount<&str, &str> = [(("x", "x"), 5), (("y", "y"), 5)].into_iter().collect();
/// assert_eq!(mutual_information(&joint)?, 1.0);
/// # Ok::<(), labelmatch_core::EvalError>(())
/// ```
#[instrument(level = "debug", err, skip(joint), fields(pairs = joint.len()))]
#[expect(
    clippy::float_arithmetic,
    reason = "mutual information combines floating-point entropies."
)]
pub fn mutual_information<X: Label, Y: Label>(joint: &JointCount<X, Y>) -> Result<f64> {
    let terms = entropy_terms(joint, "mutual_information")?;
    Ok(clamp_non_negative(terms.x + terms.y - terms.joint))
}

/// Returns the variation of information `VI(X;Y) = 2·H(X,Y) − H(X) − H(Y)`
/// in bits.
///
/// This equals `H(X) + H(Y) − 2·I(X;Y)` and is zero exactly when both
/// labellings induce the same partition, up to relabelling.
///
/// # Errors
/// Returns [`EvalError::EmptyInput`] when `joint` holds no observations.
#[instrument(level = "debug", err, skip(joint), fields(pairs = joint.len()))]
#[expect(
    clippy::float_arithmetic,
    reason = "variation of information combines floating-point entropies."
)]
pub fn variation_of_information<X: Label, Y: Label>(joint: &JointCount<X, Y>) -> Result<f64> {
    let terms = entropy_terms(joint, "variation_of_information")?;
    Ok(clamp_non_negative(2.0 * terms.joint - terms.x - terms.y))
}

/// Returns the conditional entropy `H(X|Y) = H(X,Y) − H(Y)` in bits.
///
/// # Errors
/// Returns [`EvalError::EmptyInput`] when `joint` holds no observations.
#[expect(
    clippy::float_arithmetic,
    reason = "conditional entropy combines floating-point entropies."
)]
pub fn conditional_entropy_x_given_y<X: Label, Y: Label>(joint: &JointCount<X, Y>) -> Result<f64> {
    let terms = entropy_terms(joint, "conditional_entropy_x_given_y")?;
    Ok(clamp_non_negative(terms.joint - terms.y))
}

/// Returns the conditional entropy `H(Y|X) = H(X,Y) − H(X)` in bits.
///
/// # Errors
/// Returns [`EvalError::EmptyInput`] when `joint` holds no observations.
#[expect(
    clippy::float_arithmetic,
    reason = "conditional entropy combines floating-point entropies."
)]
pub fn conditional_entropy_y_given_x<X: Label, Y: Label>(joint: &JointCount<X, Y>) -> Result<f64> {
    let terms = entropy_terms(joint, "conditional_entropy_y_given_x")?;
    Ok(clamp_non_negative(terms.joint - terms.x))
}

impl<G: Label, P: Label> ConfusionMatrix<G, P> {
    /// Mutual information between the gold and predicted labellings.
    /// Higher is better; the minimum is `0.0`.
    ///
    /// # Errors
    /// Returns [`EvalError::EmptyInput`] when nothing has been recorded.
    pub fn mutual_information(&self) -> Result<f64> {
        mutual_information(&self.joint_counts())
    }

    /// Variation of information between the gold and predicted labellings.
    /// Lower is better; the minimum is `0.0`.
    ///
    /// # Errors
    /// Returns [`EvalError::EmptyInput`] when nothing has been recorded.
    pub fn variation_of_information(&self) -> Result<f64> {
        variation_of_information(&self.joint_counts())
    }
}
