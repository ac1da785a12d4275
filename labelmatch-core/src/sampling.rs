//! Random draws from discrete distributions.
//!
//! These helpers generate synthetic labellings and perturbed distributions
//! for exercising the measures. Every function takes the random number
//! generator explicitly so callers control seeding.

use rand::Rng;
use rand::distributions::{Distribution, Open01, WeightedError, WeightedIndex};

use crate::error::{EvalError, Result};

fn weighted_index(weights: &[f64], context: &'static str) -> Result<WeightedIndex<f64>> {
    // The uniform sampler behind `WeightedIndex` panics on an infinite span.
    if !weights.iter().sum::<f64>().is_finite() {
        return Err(EvalError::InvalidWeights {
            context,
            reason: "weights must be finite with a finite sum".to_owned(),
        });
    }
    WeightedIndex::new(weights).map_err(|error| match error {
        WeightedError::NoItem | WeightedError::AllWeightsZero => {
            EvalError::EmptyInput { context }
        }
        other => EvalError::InvalidWeights {
            context,
            reason: other.to_string(),
        },
    })
}

/// Draws an index with probability proportional to its weight.
///
/// Weights need not sum to one.
///
/// # Errors
/// Returns [`EvalError::EmptyInput`] when `weights` is empty or sums to zero
/// and [`EvalError::InvalidWeights`] when a weight is negative or not
/// finite, or when the weights sum to infinity.
///
/// # Examples
/// ```
/// use labelmatch_core::sample_multinomial;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// assert_eq!(sample_multinomial(&mut rng, &[0.0, 3.0, 0.0])?, 1);
/// # Ok::<(), labelmatch_core::EvalError>(())
/// ```
pub fn sample_multinomial<R>(rng: &mut R, weights: &[f64]) -> Result<usize>
where
    R: Rng + ?Sized,
{
    Ok(weighted_index(weights, "sample_multinomial")?.sample(rng))
}

/// Draws an index from weights given as natural logarithms.
///
/// The weights are shifted by their maximum before exponentiation, so very
/// negative log weights do not all underflow to zero.
///
/// # Errors
/// Returns [`EvalError::EmptyInput`] when `log_weights` is empty and
/// [`EvalError::InvalidWeights`] when no weight is finite or one is `NaN`.
#[expect(
    clippy::float_arithmetic,
    reason = "shifting log weights is floating-point arithmetic."
)]
pub fn sample_log_multinomial<R>(rng: &mut R, log_weights: &[f64]) -> Result<usize>
where
    R: Rng + ?Sized,
{
    const CONTEXT: &str = "sample_log_multinomial";
    if log_weights.is_empty() {
        return Err(EvalError::EmptyInput { context: CONTEXT });
    }
    let max = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Err(EvalError::InvalidWeights {
            context: CONTEXT,
            reason: format!("largest log weight is {max}"),
        });
    }
    let weights: Vec<f64> = log_weights.iter().map(|&w| (w - max).exp()).collect();
    Ok(weighted_index(&weights, CONTEXT)?.sample(rng))
}

/// Draws a point uniformly from the `(n - 1)`-simplex: `n` positive values
/// summing to one.
///
/// Returns an empty vector when `n == 0`.
#[expect(
    clippy::float_arithmetic,
    reason = "normalising exponential draws is floating-point arithmetic."
)]
pub fn sample_simplex<R>(rng: &mut R, n: usize) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    // Normalised unit exponentials are Dirichlet(1, ..., 1).
    let parts: Vec<f64> = (0..n)
        .map(|_| -rng.sample::<f64, _>(Open01).ln())
        .collect();
    let total: f64 = parts.iter().sum();
    parts.into_iter().map(|part| part / total).collect()
}

/// Returns a distribution over `count` outcomes that is uniform up to a
/// relative perturbation of at most `max_jitter` per outcome.
///
/// Useful for breaking ties between otherwise identical outcomes.
///
/// # Errors
/// Returns [`EvalError::InvalidWeights`] when `max_jitter` is not finite or
/// not in `[0.0, 1.0)`.
#[expect(
    clippy::float_arithmetic,
    reason = "jittered weights are floating-point arithmetic."
)]
pub fn jittered_probs<R>(rng: &mut R, count: usize, max_jitter: f64) -> Result<Vec<f64>>
where
    R: Rng + ?Sized,
{
    if !(0.0..1.0).contains(&max_jitter) {
        return Err(EvalError::InvalidWeights {
            context: "jittered_probs",
            reason: format!("jitter {max_jitter} must lie in [0, 1)"),
        });
    }
    let weights: Vec<f64> = (0..count)
        .map(|_| 1.0 + rng.gen_range(-max_jitter..=max_jitter))
        .collect();
    let total: f64 = weights.iter().sum();
    Ok(weights.into_iter().map(|weight| weight / total).collect())
}
