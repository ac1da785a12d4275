//! Discrete entropy helpers.
//!
//! Every quantity here is measured in bits (base-2 logarithms). Zero
//! probabilities are well defined and contribute nothing; an all-zero count
//! vector has no distribution at all and is reported as
//! [`EvalError::EmptyInput`].

use crate::error::{EvalError, Result};

/// Returns `x * log2(x)`, defined as exactly `0.0` when `x == 0`.
///
/// # Examples
/// ```
/// use labelmatch_core::xlog2x;
///
/// assert_eq!(xlog2x(0.0), 0.0);
/// assert_eq!(xlog2x(2.0), 2.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "entropy terms require floating-point arithmetic."
)]
pub fn xlog2x(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x * x.log2() }
}

/// Returns the entropy of a discrete distribution given its probabilities.
///
/// The probabilities are used as supplied; callers are responsible for
/// passing a distribution that sums to one.
///
/// # Examples
/// ```
/// use labelmatch_core::entropy;
///
/// assert_eq!(entropy([0.5, 0.5]), 1.0);
/// assert_eq!(entropy([1.0, 0.0]), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "entropy is a floating-point sum."
)]
pub fn entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .fold(0.0_f64, |acc, probability| acc - xlog2x(probability))
}

/// Returns the entropy of a multinomial with the given raw event counts.
///
/// Counts are normalised by their total before delegating to [`entropy`], so
/// scaling every count by the same positive factor leaves the result
/// unchanged.
///
/// # Errors
/// Returns [`EvalError::EmptyInput`] when the counts sum to zero (including
/// an empty sequence) and [`EvalError::CountOverflow`] when their sum does
/// not fit in `u128`.
///
/// # Examples
/// ```
/// use labelmatch_core::entropy_of_multinomial;
///
/// assert_eq!(entropy_of_multinomial([1, 1, 1, 1])?, 2.0);
/// assert!(entropy_of_multinomial([0, 0]).is_err());
/// # Ok::<(), labelmatch_core::EvalError>(())
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "normalising counts into probabilities requires floating-point division."
)]
pub fn entropy_of_multinomial<I>(counts: I) -> Result<f64>
where
    I: IntoIterator<Item = u128>,
{
    let counts: Vec<u128> = counts.into_iter().collect();
    let total = counts
        .iter()
        .try_fold(0_u128, |acc, &count| acc.checked_add(count))
        .ok_or(EvalError::CountOverflow {
            context: "entropy_of_multinomial",
        })?;
    if total == 0 {
        return Err(EvalError::EmptyInput {
            context: "entropy_of_multinomial",
        });
    }
    let total = total as f64;
    Ok(entropy(
        counts.into_iter().map(|count| (count as f64) / total),
    ))
}

/// Returns the Kullback–Leibler divergence `D(p || q)` in bits.
///
/// `p` and `q` are aligned probability sequences. This is the conventional,
/// non-negative divergence `Σ p·log2(p/q)`; some toolkits report the negated
/// sum, which this function does not. Positions where `p` is zero contribute
/// nothing instead of being rejected, following `0·log(0/q) = 0`.
///
/// # Errors
/// Returns [`EvalError::LengthMismatch`] when the sequences differ in length
/// and [`EvalError::UndefinedDivergence`] when `q` contains a zero.
///
/// # Examples
/// ```
/// use labelmatch_core::kl_divergence;
///
/// assert_eq!(kl_divergence(&[0.5, 0.5], &[0.5, 0.5])?, 0.0);
/// assert_eq!(kl_divergence(&[1.0, 0.0], &[0.5, 0.5])?, 1.0);
/// # Ok::<(), labelmatch_core::EvalError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "KL divergence is a floating-point sum."
)]
pub fn kl_divergence(p: &[f64], q: &[f64]) -> Result<f64> {
    if p.len() != q.len() {
        return Err(EvalError::LengthMismatch {
            left: p.len(),
            right: q.len(),
        });
    }

    let mut bits = 0.0_f64;
    for (index, (&prob_p, &prob_q)) in p.iter().zip(q).enumerate() {
        if prob_q <= 0.0 {
            return Err(EvalError::UndefinedDivergence { index });
        }
        if prob_p > 0.0 {
            bits += prob_p * (prob_p / prob_q).log2();
        }
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const TOLERANCE: f64 = 1e-12;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn xlog2x_is_zero_at_zero() {
        assert_eq!(xlog2x(0.0), 0.0);
        assert_eq!(xlog2x(1.0), 0.0);
    }

    #[rstest]
    #[case(&[0.5, 0.5], 1.0)]
    #[case(&[0.75, 0.25], 0.811_278_124_459_132_8)]
    #[case(&[0.1, 0.1, 0.8], 0.921_928_094_887_362_3)]
    #[case(&[1.0], 0.0)]
    #[case(&[0.25, 0.0, 0.75], 0.811_278_124_459_132_8)]
    fn entropy_matches_known_values(#[case] probabilities: &[f64], #[case] expected: f64) {
        assert_close(entropy(probabilities.iter().copied()), expected);
    }

    #[test]
    fn entropy_of_empty_sequence_is_zero() {
        assert_eq!(entropy(std::iter::empty::<f64>()), 0.0);
    }

    #[rstest]
    #[case(&[1, 1], 1.0)]
    #[case(&[1, 2], 0.918_295_834_054_489_6)]
    #[case(&[2, 1], 0.918_295_834_054_489_6)]
    #[case(&[1, 1, 1], 1.584_962_500_721_156)]
    #[case(&[1, 1, 1, 1], 2.0)]
    #[case(&[1, 1, 1, 2], 1.921_928_094_887_362_3)]
    #[case(&[7, 0, 7], 1.0)]
    fn entropy_of_multinomial_matches_known_values(
        #[case] counts: &[u128],
        #[case] expected: f64,
    ) {
        let value = entropy_of_multinomial(counts.iter().copied())
            .expect("non-empty counts have an entropy");
        assert_close(value, expected);
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::all_zero(&[0, 0, 0])]
    fn entropy_of_multinomial_rejects_zero_mass(#[case] counts: &[u128]) {
        let err = entropy_of_multinomial(counts.iter().copied())
            .expect_err("zero mass has no distribution");
        assert_eq!(
            err,
            EvalError::EmptyInput {
                context: "entropy_of_multinomial"
            }
        );
    }

    #[test]
    fn entropy_of_multinomial_handles_counts_beyond_u64_sum() {
        let value = entropy_of_multinomial([u128::from(u64::MAX); 2])
            .expect("large counts normalise");
        assert_close(value, 1.0);
    }

    #[test]
    fn entropy_of_multinomial_reports_overflowing_totals() {
        let err = entropy_of_multinomial([u128::MAX, 1]).expect_err("total exceeds u128");
        assert_eq!(
            err,
            EvalError::CountOverflow {
                context: "entropy_of_multinomial"
            }
        );
    }

    #[test]
    fn kl_divergence_is_zero_for_identical_distributions() {
        let p = [0.2, 0.3, 0.5];
        assert_close(kl_divergence(&p, &p).expect("defined"), 0.0);
    }

    #[test]
    fn kl_divergence_is_asymmetric() {
        let p = [0.9, 0.1];
        let q = [0.5, 0.5];
        let forward = kl_divergence(&p, &q).expect("defined");
        let backward = kl_divergence(&q, &p).expect("defined");
        assert!(forward > 0.0);
        assert!(backward > 0.0);
        assert!((forward - backward).abs() > TOLERANCE);
    }

    #[test]
    fn kl_divergence_skips_zero_mass_and_stays_positive() {
        let value = kl_divergence(&[0.0, 1.0], &[0.25, 0.75]).expect("p may contain zeros");
        assert_close(value, 0.415_037_499_278_843_8);
    }

    #[test]
    fn kl_divergence_rejects_zero_reference_probability() {
        let err = kl_divergence(&[0.5, 0.5], &[1.0, 0.0]).expect_err("q has a zero");
        assert_eq!(err, EvalError::UndefinedDivergence { index: 1 });
    }

    #[test]
    fn kl_divergence_rejects_misaligned_inputs() {
        let err = kl_divergence(&[1.0], &[0.5, 0.5]).expect_err("lengths differ");
        assert_eq!(err, EvalError::LengthMismatch { left: 1, right: 2 });
    }
}
