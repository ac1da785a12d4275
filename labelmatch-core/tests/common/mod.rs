use labelmatch_core::ConfusionMatrix;
use labelmatch_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

/// Proptest configuration driven by the shared run profile.
#[must_use]
pub fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Observation triples `(gold, predicted, count)` over small vocabularies.
pub fn observations() -> impl Strategy<Value = Vec<(u8, u8, u64)>> {
    prop::collection::vec((0_u8..5, 0_u8..6, 1_u64..50), 1..40)
}

/// Builds a matrix from observation triples.
#[must_use]
pub fn matrix_from(observations: &[(u8, u8, u64)]) -> ConfusionMatrix<u8, u8> {
    observations.iter().copied().collect()
}
