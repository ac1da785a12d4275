//! Checks the spans and events the core library emits.

use labelmatch_core::{ConfusionMatrix, JointCount, mutual_information};
use labelmatch_test_support::tracing::RecordingLayer;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn record<T>(run: impl FnOnce() -> T) -> (T, RecordingLayer) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let value = tracing::subscriber::with_default(subscriber, run);
    (value, layer)
}

#[test]
fn optimal_mapping_span_records_padded_shape() {
    let matrix: ConfusionMatrix<&str, u32> =
        [("A", 1, 4), ("B", 2, 3), ("C", 2, 1)].into_iter().collect();
    let (mapping, layer) = record(|| matrix.one_to_one_optimal_mapping());
    let mapping = mapping.expect("counts fit the cost type");
    assert_eq!(mapping.len(), 2);

    let spans = layer.spans_named("mapping.one_to_one_optimal");
    assert_eq!(spans.len(), 1);
    let fields = &spans[0].fields;
    assert_eq!(fields.get("rows").map(String::as_str), Some("3"));
    assert_eq!(fields.get("cols").map(String::as_str), Some("3"));

    let debug = layer.events_at(Level::DEBUG);
    let summary = debug
        .iter()
        .find(|event| event.message() == Some("optimal one-to-one mapping computed"))
        .expect("mapping summary event");
    assert_eq!(summary.fields.get("mapped").map(String::as_str), Some("2"));
    assert_eq!(summary.fields.get("padding_rows").map(String::as_str), Some("1"));
}

#[test]
fn rejected_information_request_emits_an_error_event() {
    let joint = JointCount::<u8, u8>::new();
    let (outcome, layer) = record(|| mutual_information(&joint));
    assert!(outcome.is_err());

    let spans = layer.spans_named("mutual_information");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].fields.get("pairs").map(String::as_str), Some("0"));

    let errors = layer.events_at(Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].fields.get("error").map(String::as_str),
        Some("mutual_information requires a non-zero total count")
    );
}

#[test]
fn scoring_logs_the_outcome() {
    let matrix: ConfusionMatrix<&str, u32> = [("A", 1, 3), ("B", 1, 1)].into_iter().collect();
    let (score, layer) = record(|| matrix.many_to_one());
    let score = score.expect("matrix is not empty");

    let evaluated = layer
        .events()
        .into_iter()
        .find(|event| event.message() == Some("mapping evaluated"))
        .expect("evaluation event");
    assert_eq!(evaluated.fields.get("right"), Some(&score.right.to_string()));
    assert_eq!(evaluated.fields.get("wrong").map(String::as_str), Some("1"));
}
