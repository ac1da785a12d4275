//! Unit tests for the CLI commands and observation parsing.

use super::commands::{evaluate, run_evaluate};
use super::test_helpers::{
    SKEWED, evaluate_command, run_evaluate_expecting_error, temp_dir, write_observations,
};
use super::{
    Cli, CliError, Command, EvaluateCommand, LineError, StrategyArg, load_observations,
    parse_line, render_summary, run_cli,
};

use clap::{Parser, ValueEnum};
use labelmatch_core::{
    AssignmentError, AssignmentErrorCode, ConfusionMatrix, EvalError, EvalErrorCode,
    MappingStrategy,
};
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use labelmatch_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn observation(gold: &str, predicted: &str, count: u64) -> Option<(String, String, u64)> {
    Some((gold.to_owned(), predicted.to_owned(), count))
}

#[rstest]
#[case::pair("A\t1", observation("A", "1", 1))]
#[case::counted("A\t1\t9", observation("A", "1", 9))]
#[case::zero_count("A\t1\t0", observation("A", "1", 0))]
#[case::padded(" A \t 1 \t 9 ", observation("A", "1", 9))]
#[case::crlf("A\t1\t9\r", observation("A", "1", 9))]
#[case::blank("", None)]
#[case::whitespace("  \t ", None)]
#[case::comment("# gold\tpredicted", None)]
#[case::indented_comment("   # note", None)]
fn parse_line_accepts_well_formed_lines(
    #[case] line: &str,
    #[case] expected: Option<(String, String, u64)>,
) {
    assert_eq!(parse_line(line, '\t'), Ok(expected));
}

#[rstest]
#[case::missing_predicted("A", LineError::MissingPredicted)]
#[case::too_many("A\t1\t2\t3", LineError::TooManyFields { found: 4 })]
#[case::empty_gold("\t1", LineError::EmptyLabel { column: "gold" })]
#[case::empty_predicted("A\t ", LineError::EmptyLabel { column: "predicted" })]
fn parse_line_rejects_malformed_lines(#[case] line: &str, #[case] expected: LineError) {
    assert_eq!(parse_line(line, '\t'), Err(expected));
}

#[rstest]
#[case("A\t1\t-3")]
#[case("A\t1\tmany")]
#[case("A\t1\t18446744073709551616")]
fn parse_line_rejects_invalid_counts(#[case] line: &str) {
    let err = parse_line(line, '\t').expect_err("count is not a u64");
    assert!(matches!(err, LineError::InvalidCount { .. }), "{err:?}");
}

#[test]
fn parse_line_honours_custom_delimiters() {
    assert_eq!(parse_line("noun,7,2", ','), Ok(observation("noun", "7", 2)));
    assert_eq!(
        parse_line("noun\t7", ','),
        Err(LineError::MissingPredicted)
    );
}

#[rstest]
fn load_observations_skips_comments_and_zero_counts() -> TestResult {
    let dir = temp_dir();
    let path = write_observations(&dir, SKEWED)?;
    let matrix = load_observations(&path, '\t')?;

    let expected: ConfusionMatrix<String, String> = [("A", "1", 9), ("B", "2", 9), ("A", "2", 10)]
        .into_iter()
        .map(|(gold, predicted, count)| (gold.to_owned(), predicted.to_owned(), count))
        .collect();
    assert_eq!(matrix, expected);
    assert_eq!(matrix.total(), 28);
    Ok(())
}

#[rstest]
fn load_observations_reports_line_numbers() -> TestResult {
    let dir = temp_dir();
    let path = write_observations(&dir, "# header\nA\t1\n\nB\n")?;
    let err = load_observations(&path, '\t').expect_err("line 4 has no predicted label");
    match &err {
        CliError::Parse { line, source, .. } => {
            assert_eq!(*line, 4);
            assert_eq!(*source, LineError::MissingPredicted);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().ends_with("observations.tsv:4: missing predicted label"));
    Ok(())
}

#[rstest]
fn cli_errors_expose_stable_codes() -> TestResult {
    let dir = temp_dir();
    let path = write_observations(&dir, "A\t1\nB\n")?;
    let parse = load_observations(&path, '\t').expect_err("line 2 is malformed");
    assert_eq!(parse.line(), Some(2));
    assert_eq!(parse.eval_code(), None);

    let overflow = CliError::from(EvalError::from(AssignmentError::CostOverflow {
        count: u128::from(u64::MAX),
    }));
    assert_eq!(overflow.line(), None);
    assert_eq!(overflow.eval_code(), Some(EvalErrorCode::AssignmentFailure));
    assert_eq!(
        overflow.assignment_code(),
        Some(AssignmentErrorCode::CostOverflow)
    );

    let empty = CliError::from(EvalError::EmptyInput {
        context: "eval_mapping",
    });
    assert_eq!(empty.eval_code(), Some(EvalErrorCode::EmptyInput));
    assert_eq!(empty.assignment_code(), None);
    Ok(())
}

#[rstest]
fn load_observations_reports_missing_files() {
    let dir = temp_dir();
    let path = dir.path().join("missing.tsv");
    let err = load_observations(&path, '\t').expect_err("file does not exist");
    assert!(matches!(err, CliError::Io { .. }));
}

#[rstest]
fn evaluate_scores_every_strategy_in_order() -> TestResult {
    let dir = temp_dir();
    let path = write_observations(&dir, SKEWED)?;
    let summary = run_evaluate(evaluate_command(path, StrategyArg::All))?;

    assert_eq!(summary.observations, 28);
    assert_eq!((summary.gold_labels, summary.predicted_labels), (2, 2));
    let scores: Vec<(MappingStrategy, u128, u128)> = summary
        .strategies
        .iter()
        .map(|report| (report.strategy, report.score.right, report.score.wrong))
        .collect();
    assert_eq!(
        scores,
        vec![
            (MappingStrategy::Greedy, 10, 18),
            (MappingStrategy::Optimal, 18, 10),
            (MappingStrategy::ManyToOne, 19, 9),
        ]
    );

    let information = summary.information.expect("information is enabled by default");
    assert!((information.mutual_information - 0.228_713_330_558_224_3).abs() < 1e-9);
    assert!((information.variation_of_information - 1.354_429_770_969_55).abs() < 1e-9);
    Ok(())
}

#[test]
fn strategy_argument_names_match_core_names() {
    for argument in StrategyArg::value_variants() {
        let accepted = argument
            .to_possible_value()
            .expect("every variant is selectable");
        assert_eq!(accepted.get_name(), argument.as_str());
        if let Some(strategy) = argument.selected() {
            assert_eq!(argument.as_str(), strategy.as_str());
            assert_eq!(argument.strategies(), vec![strategy]);
        }
    }
    assert_eq!(StrategyArg::All.strategies(), MappingStrategy::ALL.to_vec());
}

#[rstest]
#[case(StrategyArg::Greedy, MappingStrategy::Greedy)]
#[case(StrategyArg::Optimal, MappingStrategy::Optimal)]
#[case(StrategyArg::ManyToOne, MappingStrategy::ManyToOne)]
fn evaluate_runs_only_the_selected_strategy(
    #[case] argument: StrategyArg,
    #[case] expected: MappingStrategy,
) -> TestResult {
    let dir = temp_dir();
    let path = write_observations(&dir, SKEWED)?;
    let mut command = evaluate_command(path, argument);
    command.no_information = true;
    let summary = run_evaluate(command)?;

    assert_eq!(summary.strategies.len(), 1);
    assert_eq!(summary.strategies[0].strategy, expected);
    assert!(summary.information.is_none());
    Ok(())
}

#[rstest]
fn evaluate_rejects_files_without_observations() -> TestResult {
    let dir = temp_dir();
    let path = write_observations(&dir, "# nothing here\n\nA\t1\t0\n")?;
    let err = run_evaluate_expecting_error(
        evaluate_command(path, StrategyArg::All),
        "an empty matrix cannot be scored",
    );
    assert!(matches!(
        err,
        CliError::Core(EvalError::EmptyInput {
            context: "eval_mapping"
        })
    ));
    Ok(())
}

#[test]
fn evaluate_reports_information_failures_after_mappings() {
    let matrix = ConfusionMatrix::<String, String>::new();
    let err = evaluate(&matrix, StrategyArg::All, true).expect_err("nothing recorded");
    assert!(matches!(err, CliError::Core(EvalError::EmptyInput { .. })));
}

#[rstest]
fn render_summary_lists_scores_mappings_and_measures() -> TestResult {
    let dir = temp_dir();
    let path = write_observations(&dir, SKEWED)?;
    let summary = run_evaluate(evaluate_command(path, StrategyArg::All))?;

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert_eq!(
        text,
        "\
observations: 28
gold labels: 2
predicted labels: 2
greedy: right=10 wrong=18 accuracy=0.3571
  2 -> A
optimal: right=18 wrong=10 accuracy=0.6429
  1 -> A
  2 -> B
many-to-one: right=19 wrong=9 accuracy=0.6786
  1 -> A
  2 -> A
mutual information: 0.228713
variation of information: 1.354430
"
    );
    Ok(())
}

#[rstest]
#[case(&["labelmatch", "evaluate", "data.tsv"], StrategyArg::All, '\t', false)]
#[case(
    &["labelmatch", "evaluate", "data.tsv", "--strategy", "many-to-one"],
    StrategyArg::ManyToOne,
    '\t',
    false,
)]
#[case(
    &["labelmatch", "evaluate", "data.csv", "--delimiter", ",", "--no-information"],
    StrategyArg::All,
    ',',
    true,
)]
fn clap_parses_evaluate_options(
    #[case] args: &[&str],
    #[case] strategy: StrategyArg,
    #[case] delimiter: char,
    #[case] no_information: bool,
) {
    let cli = Cli::try_parse_from(args).expect("arguments are valid");
    let Command::Evaluate(EvaluateCommand {
        strategy: parsed_strategy,
        delimiter: parsed_delimiter,
        no_information: parsed_no_information,
        ..
    }) = cli.command;
    assert_eq!(parsed_strategy, strategy);
    assert_eq!(parsed_delimiter, delimiter);
    assert_eq!(parsed_no_information, no_information);
}

#[rstest]
#[case(&["labelmatch", "evaluate", "data.tsv", "--strategy", "hungarian"])]
#[case(&["labelmatch", "evaluate", "data.tsv", "--delimiter", "::"])]
#[case(&["labelmatch", "evaluate"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn run_cli_dispatches_evaluate() -> TestResult {
    let dir = temp_dir();
    let path = write_observations(&dir, SKEWED)?;
    let cli = Cli {
        command: Command::Evaluate(evaluate_command(path, StrategyArg::Optimal)),
    };
    let summary = run_cli(cli)?;
    assert_eq!(summary.strategies[0].score.right, 18);
    Ok(())
}

#[rstest]
fn run_evaluate_emits_tracing_fields() -> TestResult {
    let dir = temp_dir();
    let path = write_observations(&dir, SKEWED)?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let command = evaluate_command(path, StrategyArg::ManyToOne);
    let summary = tracing::subscriber::with_default(subscriber, || run_evaluate(command))?;
    assert_eq!(summary.observations, 28);

    let evaluate_span = layer
        .spans_named("cli.evaluate")
        .pop()
        .expect("cli.evaluate span must exist");
    assert_eq!(
        evaluate_span.fields.get("strategy").map(String::as_str),
        Some("many-to-one")
    );
    assert_eq!(
        evaluate_span.fields.get("information").map(String::as_str),
        Some("true")
    );

    let load_span = layer
        .spans_named("cli.load_observations")
        .pop()
        .expect("cli.load_observations span must exist");
    assert!(
        load_span
            .fields
            .get("path")
            .is_some_and(|value| value.ends_with("observations.tsv"))
    );
    assert_eq!(load_span.fields.get("lines").map(String::as_str), Some("6"));
    assert_eq!(
        load_span.fields.get("observations").map(String::as_str),
        Some("28")
    );

    assert!(layer.events_at(Level::INFO).iter().any(|event| {
        event.message() == Some("evaluation completed")
            && event.fields.get("observations").map(String::as_str) == Some("28")
    }));
    Ok(())
}

#[rstest]
fn parse_failures_are_recorded_on_the_load_span() -> TestResult {
    let dir = temp_dir();
    let path = write_observations(&dir, "A\t1\tlots\n")?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let command = evaluate_command(path, StrategyArg::All);
    let err = tracing::subscriber::with_default(subscriber, || run_evaluate(command))
        .expect_err("count is not a number");
    assert!(matches!(err, CliError::Parse { line: 1, .. }));

    let errors = layer.events_at(Level::ERROR);
    assert!(!errors.is_empty());
    assert!(errors.iter().all(|event| {
        event
            .fields
            .get("error")
            .is_some_and(|value| value.contains(":1: invalid count `lots`"))
    }));
    Ok(())
}
