//! Command implementations and argument parsing for the labelmatch CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use labelmatch_core::{ConfusionMatrix, Mapping, MappingStrategy, Score};
use tracing::{Span, field, info, instrument};

use super::observations::{CliError, load_observations};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "labelmatch",
    about = "Score a predicted labelling against gold labels."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Evaluate observations read from a delimited text file.
    Evaluate(EvaluateCommand),
}

/// Options accepted by the `evaluate` command.
#[derive(Debug, Args, Clone)]
pub struct EvaluateCommand {
    /// File with one `gold<TAB>predicted[<TAB>count]` observation per line.
    pub path: PathBuf,

    /// Mapping strategy to score.
    #[arg(long, value_enum, default_value_t = StrategyArg::All)]
    pub strategy: StrategyArg,

    /// Field delimiter.
    #[arg(long, default_value_t = '\t')]
    pub delimiter: char,

    /// Skip mutual information and variation of information.
    #[arg(long = "no-information")]
    pub no_information: bool,
}

/// Strategy selection accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Greedy one-to-one mapping.
    Greedy,
    /// Optimal one-to-one mapping.
    Optimal,
    /// Many-to-one mapping.
    ManyToOne,
    /// Every strategy, in the order above.
    All,
}

impl StrategyArg {
    /// The single strategy this argument names, or `None` for
    /// [`StrategyArg::All`].
    #[must_use]
    pub const fn selected(self) -> Option<MappingStrategy> {
        match self {
            Self::Greedy => Some(MappingStrategy::Greedy),
            Self::Optimal => Some(MappingStrategy::Optimal),
            Self::ManyToOne => Some(MappingStrategy::ManyToOne),
            Self::All => None,
        }
    }

    /// Strategies selected by this argument.
    #[must_use]
    pub fn strategies(self) -> Vec<MappingStrategy> {
        self.selected()
            .map_or_else(|| MappingStrategy::ALL.to_vec(), |strategy| vec![strategy])
    }

    /// Name shown in logs; matches the value accepted by `--strategy`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self.selected() {
            Some(strategy) => strategy.as_str(),
            None => "all",
        }
    }
}

/// Score and mapping produced by one strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyReport {
    /// Strategy that produced the mapping.
    pub strategy: MappingStrategy,
    /// Predicted-to-gold label mapping.
    pub mapping: Mapping<String, String>,
    /// Score of `mapping` against the observations.
    pub score: Score,
}

/// Information measures over the observations, in bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InformationReport {
    /// Mutual information; higher is better.
    pub mutual_information: f64,
    /// Variation of information; lower is better.
    pub variation_of_information: f64,
}

/// Summarises the outcome of an evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Total observation count.
    pub observations: u128,
    /// Number of distinct gold labels.
    pub gold_labels: usize,
    /// Number of distinct predicted labels.
    pub predicted_labels: usize,
    /// One report per requested strategy.
    pub strategies: Vec<StrategyReport>,
    /// Information measures, unless disabled.
    pub information: Option<InformationReport>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the input cannot be read or parsed, or when
/// scoring fails (for instance on a file without observations).
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use labelmatch_cli::cli::{Cli, Command, EvaluateCommand, StrategyArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "A\t1\t9\nB\t2\t9\nA\t2\t10\n")?;
/// let cli = Cli {
///     command: Command::Evaluate(EvaluateCommand {
///         path: file.path().to_path_buf(),
///         strategy: StrategyArg::Optimal,
///         delimiter: '\t',
///         no_information: true,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.strategies[0].score.right, 18);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Evaluate(evaluate) => {
            Span::current().record("command", field::display("evaluate"));
            run_evaluate(evaluate)
        }
    }
}

#[instrument(
    name = "cli.evaluate",
    err,
    skip(command),
    fields(strategy = field::Empty, information = field::Empty),
)]
pub(super) fn run_evaluate(command: EvaluateCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("strategy", field::display(command.strategy.as_str()));
    span.record("information", !command.no_information);

    let matrix = load_observations(&command.path, command.delimiter)?;
    let summary = evaluate(&matrix, command.strategy, !command.no_information)?;

    info!(
        observations = summary.observations,
        strategies = summary.strategies.len(),
        "evaluation completed"
    );
    Ok(summary)
}

pub(super) fn evaluate(
    matrix: &ConfusionMatrix<String, String>,
    strategy: StrategyArg,
    information: bool,
) -> Result<ExecutionSummary, CliError> {
    let strategies = strategy
        .strategies()
        .into_iter()
        .map(|strategy| -> Result<StrategyReport, CliError> {
            let mapping = matrix.mapping(strategy)?;
            let score = matrix.eval_mapping(&mapping)?;
            Ok(StrategyReport {
                strategy,
                mapping,
                score,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let information = if information {
        Some(InformationReport {
            mutual_information: matrix.mutual_information()?,
            variation_of_information: matrix.variation_of_information()?,
        })
    } else {
        None
    };

    Ok(ExecutionSummary {
        observations: matrix.total(),
        gold_labels: matrix.gold_labels().len(),
        predicted_labels: matrix.predicted_labels().count(),
        strategies,
        information,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use labelmatch_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     observations: 0,
///     gold_labels: 0,
///     predicted_labels: 0,
///     strategies: Vec::new(),
///     information: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "observations: 0\ngold labels: 0\npredicted labels: 0\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "observations: {}", summary.observations)?;
    writeln!(writer, "gold labels: {}", summary.gold_labels)?;
    writeln!(writer, "predicted labels: {}", summary.predicted_labels)?;
    for report in &summary.strategies {
        let Score {
            right,
            wrong,
            accuracy,
        } = report.score;
        writeln!(
            writer,
            "{}: right={right} wrong={wrong} accuracy={accuracy:.4}",
            report.strategy
        )?;
        for (predicted, gold) in report.mapping.iter() {
            writeln!(writer, "  {predicted} -> {gold}")?;
        }
    }
    if let Some(information) = summary.information {
        writeln!(
            writer,
            "mutual information: {:.6}",
            information.mutual_information
        )?;
        writeln!(
            writer,
            "variation of information: {:.6}",
            information.variation_of_information
        )?;
    }
    Ok(())
}
