//! Command-line interface for evaluating a predicted labelling.
//!
//! The `evaluate` command reads `(gold, predicted[, count])` observations from
//! a delimited text file, scores the requested mapping strategies and reports
//! the information measures.

mod commands;
mod observations;

pub use commands::{
    Cli, Command, EvaluateCommand, ExecutionSummary, InformationReport, StrategyArg,
    StrategyReport, render_summary, run_cli,
};
pub use observations::{CliError, LineError, load_observations, parse_line};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
