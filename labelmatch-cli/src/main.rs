//! Entry point for the `labelmatch` binary.
//!
//! Installs logging, then evaluates the observation file named on the
//! command line and prints the report. Any failure is logged once, with the
//! stable core error codes attached, and turns into a failing exit status.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use labelmatch_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn evaluate_and_print() -> Result<()> {
    let summary = run_cli(Cli::parse()).context("evaluation failed")?;
    let mut out = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut out).context("failed to render summary")?;
    out.flush().context("failed to flush output")
}

fn log_failure(err: &anyhow::Error) {
    let cli_error = err.downcast_ref::<CliError>();
    error!(
        error = field::display(format!("{err:#}")),
        code = cli_error.and_then(CliError::eval_code).map(field::display),
        assignment_code = cli_error
            .and_then(CliError::assignment_code)
            .map(field::display),
        line = cli_error.and_then(CliError::line),
        "command execution failed"
    );
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match evaluate_and_print() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_failure(&err);
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not installed when logging setup fails"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
