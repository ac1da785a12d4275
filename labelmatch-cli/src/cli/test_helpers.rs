//! Small helpers shared across CLI tests.

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_evaluate;
use super::{CliError, EvaluateCommand, StrategyArg};

pub(super) const SKEWED: &str = "\
# gold\tpredicted\tcount
A\t1\t9
B\t2\t9

A\t2\t10
B\t1\t0
";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_observations(dir: &TempDir, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join("observations.tsv");
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn evaluate_command(path: PathBuf, strategy: StrategyArg) -> EvaluateCommand {
    EvaluateCommand {
        path,
        strategy,
        delimiter: '\t',
        no_information: false,
    }
}

pub(super) fn run_evaluate_expecting_error(command: EvaluateCommand, panic_msg: &str) -> CliError {
    match run_evaluate(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
