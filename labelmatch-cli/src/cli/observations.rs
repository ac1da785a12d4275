//! Reading observation files into a confusion matrix.
//!
//! One observation per line: `gold<D>predicted` or `gold<D>predicted<D>count`
//! where `<D>` is the configured delimiter (a tab by default). Blank lines and
//! lines whose first non-blank character is `#` are skipped. Labels are
//! trimmed of surrounding whitespace.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use labelmatch_core::{AssignmentErrorCode, ConfusionMatrix, EvalError, EvalErrorCode};
use thiserror::Error;
use tracing::{Span, debug, field, instrument};

/// A parsed line: gold label, predicted label and observation count.
pub type Observation = (String, String, u64);

/// Reasons a single observation line is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LineError {
    /// The line held a gold label but nothing after it.
    #[error("missing predicted label")]
    MissingPredicted,
    /// The line held more than three fields.
    #[error("expected at most 3 fields but found {found}")]
    TooManyFields {
        /// Number of fields on the line.
        found: usize,
    },
    /// A label field was empty after trimming.
    #[error("{column} label is empty")]
    EmptyLabel {
        /// Which label was empty, `gold` or `predicted`.
        column: &'static str,
    },
    /// The count field was not a non-negative integer.
    #[error("invalid count `{raw}`: {source}")]
    InvalidCount {
        /// Count field as written.
        raw: String,
        /// Integer parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening or reading the observation file failed.
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A line of the observation file was malformed.
    #[error("{}:{line}: {source}", path.display())]
    Parse {
        /// File containing the malformed line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        #[source]
        source: LineError,
    },
    /// Scoring or measuring the observations failed.
    #[error(transparent)]
    Core(#[from] EvalError),
}

impl CliError {
    /// Stable core error code, when the failure came from the core library.
    #[must_use]
    pub const fn eval_code(&self) -> Option<EvalErrorCode> {
        match self {
            Self::Core(core) => Some(core.code()),
            _ => None,
        }
    }

    /// Stable assignment error code, when the optimal strategy failed.
    #[must_use]
    pub const fn assignment_code(&self) -> Option<AssignmentErrorCode> {
        match self {
            Self::Core(core) => core.assignment_code(),
            _ => None,
        }
    }

    /// 1-based line number of a malformed observation.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

fn label(raw: &str, column: &'static str) -> Result<String, LineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LineError::EmptyLabel { column });
    }
    Ok(trimmed.to_owned())
}

/// Parses one line of an observation file.
///
/// Returns `Ok(None)` for blank and comment lines. A missing count means one
/// observation.
///
/// # Errors
/// Returns [`LineError`] when the line has the wrong number of fields, an
/// empty label or a count that is not a `u64`.
///
/// # Examples
/// ```
/// use labelmatch_cli::cli::parse_line;
///
/// assert_eq!(
///     parse_line("noun\t7\t3", '\t')?,
///     Some(("noun".to_owned(), "7".to_owned(), 3))
/// );
/// assert_eq!(parse_line("# header", '\t')?, None);
/// assert!(parse_line("noun", '\t').is_err());
/// # Ok::<(), labelmatch_cli::cli::LineError>(())
/// ```
pub fn parse_line(line: &str, delimiter: char) -> Result<Option<Observation>, LineError> {
    let content = line.trim_end_matches(['\r', '\n']);
    let leading = content.trim_start();
    if leading.is_empty() || leading.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = content.split(delimiter).collect();
    let (gold, predicted, count) = match fields.as_slice() {
        [_] => return Err(LineError::MissingPredicted),
        [gold, predicted] => (*gold, *predicted, None),
        [gold, predicted, count] => (*gold, *predicted, Some(*count)),
        more => return Err(LineError::TooManyFields { found: more.len() }),
    };

    let count = match count {
        None => 1,
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|source| LineError::InvalidCount {
                raw: raw.to_owned(),
                source,
            })?,
    };
    Ok(Some((label(gold, "gold")?, label(predicted, "predicted")?, count)))
}

/// Reads every observation in `path` into a confusion matrix.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be read and
/// [`CliError::Parse`] for the first malformed line.
#[instrument(
    name = "cli.load_observations",
    err,
    skip(path),
    fields(path = field::Empty, lines = field::Empty, observations = field::Empty),
)]
pub fn load_observations(
    path: &Path,
    delimiter: char,
) -> Result<ConfusionMatrix<String, String>, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_error)?);
    let mut matrix = ConfusionMatrix::new();
    let mut lines = 0_usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_error)?;
        lines = index + 1;
        let parsed = parse_line(&line, delimiter).map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            line: lines,
            source,
        })?;
        if let Some((gold, predicted, count)) = parsed {
            matrix.add(gold, predicted, count);
        }
    }

    span.record("lines", lines);
    span.record("observations", matrix.total());
    debug!(
        gold_labels = matrix.gold_labels().len(),
        predicted_labels = matrix.predicted_labels().count(),
        "observations loaded"
    );
    Ok(matrix)
}
