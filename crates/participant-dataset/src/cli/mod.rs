//! CLI support for the dataset conversion.
//!
//! The binary delegates to these functions so argument handling and the run
//! itself can be exercised in tests without spawning a subprocess.

mod error;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use rand::Rng;
use tracing::debug;

pub use error::CliError;

use crate::config::PipelineFiles;
use crate::pipeline::{RunSummary, run};

const DEFAULT_DIR: &str = ".";

/// Parsed options for the dataset CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    dir: Utf8PathBuf,
}

impl Options {
    /// Returns the directory the run operates in.
    ///
    /// # Example
    ///
    /// ```
    /// use participant_dataset::cli::{ParseOutcome, parse_args};
    ///
    /// let ParseOutcome::Options(options) = parse_args(std::iter::empty()).expect("parse") else {
    ///     panic!("expected options");
    /// };
    ///
    /// assert_eq!(options.dir(), ".");
    /// ```
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dir: Utf8PathBuf::from(DEFAULT_DIR),
        }
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Continue with the parsed options.
    Options(Options),
}

/// Parses CLI arguments, excluding the program name.
///
/// With no arguments the run uses the current directory.
///
/// # Errors
///
/// Returns [`CliError`] for unknown arguments or a flag missing its value.
///
/// # Example
///
/// ```
/// use participant_dataset::cli::{ParseOutcome, parse_args};
///
/// let args = vec!["--dir".to_string(), "course-42".to_string()];
///
/// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
///     panic!("expected options");
/// };
/// assert_eq!(options.dir(), "course-42");
/// ```
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let mut options = Options::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "--dir" => {
                let value = args.next().ok_or(CliError::MissingValue { flag: "--dir" })?;
                options.dir = Utf8PathBuf::from(value);
            }
            _ => return Err(CliError::UnknownArgument { value: arg }),
        }
    }

    Ok(ParseOutcome::Options(options))
}

/// Opens the configured directory and runs the conversion with the default
/// file names.
///
/// # Errors
///
/// Returns [`CliError::WorkingDirectory`] when the directory cannot be opened
/// and [`CliError::Pipeline`] when any stage fails.
pub fn execute<R>(options: &Options, rng: &mut R) -> Result<RunSummary, CliError>
where
    R: Rng + ?Sized,
{
    let dir = Dir::open_ambient_dir(&options.dir, ambient_authority()).map_err(|err| {
        CliError::WorkingDirectory {
            path: options.dir.clone(),
            message: err.to_string(),
        }
    })?;
    debug!(dir = %options.dir, "opened working directory");
    Ok(run(&dir, &PipelineFiles::default(), rng)?)
}

/// Formats the success message emitted by the CLI.
///
/// # Example
///
/// ```
/// use camino::{Utf8Path, Utf8PathBuf};
/// use participant_dataset::RunSummary;
/// use participant_dataset::cli::success_message;
///
/// let summary = RunSummary {
///     records: 3,
///     output: Utf8PathBuf::from("dataset.xml"),
/// };
///
/// assert_eq!(
///     success_message(&summary, Utf8Path::new("course-42")),
///     "Wrote 3 participant records to course-42/dataset.xml"
/// );
/// ```
#[must_use]
pub fn success_message(summary: &RunSummary, dir: &Utf8Path) -> String {
    format!(
        "Wrote {} participant records to {}",
        summary.records,
        dir.join(&summary.output)
    )
}
