//! Error types for the dataset CLI.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::error::PipelineError;

/// Errors surfaced by argument parsing and the conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// A flag expected a value but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag that was missing its value.
        flag: &'static str,
    },
    /// An unsupported argument was supplied.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// Argument value that was not recognised.
        value: String,
    },
    /// The working directory could not be opened.
    #[error("failed to open working directory '{path}': {message}")]
    WorkingDirectory {
        /// Directory that could not be opened.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
    /// A pipeline stage failed.
    #[error("conversion failed: {source}")]
    Pipeline {
        /// Underlying pipeline error.
        #[from]
        #[source]
        source: PipelineError,
    },
}
