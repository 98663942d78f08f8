//! Error types for the participant-dataset crate.
//!
//! Every stage of the pipeline reports failures through [`PipelineError`].
//! Variants carry the path of the file involved and a rendered message so the
//! enum stays `Clone` and comparable in tests.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Errors raised while loading, hashing, emitting, or cleaning up files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A file a stage needs to read does not exist.
    #[error("required input file '{path}' does not exist")]
    MissingInput {
        /// Path of the missing file.
        path: Utf8PathBuf,
    },

    /// A row has fewer fields than the stage requires.
    #[error(
        "malformed row at line {line} of '{path}': expected at least {expected} fields, found {found}"
    )]
    MalformedRow {
        /// Path of the file containing the row.
        path: Utf8PathBuf,
        /// One-based line number where the row starts.
        line: u64,
        /// Minimum number of fields the stage requires.
        expected: usize,
        /// Number of fields actually present.
        found: usize,
    },

    /// An input file exists but could not be opened, read, or decoded.
    #[error("failed to read '{path}': {message}")]
    InputRead {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// The intermediate hash file could not be written.
    #[error("failed to write hashed records to '{path}': {message}")]
    HashComputation {
        /// Path of the intermediate file.
        path: Utf8PathBuf,
        /// Description of the I/O failure.
        message: String,
    },

    /// The XML dataset could not be written.
    #[error("failed to write dataset to '{path}': {message}")]
    OutputWrite {
        /// Path of the output document.
        path: Utf8PathBuf,
        /// Description of the I/O failure.
        message: String,
    },

    /// A stale or consumed file could not be removed.
    #[error("failed to remove '{path}': {message}")]
    Cleanup {
        /// Path of the file that could not be removed.
        path: Utf8PathBuf,
        /// Description of the I/O failure.
        message: String,
    },
}

impl PipelineError {
    /// Builds a [`PipelineError::HashComputation`] from an I/O failure.
    pub(crate) fn hash_computation(path: &Utf8Path, err: &io::Error) -> Self {
        Self::HashComputation {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Builds a [`PipelineError::OutputWrite`] from an I/O failure.
    pub(crate) fn output_write(path: &Utf8Path, err: &io::Error) -> Self {
        Self::OutputWrite {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Maps a failure to open a file for reading.
    ///
    /// `NotFound` becomes [`PipelineError::MissingInput`]; anything else is an
    /// [`PipelineError::InputRead`].
    pub(crate) fn open_for_read(path: &Utf8Path, err: &io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::MissingInput {
                path: path.to_path_buf(),
            }
        } else {
            Self::InputRead {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        }
    }
}
