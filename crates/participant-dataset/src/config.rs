//! File names used by a pipeline run.

use camino::{Utf8Path, Utf8PathBuf};

/// Default participant list name.
pub const DEFAULT_INPUT: &str = "participants.txt";

/// Default intermediate hash file name.
pub const DEFAULT_INTERMEDIATE: &str = "hashes.txt";

/// Default dataset document name.
pub const DEFAULT_OUTPUT: &str = "dataset.xml";

/// Names of the three files a run touches, relative to its directory.
///
/// The defaults are the fixed names the CLI operates on.
///
/// # Example
///
/// ```
/// use participant_dataset::PipelineFiles;
///
/// let files = PipelineFiles::default();
///
/// assert_eq!(files.input(), "participants.txt");
/// assert_eq!(files.intermediate(), "hashes.txt");
/// assert_eq!(files.output(), "dataset.xml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineFiles {
    input: Utf8PathBuf,
    intermediate: Utf8PathBuf,
    output: Utf8PathBuf,
}

impl PipelineFiles {
    /// Creates a set of file names.
    #[must_use]
    pub fn new(
        input: impl Into<Utf8PathBuf>,
        intermediate: impl Into<Utf8PathBuf>,
        output: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            intermediate: intermediate.into(),
            output: output.into(),
        }
    }

    /// Participant list consumed by the run.
    #[must_use]
    pub fn input(&self) -> &Utf8Path {
        &self.input
    }

    /// Transient hash file between the two stages.
    #[must_use]
    pub fn intermediate(&self) -> &Utf8Path {
        &self.intermediate
    }

    /// Dataset document left behind by a successful run.
    #[must_use]
    pub fn output(&self) -> &Utf8Path {
        &self.output
    }
}

impl Default for PipelineFiles {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT, DEFAULT_INTERMEDIATE, DEFAULT_OUTPUT)
    }
}
