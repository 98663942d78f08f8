//! End-to-end pipeline orchestration.
//!
//! A run clears artifacts left by a previous run, hashes the participant
//! list into the intermediate file, emits the dataset from it, then removes
//! the intermediate file and the participant list. Only the dataset remains
//! after success. A failed run stops where it failed; files from earlier
//! stages may remain.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs::Dir;
use rand::Rng;
use tracing::{debug, info};

use crate::config::PipelineFiles;
use crate::emitter::emit_file;
use crate::enricher::enrich_file;
use crate::error::PipelineError;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of participant records written to the dataset.
    pub records: usize,
    /// Dataset path relative to the run directory.
    pub output: Utf8PathBuf,
}

/// Runs the full conversion inside `dir`.
///
/// # Errors
///
/// Returns the first [`PipelineError`] raised by any stage. Cleanup failures
/// other than a file already being absent are reported as
/// [`PipelineError::Cleanup`].
///
/// # Example
///
/// ```
/// use cap_std::{ambient_authority, fs::Dir};
/// use participant_dataset::{PipelineFiles, run};
/// use std::time::{SystemTime, UNIX_EPOCH};
///
/// let suffix = SystemTime::now()
///     .duration_since(UNIX_EPOCH)
///     .map(|elapsed| elapsed.as_nanos())
///     .unwrap_or(0);
/// let path = std::env::temp_dir().join(format!("participant-dataset-{suffix}"));
/// std::fs::create_dir_all(&path).expect("create temp dir");
/// let dir = Dir::open_ambient_dir(&path, ambient_authority()).expect("open temp dir");
/// dir.write("participants.txt", "Jane Doe,jane@example.com\n")
///     .expect("write participants");
///
/// let summary = run(&dir, &PipelineFiles::default(), &mut rand::rng()).expect("run succeeds");
///
/// assert_eq!(summary.records, 1);
/// assert!(dir.exists("dataset.xml"));
/// assert!(!dir.exists("participants.txt"));
/// std::fs::remove_dir_all(&path).expect("clean up");
/// ```
pub fn run<R>(dir: &Dir, files: &PipelineFiles, rng: &mut R) -> Result<RunSummary, PipelineError>
where
    R: Rng + ?Sized,
{
    remove_if_present(dir, files.intermediate())?;
    remove_if_present(dir, files.output())?;

    let hashed = enrich_file(dir, files.input(), files.intermediate(), rng)?;
    let emitted = emit_file(dir, files.intermediate(), files.output())?;
    debug!(hashed, emitted, "stages complete");

    remove_if_present(dir, files.intermediate())?;
    remove_if_present(dir, files.input())?;

    info!(records = emitted, output = %files.output(), "dataset ready");
    Ok(RunSummary {
        records: emitted,
        output: files.output().to_path_buf(),
    })
}

/// Removes `path` from `dir`, returning whether a file was removed.
fn remove_if_present(dir: &Dir, path: &Utf8Path) -> Result<bool, PipelineError> {
    match dir.remove_file(path) {
        Ok(()) => {
            debug!(path = %path, "removed file");
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(PipelineError::Cleanup {
            path: path.to_path_buf(),
            message: err.to_string(),
        }),
    }
}
