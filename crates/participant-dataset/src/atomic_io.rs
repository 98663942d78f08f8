//! Atomic file write operations.
//!
//! Stage outputs are streamed into a hidden temporary file in the target
//! directory and renamed over the target once complete. A failed stage never
//! leaves a partially written target behind, and a successful one replaces
//! any previous file.

use std::io::{self, BufWriter, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, File, OpenOptions};

use crate::error::PipelineError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Maps an I/O failure on the target into the stage's error variant.
pub(crate) type IoFailure = fn(&Utf8Path, &io::Error) -> PipelineError;

/// Streams `render` into `path` atomically and returns its result.
///
/// `render` receives a buffered writer over the temporary file. If it fails,
/// or flushing, syncing, or renaming fails, the temporary file is removed and
/// the error is returned. I/O failures are reported through `on_io_error`.
pub(crate) fn write_atomic<T, F>(
    dir: &Dir,
    path: &Utf8Path,
    on_io_error: IoFailure,
    render: F,
) -> Result<T, PipelineError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T, PipelineError>,
{
    let mut components = path.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err(on_io_error(
            path,
            &io::Error::new(io::ErrorKind::InvalidInput, "target path must be a file name"),
        ));
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{}.tmp.{}.{}.{}",
        file_name,
        std::process::id(),
        suffix,
        counter
    );

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let file = dir
        .open_with(&tmp_name, &options)
        .map_err(|err| on_io_error(path, &err))?;

    let outcome = write_to_temp_file(file, path, on_io_error, render).and_then(|value| {
        rename_temp_to_target(dir, &tmp_name, file_name, path, on_io_error).map(|()| value)
    });
    if outcome.is_err() {
        remove_temp_file(dir, &tmp_name);
        return outcome;
    }
    sync_parent_directory(dir);
    outcome
}

fn write_to_temp_file<T, F>(
    file: File,
    target_path: &Utf8Path,
    on_io_error: IoFailure,
    render: F,
) -> Result<T, PipelineError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T, PipelineError>,
{
    let mut writer = BufWriter::new(file);
    let value = render(&mut writer)?;
    writer
        .flush()
        .map_err(|err| on_io_error(target_path, &err))?;
    let synced = writer
        .into_inner()
        .map_err(|err| on_io_error(target_path, err.error()))?;
    synced
        .sync_all()
        .map_err(|err| on_io_error(target_path, &err))?;
    Ok(value)
}

fn rename_temp_to_target(
    dir: &Dir,
    tmp_name: &str,
    target_name: &str,
    target_path: &Utf8Path,
    on_io_error: IoFailure,
) -> Result<(), PipelineError> {
    rename_temp_to_target_impl(dir, tmp_name, target_name)
        .map_err(|err| on_io_error(target_path, &err))
}

#[cfg(windows)]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn remove_temp_file(dir: &Dir, tmp_name: &str) {
    // Best-effort cleanup; the caller reports the write failure.
    if dir.remove_file(tmp_name).is_err() {
        // Ignore cleanup failures.
    }
}

fn sync_parent_directory(parent: &Dir) {
    // Best-effort directory sync; ignore failures.
    if parent.open(".").and_then(|dir| dir.sync_all()).is_err() {
        // Ignore sync failures.
    }
}
