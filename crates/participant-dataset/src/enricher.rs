//! Hash enrichment stage.
//!
//! Each participant receives a freshly drawn seed and the digest derived from
//! it. The resulting records are written one per line to the intermediate
//! hash file in encounter order.

use std::io::Write;

use camino::Utf8Path;
use cap_std::fs::Dir;
use rand::Rng;
use tracing::{debug, info};

use crate::atomic_io::write_atomic;
use crate::digest::draw_seed;
use crate::error::PipelineError;
use crate::loader::ParticipantReader;
use crate::record::{HashedRecord, ParticipantRecord};

/// Hashes `records` and writes one intermediate line per record to `writer`.
///
/// Records are consumed lazily, so a malformed row stops the stage at that
/// row. `target` labels write failures. Returns the number of records
/// written.
///
/// # Errors
///
/// Propagates errors yielded by `records` and returns
/// [`PipelineError::HashComputation`] if `writer` fails.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use participant_dataset::{ParticipantRecord, enrich_records};
///
/// let records = vec![Ok(ParticipantRecord::new("Jane Doe", "jane@example.com"))];
/// let mut out = Vec::new();
///
/// let count = enrich_records(records, &mut rand::rng(), &mut out, Utf8Path::new("hashes.txt"))
///     .expect("enrichment succeeds");
///
/// let text = String::from_utf8(out).expect("utf-8 output");
/// assert_eq!(count, 1);
/// assert!(text.starts_with("Jane Doe, jane@example.com, "));
/// assert!(text.ends_with('\n'));
/// ```
pub fn enrich_records<I, R, W>(
    records: I,
    rng: &mut R,
    writer: &mut W,
    target: &Utf8Path,
) -> Result<usize, PipelineError>
where
    I: IntoIterator<Item = Result<ParticipantRecord, PipelineError>>,
    R: Rng + ?Sized,
    W: Write + ?Sized,
{
    let mut count = 0_usize;
    for record in records {
        let hashed = HashedRecord::from_participant(record?, draw_seed(rng));
        writeln!(writer, "{hashed}")
            .map_err(|err| PipelineError::hash_computation(target, &err))?;
        count += 1;
    }
    Ok(count)
}

/// Reads participants from `input` and writes the intermediate hash file
/// `output`, both relative to `dir`.
///
/// The intermediate file is replaced atomically and is fully synced before
/// this returns. When any row fails, no intermediate file is written.
///
/// # Errors
///
/// Returns [`PipelineError::MissingInput`], [`PipelineError::MalformedRow`],
/// or [`PipelineError::InputRead`] for input problems and
/// [`PipelineError::HashComputation`] when the intermediate file cannot be
/// written.
pub fn enrich_file<R>(
    dir: &Dir,
    input: &Utf8Path,
    output: &Utf8Path,
    rng: &mut R,
) -> Result<usize, PipelineError>
where
    R: Rng + ?Sized,
{
    let participants = ParticipantReader::open(dir, input)?;
    debug!(input = %input, output = %output, "hashing participants");
    let count = write_atomic(dir, output, PipelineError::hash_computation, |writer| {
        enrich_records(participants, rng, writer, output)
    })?;
    info!(records = count, output = %output, "wrote hashed records");
    Ok(count)
}
