//! Participant list to certificate dataset conversion.
//!
//! This crate turns a plain `FullName,EmailAddress` list into the XML
//! variable-binding document a document-generation tool uses to fill
//! certificate-of-participation templates. Each participant is tagged with a
//! SHA-256 digest of their name and a random seed, so every certificate
//! carries a value that cannot be guessed from the name alone.
//!
//! # Overview
//!
//! A run has three strictly sequential stages:
//!
//! - [`ParticipantReader`] loads the participant list
//! - [`enrich_file`] draws a seed per participant and writes the
//!   intermediate hash file
//! - [`emit_file`] re-reads that file and writes the dataset document
//!
//! [`run`] chains them, clears stale artifacts first, and removes the
//! intermediate file and the participant list once the dataset exists.
//!
//! # Example
//!
//! ```
//! use camino::Utf8Path;
//! use participant_dataset::{HashedRecordReader, ParticipantReader, emit_records, enrich_records};
//!
//! let participants = ParticipantReader::from_reader(
//!     "Jane Doe,jane@example.com\n".as_bytes(),
//!     Utf8Path::new("participants.txt"),
//! );
//! let mut hashes: Vec<u8> = Vec::new();
//! enrich_records(participants, &mut rand::rng(), &mut hashes, Utf8Path::new("hashes.txt"))
//!     .expect("hashing succeeds");
//!
//! let records = HashedRecordReader::from_reader(hashes.as_slice(), Utf8Path::new("hashes.txt"));
//! let mut dataset = Vec::new();
//! let count = emit_records(records, &mut dataset, Utf8Path::new("dataset.xml"))
//!     .expect("emission succeeds");
//!
//! assert_eq!(count, 1);
//! assert!(String::from_utf8(dataset)
//!     .expect("utf-8")
//!     .contains(r#"dataSetName="Jane Doe""#));
//! ```

mod atomic_io;
pub mod cli;
mod config;
mod digest;
mod emitter;
mod enricher;
mod error;
mod loader;
mod pipeline;
mod record;
mod rows;

pub use config::{DEFAULT_INPUT, DEFAULT_INTERMEDIATE, DEFAULT_OUTPUT, PipelineFiles};
pub use digest::{SEED_UPPER_BOUND, digest_hex, digest_input, draw_seed};
pub use emitter::{
    DATASET_FOOTER, DATASET_HEADER, HASHED_FIELDS, HashedRecordReader, emit_file, emit_records,
    render_record_block,
};
pub use enricher::{enrich_file, enrich_records};
pub use error::PipelineError;
pub use loader::{PARTICIPANT_FIELDS, ParticipantReader};
pub use pipeline::{RunSummary, run};
pub use record::{HashedRecord, ParticipantRecord};
