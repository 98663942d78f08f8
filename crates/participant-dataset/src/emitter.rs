//! XML dataset emission.
//!
//! Reads the intermediate hash file and writes the variable-binding document
//! consumed by the certificate template. Field values are interpolated
//! verbatim: names or emails containing `&`, `<`, `>` or quotes produce an
//! invalid document.

use std::io::{Read, Write};

use camino::Utf8Path;
use cap_std::fs::{Dir, File};
use tracing::{debug, info};

use crate::atomic_io::write_atomic;
use crate::error::PipelineError;
use crate::record::HashedRecord;
use crate::rows::DelimitedRows;

/// Number of fields every intermediate row must carry.
pub const HASHED_FIELDS: usize = 3;

/// Fixed document preamble up to and including the opening
/// `v:sampleDataSets` tag.
pub const DATASET_HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 20001102//EN" "http://www.w3.org/TR/2000/CR-SVG-20001102/DTD/svg-20001102.dtd" [
    <!ENTITY ns_graphs "http://ns.adobe.com/Graphs/1.0/">
    <!ENTITY ns_vars "http://ns.adobe.com/Variables/1.0/">
    <!ENTITY ns_imrep "http://ns.adobe.com/ImageReplacement/1.0/">
    <!ENTITY ns_custom "http://ns.adobe.com/GenericCustomNamespace/1.0/">
    <!ENTITY ns_flows "http://ns.adobe.com/Flows/1.0/">
<!ENTITY ns_extend "http://ns.adobe.com/Extensibility/1.0/">
]>
<svg>
    <variableSets  xmlns="&ns_vars;">
        <variableSet locked="none" varSetName="binding1">
            <variables>
                <variable varName="fullName" trait="textcontent" category="&ns_flows;"></variable>
                <variable varName="emailAddress" trait="textcontent" category="&ns_flows;"></variable>
                <variable varName="hash" trait="textcontent" category="&ns_flows;"></variable>
            </variables>
            <v:sampleDataSets  xmlns:v="&ns_vars;" xmlns="&ns_custom;">
"#;

/// Fixed document epilogue closing every element the header opened.
pub const DATASET_FOOTER: &str = r"            </v:sampleDataSets>
        </variableSet>
    </variableSets>
</svg>
";

/// Lazy iterator over the records of an intermediate hash file.
///
/// The name is taken verbatim; the email and digest lose the leading
/// whitespace left by the `", "` separator.
pub struct HashedRecordReader<R> {
    rows: DelimitedRows<R>,
}

impl HashedRecordReader<File> {
    /// Opens the intermediate file at `path` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingInput`] when the file does not exist
    /// and [`PipelineError::InputRead`] when it cannot be opened.
    pub fn open(dir: &Dir, path: &Utf8Path) -> Result<Self, PipelineError> {
        DelimitedRows::open(dir, path, HASHED_FIELDS).map(|rows| Self { rows })
    }
}

impl<R: Read> HashedRecordReader<R> {
    /// Reads hashed records from any byte source; `path` only labels errors.
    pub fn from_reader(reader: R, path: &Utf8Path) -> Self {
        Self {
            rows: DelimitedRows::from_reader(reader, path, HASHED_FIELDS),
        }
    }
}

impl<R: Read> Iterator for HashedRecordReader<R> {
    type Item = Result<HashedRecord, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|row| {
            row.map(|fields| HashedRecord {
                full_name: fields.field(0).to_owned(),
                email_address: fields.field(1).trim_start().to_owned(),
                digest_hex: fields.field(2).trim_start().to_owned(),
            })
        })
    }
}

/// Renders the `v:sampleDataSet` block for one record.
///
/// # Example
///
/// ```
/// use participant_dataset::{HashedRecord, render_record_block};
///
/// let block = render_record_block(&HashedRecord {
///     full_name: "Jane Doe".to_owned(),
///     email_address: "jane@example.com".to_owned(),
///     digest_hex: "0".repeat(64),
/// });
///
/// assert!(block.contains(r#"<v:sampleDataSet dataSetName="Jane Doe">"#));
/// assert!(block.contains("<p>jane@example.com</p>"));
/// ```
#[must_use]
pub fn render_record_block(record: &HashedRecord) -> String {
    format!(
        r#"                <v:sampleDataSet dataSetName="{name}">
                    <fullName>
                        <p>{name}</p>
                    </fullName>
                    <emailAddress>
                        <p>{email}</p>
                    </emailAddress>
                    <hash>
                        <p>{hash}</p>
                    </hash>
                </v:sampleDataSet>
"#,
        name = record.full_name,
        email = record.email_address,
        hash = record.digest_hex,
    )
}

/// Writes the complete dataset document for `records` to `writer`.
///
/// Returns the number of record blocks written. `target` labels write
/// failures.
///
/// # Errors
///
/// Propagates errors yielded by `records` and returns
/// [`PipelineError::OutputWrite`] if `writer` fails.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use participant_dataset::{DATASET_FOOTER, DATASET_HEADER, HashedRecord, emit_records};
///
/// let mut out = Vec::new();
/// let none: Vec<Result<HashedRecord, _>> = Vec::new();
///
/// let count = emit_records(none, &mut out, Utf8Path::new("dataset.xml")).expect("emit");
///
/// assert_eq!(count, 0);
/// assert_eq!(
///     String::from_utf8(out).expect("utf-8"),
///     format!("{DATASET_HEADER}{DATASET_FOOTER}")
/// );
/// ```
pub fn emit_records<I, W>(
    records: I,
    writer: &mut W,
    target: &Utf8Path,
) -> Result<usize, PipelineError>
where
    I: IntoIterator<Item = Result<HashedRecord, PipelineError>>,
    W: Write + ?Sized,
{
    let write_failure = |err: std::io::Error| PipelineError::output_write(target, &err);

    writer
        .write_all(DATASET_HEADER.as_bytes())
        .map_err(write_failure)?;
    let mut count = 0_usize;
    for record in records {
        writer
            .write_all(render_record_block(&record?).as_bytes())
            .map_err(write_failure)?;
        count += 1;
    }
    writer
        .write_all(DATASET_FOOTER.as_bytes())
        .map_err(write_failure)?;
    Ok(count)
}

/// Reads the intermediate file `input` and writes the dataset `output`, both
/// relative to `dir`.
///
/// The output document is replaced atomically; when reading fails part-way,
/// no output file is written.
///
/// # Errors
///
/// Returns [`PipelineError::MissingInput`], [`PipelineError::MalformedRow`],
/// or [`PipelineError::InputRead`] for problems with the intermediate file and
/// [`PipelineError::OutputWrite`] when the document cannot be written.
pub fn emit_file(dir: &Dir, input: &Utf8Path, output: &Utf8Path) -> Result<usize, PipelineError> {
    let records = HashedRecordReader::open(dir, input)?;
    debug!(input = %input, output = %output, "emitting dataset");
    let count = write_atomic(dir, output, PipelineError::output_write, |writer| {
        emit_records(records, writer, output)
    })?;
    info!(records = count, output = %output, "wrote dataset");
    Ok(count)
}
