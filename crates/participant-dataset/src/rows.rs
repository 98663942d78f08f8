//! Comma-separated row reading shared by the loader and the emitter.
//!
//! Both the participant list and the intermediate hash file are read with
//! conventional CSV quoting rules, no header row, and a minimum field count.
//! Rows may carry extra fields; only rows that are too short are rejected.

use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs::{Dir, File};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use tracing::debug;

use crate::error::PipelineError;

/// One row that has passed the field-count check.
#[derive(Debug)]
pub(crate) struct Row {
    record: StringRecord,
}

impl Row {
    /// Returns the field at `index`.
    ///
    /// Indices below the reader's minimum field count are always present.
    pub(crate) fn field(&self, index: usize) -> &str {
        self.record.get(index).unwrap_or_default()
    }
}

/// Lazy iterator over the rows of a delimited file.
pub(crate) struct DelimitedRows<R> {
    path: Utf8PathBuf,
    min_fields: usize,
    records: StringRecordsIntoIter<R>,
}

impl DelimitedRows<File> {
    /// Opens `path` inside `dir`.
    pub(crate) fn open(
        dir: &Dir,
        path: &Utf8Path,
        min_fields: usize,
    ) -> Result<Self, PipelineError> {
        let file = dir
            .open(path)
            .map_err(|err| PipelineError::open_for_read(path, &err))?;
        debug!(path = %path, min_fields, "opened delimited file");
        Ok(Self::from_reader(file, path, min_fields))
    }
}

impl<R: Read> DelimitedRows<R> {
    /// Wraps an arbitrary reader; `path` is used for error reporting only.
    pub(crate) fn from_reader(reader: R, path: &Utf8Path, min_fields: usize) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();
        Self {
            path: path.to_path_buf(),
            min_fields,
            records,
        }
    }

    fn check_width(&self, record: StringRecord) -> Result<Row, PipelineError> {
        if record.len() < self.min_fields {
            return Err(PipelineError::MalformedRow {
                path: self.path.clone(),
                line: record.position().map_or(0, csv::Position::line),
                expected: self.min_fields,
                found: record.len(),
            });
        }
        Ok(Row { record })
    }

    fn read_error(&self, err: &csv::Error) -> PipelineError {
        PipelineError::InputRead {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

impl<R: Read> Iterator for DelimitedRows<R> {
    type Item = Result<Row, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;
        Some(
            result
                .map_err(|err| self.read_error(&err))
                .and_then(|record| self.check_width(record)),
        )
    }
}
