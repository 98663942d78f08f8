//! Input loader for the participant list.
//!
//! Reads `FullName,EmailAddress` rows lazily, one [`ParticipantRecord`] per
//! non-empty line, in file order.

use std::io::Read;

use camino::Utf8Path;
use cap_std::fs::{Dir, File};

use crate::error::PipelineError;
use crate::record::ParticipantRecord;
use crate::rows::DelimitedRows;

/// Number of fields every participant row must carry.
pub const PARTICIPANT_FIELDS: usize = 2;

/// Lazy, single-pass iterator over the participants in a file.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use participant_dataset::{ParticipantReader, ParticipantRecord};
///
/// let input = "Jane Doe,jane@example.com\n\"Doe, John\",john@example.com\n";
/// let records: Vec<ParticipantRecord> =
///     ParticipantReader::from_reader(input.as_bytes(), Utf8Path::new("participants.txt"))
///         .collect::<Result<_, _>>()
///         .expect("well-formed input");
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(
///     records.get(1).map(|record| record.full_name.as_str()),
///     Some("Doe, John")
/// );
/// ```
pub struct ParticipantReader<R> {
    rows: DelimitedRows<R>,
}

impl ParticipantReader<File> {
    /// Opens the participant list at `path` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingInput`] when the file does not exist
    /// and [`PipelineError::InputRead`] when it cannot be opened.
    pub fn open(dir: &Dir, path: &Utf8Path) -> Result<Self, PipelineError> {
        DelimitedRows::open(dir, path, PARTICIPANT_FIELDS).map(|rows| Self { rows })
    }
}

impl<R: Read> ParticipantReader<R> {
    /// Reads participants from any byte source.
    ///
    /// `path` only labels errors.
    pub fn from_reader(reader: R, path: &Utf8Path) -> Self {
        Self {
            rows: DelimitedRows::from_reader(reader, path, PARTICIPANT_FIELDS),
        }
    }
}

impl<R: Read> Iterator for ParticipantReader<R> {
    type Item = Result<ParticipantRecord, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|row| {
            row.map(|fields| ParticipantRecord::new(fields.field(0), fields.field(1)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use cap_std::ambient_authority;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Workspace {
        _tmp: TempDir,
        dir: Dir,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let tmp = TempDir::new().expect("create temp dir");
        let dir = Dir::open_ambient_dir(tmp.path(), ambient_authority()).expect("open temp dir");
        Workspace { _tmp: tmp, dir }
    }

    #[rstest]
    fn reads_participants_in_file_order(workspace: Workspace) {
        workspace
            .dir
            .write(
                "participants.txt",
                "Jane Doe,jane@example.com\nAda Lovelace,ada@example.com\n",
            )
            .expect("write input");

        let records: Vec<ParticipantRecord> =
            ParticipantReader::open(&workspace.dir, Utf8Path::new("participants.txt"))
                .expect("open input")
                .collect::<Result<_, _>>()
                .expect("well-formed input");

        assert_eq!(
            records,
            vec![
                ParticipantRecord::new("Jane Doe", "jane@example.com"),
                ParticipantRecord::new("Ada Lovelace", "ada@example.com"),
            ]
        );
    }

    #[rstest]
    fn missing_file_is_reported(workspace: Workspace) {
        let result = ParticipantReader::open(&workspace.dir, Utf8Path::new("participants.txt"));

        assert!(matches!(
            result,
            Err(PipelineError::MissingInput { ref path }) if path == "participants.txt"
        ));
    }

    #[rstest]
    fn row_without_email_is_malformed() {
        let mut reader = ParticipantReader::from_reader(
            "Jane Doe,jane@example.com\nJohn Doe\n".as_bytes(),
            Utf8Path::new("participants.txt"),
        );

        assert!(reader.next().expect("first row").is_ok());
        let err = reader.next().expect("second row").expect_err("malformed");

        assert_eq!(
            err,
            PipelineError::MalformedRow {
                path: Utf8PathBuf::from("participants.txt"),
                line: 2,
                expected: PARTICIPANT_FIELDS,
                found: 1,
            }
        );
    }

    #[rstest]
    fn empty_input_yields_no_records() {
        let mut reader =
            ParticipantReader::from_reader("".as_bytes(), Utf8Path::new("participants.txt"));

        assert!(reader.next().is_none());
    }

    #[rstest]
    fn crlf_line_endings_are_accepted() {
        let records: Vec<ParticipantRecord> = ParticipantReader::from_reader(
            "Jane Doe,jane@example.com\r\nAda Lovelace,ada@example.com\r\n".as_bytes(),
            Utf8Path::new("participants.txt"),
        )
        .collect::<Result<_, _>>()
        .expect("well-formed input");

        assert_eq!(records.len(), 2);
        assert!(
            records
                .iter()
                .all(|record| !record.email_address.ends_with('\r'))
        );
    }
}
