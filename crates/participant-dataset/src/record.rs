//! Participant and hashed record types.
//!
//! These are the rows that flow between pipeline stages. Both types are
//! transient: they are created while reading one file and consumed while
//! writing the next.

use std::fmt;

use crate::digest::digest_hex;

/// One participant read from the input list.
///
/// # Example
///
/// ```
/// use participant_dataset::ParticipantRecord;
///
/// let record = ParticipantRecord::new("Jane Doe", "jane@example.com");
///
/// assert_eq!(record.full_name, "Jane Doe");
/// assert_eq!(record.email_address, "jane@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRecord {
    /// Participant's full name, exactly as it appeared in the input.
    pub full_name: String,
    /// Participant's email address, exactly as it appeared in the input.
    pub email_address: String,
}

impl ParticipantRecord {
    /// Creates a participant record from its two fields.
    #[must_use]
    pub fn new(full_name: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email_address: email_address.into(),
        }
    }
}

/// A participant with the digest that identifies them in the dataset.
///
/// The [`fmt::Display`] implementation renders the body of one line of the
/// intermediate hash file: the three fields separated by `", "` with no
/// quoting.
///
/// # Example
///
/// ```
/// use participant_dataset::{HashedRecord, ParticipantRecord};
///
/// let participant = ParticipantRecord::new("Jane Doe", "jane@example.com");
/// let hashed = HashedRecord::from_participant(participant, 42);
///
/// assert_eq!(hashed.digest_hex.len(), 64);
/// assert!(hashed.to_string().starts_with("Jane Doe, jane@example.com, "));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedRecord {
    /// Participant's full name.
    pub full_name: String,
    /// Participant's email address.
    pub email_address: String,
    /// Lowercase hexadecimal SHA-256 digest.
    pub digest_hex: String,
}

impl HashedRecord {
    /// Hashes a participant with the supplied seed.
    #[must_use]
    pub fn from_participant(record: ParticipantRecord, seed: u64) -> Self {
        let digest = digest_hex(&record.full_name, seed);
        Self {
            full_name: record.full_name,
            email_address: record.email_address,
            digest_hex: digest,
        }
    }
}

impl fmt::Display for HashedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.full_name, self.email_address, self.digest_hex
        )
    }
}
