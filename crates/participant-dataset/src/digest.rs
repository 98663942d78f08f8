//! Seed drawing and participant digests.
//!
//! A participant's digest is the SHA-256 of `"<full name>: <seed>\n"`, where
//! the seed is a fresh random integer per record. The digest is therefore a
//! pure function of the name and seed, while the seed makes it unguessable
//! from the name alone.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Exclusive upper bound for drawn seeds (10^11).
pub const SEED_UPPER_BOUND: u64 = 100_000_000_000;

/// Draws a seed uniformly from `[0, SEED_UPPER_BOUND)`.
///
/// Any [`Rng`] can supply the randomness. Production callers use the thread
/// RNG; tests pass a seeded generator for repeatable output.
///
/// # Example
///
/// ```
/// use participant_dataset::{SEED_UPPER_BOUND, draw_seed};
///
/// let seed = draw_seed(&mut rand::rng());
/// assert!(seed < SEED_UPPER_BOUND);
/// ```
pub fn draw_seed<R>(rng: &mut R) -> u64
where
    R: Rng + ?Sized,
{
    rng.random_range(0..SEED_UPPER_BOUND)
}

/// Builds the canonical string that is hashed for a participant.
///
/// # Example
///
/// ```
/// use participant_dataset::digest_input;
///
/// assert_eq!(digest_input("Jane Doe", 42), "Jane Doe: 42\n");
/// ```
#[must_use]
pub fn digest_input(full_name: &str, seed: u64) -> String {
    format!("{full_name}: {seed}\n")
}

/// Returns the lowercase hex SHA-256 digest of [`digest_input`].
///
/// # Example
///
/// ```
/// use participant_dataset::digest_hex;
///
/// let digest = digest_hex("Jane Doe", 42);
///
/// assert_eq!(digest.len(), 64);
/// assert_eq!(digest, digest_hex("Jane Doe", 42));
/// ```
#[must_use]
pub fn digest_hex(full_name: &str, seed: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(digest_input(full_name, seed).as_bytes());
    hex::encode(hasher.finalize())
}
