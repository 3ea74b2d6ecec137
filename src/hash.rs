//! BLAKE3 hashing of configuration documents
//!
//! The ownership ledger records the hash of every default written at install
//! time so later edits to active configuration can be detected.

use blake3::Hasher;
use serde_yaml::Mapping;

use crate::error::Result;

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate the BLAKE3 hash of a document
///
/// Hashes the canonical YAML encoding, so two mappings with the same keys in
/// the same order hash the same regardless of how their source files were
/// formatted.
pub fn hash_document(data: &Mapping) -> Result<String> {
    let encoded = serde_yaml::to_string(data)?;
    let mut hasher = Hasher::new();
    hasher.update(encoded.as_bytes());
    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Verify a hash matches the expected value
pub fn verify_hash(expected: &str, actual: &str) -> bool {
    let normalize = |h: &str| {
        if h.starts_with(HASH_PREFIX) {
            h.to_string()
        } else {
            format!("{}{}", HASH_PREFIX, h)
        }
    };

    normalize(expected) == normalize(actual)
}
