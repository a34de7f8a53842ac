use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::OefenError;
use crate::serde::to_canonical_json_bytes;

/// Lowercase hex SHA-256 of the canonical JSON encoding of `value`.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, OefenError> {
    let digest = Sha256::digest(to_canonical_json_bytes(value)?);
    Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
}
