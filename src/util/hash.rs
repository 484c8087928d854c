//! SHA256 checksums.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::core::error::RecipeError;

/// Compute SHA256 hash of a byte slice.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute SHA256 hash of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Check `data` against an expected hex digest (case-insensitive).
pub fn verify_sha256(url: &str, data: &[u8], expected: &str) -> Result<(), RecipeError> {
    let actual = sha256_bytes(data);
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(RecipeError::Integrity {
            url: url.to_string(),
            expected: expected.to_ascii_lowercase(),
            actual,
        });
    }
    tracing::debug!("Checksum verified: {}", &actual[..16]);
    Ok(())
}
