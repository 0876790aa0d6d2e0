//! SHA-256 checksums in the `sha256:<hex>` form used by file reports

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// Checksum of in-memory text, as it would be written to disk.
pub fn of_text(content: &str) -> String {
    of_bytes(content.as_bytes())
}

/// Checksum of raw bytes.
fn of_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{}{:x}", PREFIX, hasher.finalize())
}
