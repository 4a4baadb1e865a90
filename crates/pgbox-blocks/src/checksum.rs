//! SHA-256 checksum utilities
//!
//! Single canonical checksum format (`sha256:<hex>`) used for SQL
//! fragment dedup and for the extension-configuration hash behind
//! deterministic container and image names.

use sha2::{Digest, Sha256};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of string content.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Incremental SHA-256 hasher producing a short hex digest.
///
/// Feed it the pieces of a configuration in a fixed order and take the
/// fixed-width prefix for use in container and image names.
#[derive(Debug, Default)]
pub struct ShortHasher {
    inner: Sha256,
}

/// Width of the hex prefix emitted by [`ShortHasher::finish`].
pub const SHORT_HASH_LEN: usize = 12;

impl ShortHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one piece of content. A NUL separator is appended so that
    /// adjacent pieces cannot collide by concatenation.
    pub fn update(&mut self, piece: &str) {
        self.inner.update(piece.as_bytes());
        self.inner.update([0u8]);
    }

    /// Finish and return the fixed-width hex prefix of the digest.
    pub fn finish(self) -> String {
        let digest = format!("{:x}", self.inner.finalize());
        digest[..SHORT_HASH_LEN].to_string()
    }
}
