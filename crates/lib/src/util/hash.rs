//! Hashing for wheel `RECORD` entries.
//!
//! RECORD lines carry `sha256=<digest>` where the digest is the urlsafe
//! base64 encoding of the raw SHA-256, without padding.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// A RECORD digest together with the size of the hashed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDigest {
  /// `sha256=<urlsafe-b64-nopad>`
  pub hash: String,
  pub size: u64,
}

/// Hash arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> RecordDigest {
  let digest = Sha256::digest(data);
  RecordDigest {
    hash: format!("sha256={}", URL_SAFE_NO_PAD.encode(digest)),
    size: data.len() as u64,
  }
}
