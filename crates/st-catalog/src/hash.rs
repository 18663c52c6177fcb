//! Content-based hashing for archive deduplication.

use crate::schema::Catalog;
use sha2::{Digest, Sha256};

/// Hex digest over the catalog's canonical JSON form. Archives with the same
/// digest hold the same data.
pub fn content_hash(catalog: &Catalog) -> String {
    let mut hasher = Sha256::new();
    let json = serde_json::to_string(catalog).unwrap_or_default();
    hasher.update(json.as_bytes());
    format!("{:x}", hasher.finalize())
}
