//! Storage receipts.

use serde::{Deserialize, Serialize};

/// Where a storage backend put a variant's bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoredImage {
    /// Backend-specific key or path of the stored bytes
    pub storage_path: String,
    /// Number of bytes written
    pub size_bytes: u64,
    /// SHA-256 hash of the content
    pub content_hash: String,
}
