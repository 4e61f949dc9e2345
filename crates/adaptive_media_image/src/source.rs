//! In-memory file version source.

use adaptive_media_core::{FileVersion, is_supported_image_mime_type};
use adaptive_media_error::AdaptiveMediaResult;
use adaptive_media_interface::{FileVersionSource, ImageCounter};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// File versions held in memory.
///
/// Also counts, per company, the file versions whose MIME type gets
/// variants, which makes it usable as an [`ImageCounter`].
///
/// # Example
///
/// ```no_run
/// use adaptive_media_core::FileVersionBuilder;
/// use adaptive_media_image::InMemoryFileVersionSource;
///
/// #[tokio::main]
/// async fn main() {
///     let source = InMemoryFileVersionSource::new();
///     let version = FileVersionBuilder::default()
///         .file_version_id(1)
///         .company_id(10)
///         .group_id(20)
///         .mime_type("image/png")
///         .build()
///         .unwrap();
///     source.insert(version).await;
///     assert_eq!(source.len().await, 1);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileVersionSource {
    versions: Arc<RwLock<HashMap<i64, FileVersion>>>,
}

impl InMemoryFileVersionSource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file version.
    #[tracing::instrument(skip(self, version), fields(file_version_id = *version.file_version_id()))]
    pub async fn insert(&self, version: FileVersion) -> Option<FileVersion> {
        tracing::debug!("Inserting file version");
        self.versions
            .write()
            .await
            .insert(*version.file_version_id(), version)
    }

    /// Remove a file version.
    pub async fn remove(&self, file_version_id: i64) -> Option<FileVersion> {
        self.versions.write().await.remove(&file_version_id)
    }

    /// Number of file versions held.
    pub async fn len(&self) -> usize {
        self.versions.read().await.len()
    }

    /// Check if the source holds no file versions.
    pub async fn is_empty(&self) -> bool {
        self.versions.read().await.is_empty()
    }
}

#[async_trait]
impl FileVersionSource for InMemoryFileVersionSource {
    async fn get_file_version(
        &self,
        file_version_id: i64,
    ) -> AdaptiveMediaResult<Option<FileVersion>> {
        Ok(self.versions.read().await.get(&file_version_id).cloned())
    }
}

#[async_trait]
impl ImageCounter for InMemoryFileVersionSource {
    async fn count_expected_images(&self, company_id: i64) -> u64 {
        let versions = self.versions.read().await;
        versions
            .values()
            .filter(|version| {
                *version.company_id() == company_id
                    && is_supported_image_mime_type(version.mime_type())
            })
            .count() as u64
    }
}
