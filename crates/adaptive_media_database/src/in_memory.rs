//! In-memory implementation of ImageRecordStore.
//!
//! Records live in a BTreeMap keyed by image id, with a secondary index on
//! `(configuration_uuid, file_version_id)` that doubles as the uniqueness
//! constraint. All data is lost when the store is dropped.

use adaptive_media_core::AdaptiveMediaImage;
use adaptive_media_error::{
    AdaptiveMediaResult, DatabaseError, DatabaseErrorKind, ImageError, ImageErrorKind,
};
use adaptive_media_interface::ImageRecordStore;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory record store.
///
/// # Example
/// ```no_run
/// use adaptive_media_database::InMemoryImageRecordStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryImageRecordStore::new();
///     assert!(store.is_empty().await);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageRecordStore {
    inner: Arc<RwLock<Records>>,
}

#[derive(Debug, Default)]
struct Records {
    /// Records keyed by image id
    images: BTreeMap<i64, AdaptiveMediaImage>,
    /// Unique index: (configuration_uuid, file_version_id) -> image id
    by_key: HashMap<(String, i64), i64>,
}

impl InMemoryImageRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored records (for testing).
    pub async fn len(&self) -> usize {
        self.inner.read().await.images.len()
    }

    /// Check if the store is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.images.is_empty()
    }

    /// Every stored record ordered by image id (for testing).
    pub async fn all(&self) -> Vec<AdaptiveMediaImage> {
        self.inner.read().await.images.values().cloned().collect()
    }
}

#[async_trait]
impl ImageRecordStore for InMemoryImageRecordStore {
    async fn fetch_by_configuration_and_file_version(
        &self,
        configuration_uuid: &str,
        file_version_id: i64,
    ) -> AdaptiveMediaResult<Option<AdaptiveMediaImage>> {
        let records = self.inner.read().await;
        Ok(records
            .by_key
            .get(&(configuration_uuid.to_string(), file_version_id))
            .and_then(|id| records.images.get(id))
            .cloned())
    }

    async fn find_by_file_version(
        &self,
        file_version_id: i64,
    ) -> AdaptiveMediaResult<Vec<AdaptiveMediaImage>> {
        let records = self.inner.read().await;
        Ok(records
            .images
            .values()
            .filter(|image| *image.file_version_id() == file_version_id)
            .cloned()
            .collect())
    }

    async fn count_by_company_and_configuration(
        &self,
        company_id: i64,
        configuration_uuid: &str,
    ) -> AdaptiveMediaResult<u64> {
        let records = self.inner.read().await;
        let count = records
            .images
            .values()
            .filter(|image| {
                *image.company_id() == company_id && image.configuration_uuid() == configuration_uuid
            })
            .count();
        Ok(count as u64)
    }

    #[tracing::instrument(
        skip(self, image),
        fields(
            image_id = *image.image_id(),
            configuration_uuid = %image.configuration_uuid(),
            file_version_id = *image.file_version_id()
        )
    )]
    async fn create(&self, image: AdaptiveMediaImage) -> AdaptiveMediaResult<AdaptiveMediaImage> {
        let mut records = self.inner.write().await;
        let key = (
            image.configuration_uuid().clone(),
            *image.file_version_id(),
        );

        if records.by_key.contains_key(&key) {
            tracing::warn!("Rejected record violating variant uniqueness");
            return Err(ImageError::new(ImageErrorKind::DuplicateVariant {
                configuration_uuid: key.0,
                file_version_id: key.1,
            })
            .into());
        }
        if records.images.contains_key(image.image_id()) {
            return Err(DatabaseError::new(DatabaseErrorKind::Query(format!(
                "image id {} already in use",
                image.image_id()
            )))
            .into());
        }

        records.by_key.insert(key, *image.image_id());
        records.images.insert(*image.image_id(), image.clone());
        tracing::debug!("Created image record");
        Ok(image)
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, image_id: i64) -> AdaptiveMediaResult<Option<AdaptiveMediaImage>> {
        let mut records = self.inner.write().await;
        let removed = records.images.remove(&image_id);
        if let Some(image) = &removed {
            records
                .by_key
                .remove(&(image.configuration_uuid().clone(), *image.file_version_id()));
            tracing::debug!("Removed image record");
        }
        Ok(removed)
    }
}
