//! Mock byte storage for registry tests.

use adaptive_media_core::{ConfigurationEntry, FileVersion, StoredImage};
use adaptive_media_error::{AdaptiveMediaResult, StorageError, StorageErrorKind};
use adaptive_media_interface::{ContentStream, ImageStorage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;
use tokio::io::AsyncReadExt;

/// Failure injection for [`MockImageStorage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBehavior {
    /// Every call succeeds
    #[default]
    Succeed,
    /// `save` fails
    FailSave,
    /// `delete` fails
    FailDelete,
}

/// Byte storage keeping variants in a map and recording every call.
#[derive(Debug, Default)]
pub struct MockImageStorage {
    behavior: Mutex<StorageBehavior>,
    contents: Mutex<HashMap<(i64, String), Vec<u8>>>,
    saves: Mutex<Vec<(i64, String)>>,
    deletes: Mutex<Vec<i64>>,
}

impl MockImageStorage {
    /// Create a storage that succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage with the given failure behavior.
    pub fn with_behavior(behavior: StorageBehavior) -> Self {
        let storage = Self::default();
        storage.set_behavior(behavior);
        storage
    }

    /// Change failure behavior.
    pub fn set_behavior(&self, behavior: StorageBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    /// Stored bytes for a variant.
    pub fn content(&self, file_version_id: i64, configuration_uuid: &str) -> Option<Vec<u8>> {
        self.contents
            .lock()
            .unwrap()
            .get(&(file_version_id, configuration_uuid.to_string()))
            .cloned()
    }

    /// Number of stored variants.
    pub fn stored_count(&self) -> usize {
        self.contents.lock().unwrap().len()
    }

    /// Every `save` call as `(file_version_id, configuration_uuid)`.
    pub fn saves(&self) -> Vec<(i64, String)> {
        self.saves.lock().unwrap().clone()
    }

    /// Every `delete` call by file version id.
    pub fn deletes(&self) -> Vec<i64> {
        self.deletes.lock().unwrap().clone()
    }

    fn behavior(&self) -> StorageBehavior {
        *self.behavior.lock().unwrap()
    }
}

#[async_trait]
impl ImageStorage for MockImageStorage {
    async fn save(
        &self,
        file_version: &FileVersion,
        entry: &ConfigurationEntry,
        mut content: ContentStream,
    ) -> AdaptiveMediaResult<StoredImage> {
        let key = (*file_version.file_version_id(), entry.uuid().clone());
        self.saves.lock().unwrap().push(key.clone());

        if self.behavior() == StorageBehavior::FailSave {
            return Err(StorageError::new(StorageErrorKind::FileWrite("disk full".into())).into());
        }

        let mut bytes = Vec::new();
        content
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::FileWrite(e.to_string())))?;
        if bytes.is_empty() {
            return Err(StorageError::new(StorageErrorKind::EmptyContent("no bytes".into())).into());
        }

        let receipt = StoredImage {
            storage_path: format!("{}/{}", key.0, key.1),
            size_bytes: bytes.len() as u64,
            content_hash: String::new(),
        };
        self.contents.lock().unwrap().insert(key, bytes);
        Ok(receipt)
    }

    async fn delete(&self, file_version: &FileVersion) -> AdaptiveMediaResult<()> {
        let file_version_id = *file_version.file_version_id();
        self.deletes.lock().unwrap().push(file_version_id);

        if self.behavior() == StorageBehavior::FailDelete {
            return Err(StorageError::new(StorageErrorKind::Delete("permission denied".into())).into());
        }

        self.contents
            .lock()
            .unwrap()
            .retain(|(id, _), _| *id != file_version_id);
        Ok(())
    }

    async fn get_content(
        &self,
        file_version: &FileVersion,
        entry: &ConfigurationEntry,
    ) -> AdaptiveMediaResult<Option<ContentStream>> {
        Ok(self
            .content(*file_version.file_version_id(), entry.uuid())
            .map(|bytes| Box::new(Cursor::new(bytes)) as ContentStream))
    }

    async fn has_content(
        &self,
        file_version: &FileVersion,
        entry: &ConfigurationEntry,
    ) -> AdaptiveMediaResult<bool> {
        Ok(self
            .content(*file_version.file_version_id(), entry.uuid())
            .is_some())
    }
}
