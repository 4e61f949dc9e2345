//! Filesystem-based variant storage.
//!
//! Variants are grouped by the file version they were derived from, so a
//! single directory removal deletes every variant of a source.

use adaptive_media_core::{ConfigurationEntry, FileVersion, StoredImage};
use adaptive_media_error::{AdaptiveMediaResult, StorageError, StorageErrorKind};
use adaptive_media_interface::{ContentStream, ImageStorage};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Filesystem storage backend.
///
/// Layout:
///
/// ```text
/// {base_path}/
/// └── {company_id}/
///     └── {group_id}/
///         └── {file_version_id}/
///             ├── {configuration_uuid}
///             └── {configuration_uuid}
/// ```
///
/// Writes go to a temp file that is renamed into place once the content
/// stream is exhausted.
#[derive(Debug, Clone)]
pub struct FileSystemImageStorage {
    base_path: PathBuf,
}

impl FileSystemImageStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> AdaptiveMediaResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem image storage");
        Ok(Self { base_path })
    }

    /// Root directory of this backend.
    pub fn base_path(&self) -> &std::path::Path {
        &self.base_path
    }

    /// Directory holding every variant of a file version.
    fn file_version_dir(&self, file_version: &FileVersion) -> PathBuf {
        self.base_path
            .join(file_version.company_id().to_string())
            .join(file_version.group_id().to_string())
            .join(file_version.file_version_id().to_string())
    }

    /// Path of one variant.
    fn variant_path(
        &self,
        file_version: &FileVersion,
        entry: &ConfigurationEntry,
    ) -> Result<PathBuf, StorageError> {
        let uuid = entry.uuid();
        let safe = !uuid.is_empty()
            && uuid != "."
            && uuid != ".."
            && !uuid.contains(['/', '\\', '\0']);
        if !safe {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "configuration uuid '{}' is not a valid file name",
                uuid
            ))));
        }
        Ok(self.file_version_dir(file_version).join(uuid))
    }

    /// Drain the stream into `file`, returning byte count and SHA-256 hex.
    async fn copy_hashed(
        content: &mut ContentStream,
        file: &mut tokio::fs::File,
        path: &std::path::Path,
    ) -> Result<(u64, String), StorageError> {
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
        let mut total: u64 = 0;

        loop {
            let read = content.read(&mut buffer).await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!("content stream: {}", e)))
            })?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
            file.write_all(&buffer[..read]).await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;
            total += read as u64;
        }

        file.flush().await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        Ok((total, format!("{:x}", hasher.finalize())))
    }
}

#[async_trait::async_trait]
impl ImageStorage for FileSystemImageStorage {
    #[tracing::instrument(
        skip(self, file_version, entry, content),
        fields(
            file_version_id = *file_version.file_version_id(),
            configuration_uuid = %entry.uuid()
        )
    )]
    async fn save(
        &self,
        file_version: &FileVersion,
        entry: &ConfigurationEntry,
        mut content: ContentStream,
    ) -> AdaptiveMediaResult<StoredImage> {
        let path = self.variant_path(file_version, entry)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4()));
        let mut file = tokio::fs::File::create(&temp_path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        let copied = Self::copy_hashed(&mut content, &mut file, &temp_path).await;
        drop(file);

        let (size_bytes, content_hash) = match copied {
            Ok((0, _)) => {
                let _ = tokio::fs::remove_file(&temp_path).await;
                return Err(StorageError::new(StorageErrorKind::EmptyContent(
                    path.display().to_string(),
                ))
                .into());
            }
            Ok(copied) => copied,
            Err(e) => {
                let _ = tokio::fs::remove_file(&temp_path).await;
                return Err(e.into());
            }
        };

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            hash = %content_hash,
            path = %path.display(),
            size = size_bytes,
            "Stored image variant"
        );

        Ok(StoredImage {
            storage_path: path.to_string_lossy().to_string(),
            size_bytes,
            content_hash,
        })
    }

    #[tracing::instrument(
        skip(self, file_version),
        fields(file_version_id = *file_version.file_version_id())
    )]
    async fn delete(&self, file_version: &FileVersion) -> AdaptiveMediaResult<()> {
        let dir = self.file_version_dir(file_version);

        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {
                tracing::info!(path = %dir.display(), "Deleted image variants");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %dir.display(), "No stored variants to delete");
                Ok(())
            }
            Err(e) => Err(StorageError::new(StorageErrorKind::Delete(format!(
                "{}: {}",
                dir.display(),
                e
            )))
            .into()),
        }
    }

    #[tracing::instrument(
        skip(self, file_version, entry),
        fields(
            file_version_id = *file_version.file_version_id(),
            configuration_uuid = %entry.uuid()
        )
    )]
    async fn get_content(
        &self,
        file_version: &FileVersion,
        entry: &ConfigurationEntry,
    ) -> AdaptiveMediaResult<Option<ContentStream>> {
        let path = self.variant_path(file_version, entry)?;

        match tokio::fs::File::open(&path).await {
            Ok(file) => {
                tracing::debug!(path = %path.display(), "Opened image variant");
                Ok(Some(Box::new(file)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    async fn has_content(
        &self,
        file_version: &FileVersion,
        entry: &ConfigurationEntry,
    ) -> AdaptiveMediaResult<bool> {
        let path = self.variant_path(file_version, entry)?;
        let exists = tokio::fs::try_exists(&path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(exists)
    }
}
