//! Trait definitions for registry collaborators.

use adaptive_media_core::{AdaptiveMediaImage, ConfigurationEntry, FileVersion, StoredImage};
use adaptive_media_error::AdaptiveMediaResult;
use async_trait::async_trait;
use tokio::io::AsyncRead;

/// Readable stream of variant bytes.
pub type ContentStream = Box<dyn AsyncRead + Send + Unpin>;

/// Source of original file versions (the document store).
#[async_trait]
pub trait FileVersionSource: Send + Sync {
    /// Look up a file version.
    ///
    /// Returns `None` if no such version exists.
    async fn get_file_version(&self, file_version_id: i64)
    -> AdaptiveMediaResult<Option<FileVersion>>;
}

/// Backend holding the raw bytes of generated variants.
///
/// Metadata lives in an [`ImageRecordStore`]; implementations only deal in
/// bytes keyed by file version and configuration.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Persist the bytes of one variant.
    ///
    /// # Arguments
    ///
    /// * `file_version` - The source the variant was generated from
    /// * `entry` - The configuration that produced the variant
    /// * `content` - The variant bytes
    ///
    /// # Returns
    ///
    /// A receipt describing where the bytes went.
    async fn save(
        &self,
        file_version: &FileVersion,
        entry: &ConfigurationEntry,
        content: ContentStream,
    ) -> AdaptiveMediaResult<StoredImage>;

    /// Remove every variant stored for a file version, across configurations.
    async fn delete(&self, file_version: &FileVersion) -> AdaptiveMediaResult<()>;

    /// Open the stored bytes of one variant.
    ///
    /// Returns `None` if nothing is stored for this pair.
    async fn get_content(
        &self,
        file_version: &FileVersion,
        entry: &ConfigurationEntry,
    ) -> AdaptiveMediaResult<Option<ContentStream>>;

    /// Check whether bytes are stored for a variant.
    async fn has_content(
        &self,
        file_version: &FileVersion,
        entry: &ConfigurationEntry,
    ) -> AdaptiveMediaResult<bool>;
}

/// Maps configuration identifiers to live configuration entries.
#[async_trait]
pub trait ConfigurationResolver: Send + Sync {
    /// Resolve a configuration for a company.
    ///
    /// Returns `None` if the company has no such configuration.
    async fn resolve(
        &self,
        company_id: i64,
        configuration_uuid: &str,
    ) -> AdaptiveMediaResult<Option<ConfigurationEntry>>;
}

/// Durable storage for variant metadata records.
///
/// Implementations must reject a second record for the same
/// `(configuration_uuid, file_version_id)` with
/// `ImageErrorKind::DuplicateVariant`.
#[async_trait]
pub trait ImageRecordStore: Send + Sync {
    /// Point lookup by composite key.
    async fn fetch_by_configuration_and_file_version(
        &self,
        configuration_uuid: &str,
        file_version_id: i64,
    ) -> AdaptiveMediaResult<Option<AdaptiveMediaImage>>;

    /// Every record derived from a file version, ordered by image id.
    async fn find_by_file_version(
        &self,
        file_version_id: i64,
    ) -> AdaptiveMediaResult<Vec<AdaptiveMediaImage>>;

    /// Number of records for a company and configuration.
    async fn count_by_company_and_configuration(
        &self,
        company_id: i64,
        configuration_uuid: &str,
    ) -> AdaptiveMediaResult<u64>;

    /// Insert a new record and return it as stored.
    async fn create(&self, image: AdaptiveMediaImage) -> AdaptiveMediaResult<AdaptiveMediaImage>;

    /// Remove a record by id.
    ///
    /// Returns the removed record, or `None` if it was already gone.
    async fn remove(&self, image_id: i64) -> AdaptiveMediaResult<Option<AdaptiveMediaImage>>;
}

/// Generator of identifiers for new records.
#[async_trait]
pub trait IdGenerator: Send + Sync {
    /// Produce the next unused identifier.
    async fn next_id(&self) -> AdaptiveMediaResult<i64>;
}
