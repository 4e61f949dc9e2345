//! A registry wired to in-memory collaborators.

use super::{FixedCounter, MockImageStorage};
use adaptive_media_core::{
    ConfigurationEntry, ConfigurationEntryBuilder, FileVersion, FileVersionBuilder,
    VariantDescriptor, VariantDescriptorBuilder,
};
use adaptive_media_database::InMemoryImageRecordStore;
use adaptive_media_image::{
    AdaptiveMediaImageService, AdaptiveMediaImageServiceBuilder, InMemoryFileVersionSource,
    SequentialIdGenerator, StaticConfigurationResolver,
};
use adaptive_media_interface::{
    ConfigurationResolver, ContentStream, CounterRegistry, ImageStorage, ServiceSlot,
};
use std::io::Cursor;
use std::sync::Arc;

/// Company every fixture file version belongs to.
pub const COMPANY_ID: i64 = 10;
/// Group every fixture file version belongs to.
pub const GROUP_ID: i64 = 20;

/// Registry plus handles on each collaborator.
pub struct Harness {
    pub service: AdaptiveMediaImageService,
    pub records: InMemoryImageRecordStore,
    pub file_versions: InMemoryFileVersionSource,
    pub storage: Arc<MockImageStorage>,
    pub storage_slot: ServiceSlot<dyn ImageStorage>,
    pub resolver_slot: ServiceSlot<dyn ConfigurationResolver>,
    pub counters: CounterRegistry,
}

impl Harness {
    /// Registry with storage, resolver (thumbnail, preview, hd), and file
    /// versions 1 and 2 published, not yet started.
    pub async fn new() -> Self {
        Self::with_storage(MockImageStorage::new()).await
    }

    /// Same as [`Harness::new`] with a specific storage mock.
    pub async fn with_storage(storage: MockImageStorage) -> Self {
        let records = InMemoryImageRecordStore::new();
        let file_versions = InMemoryFileVersionSource::new();
        file_versions.insert(file_version(1, "image/png")).await;
        file_versions.insert(file_version(2, "image/jpeg")).await;

        let storage = Arc::new(storage);
        let storage_slot: ServiceSlot<dyn ImageStorage> =
            ServiceSlot::with_service("image storage", storage.clone());
        let resolver_slot: ServiceSlot<dyn ConfigurationResolver> = ServiceSlot::with_service(
            "configuration resolver",
            Arc::new(StaticConfigurationResolver::new(vec![
                global_entry("thumbnail"),
                global_entry("preview"),
                global_entry("hd"),
            ])),
        );
        let counters = CounterRegistry::new();

        let service = AdaptiveMediaImageServiceBuilder::default()
            .records(Arc::new(records.clone()))
            .file_versions(Arc::new(file_versions.clone()))
            .ids(Arc::new(SequentialIdGenerator::new()))
            .storage(storage_slot.clone())
            .resolver(resolver_slot.clone())
            .counters(counters.clone())
            .build()
            .unwrap();

        Self {
            service,
            records,
            file_versions,
            storage,
            storage_slot,
            resolver_slot,
            counters,
        }
    }

    /// Started registry with default collaborators.
    pub async fn started() -> Self {
        let harness = Self::new().await;
        harness.service.start();
        harness
    }

    /// Register a counter reporting a fixed count.
    pub fn register_counter(&self, key: &str, count: u64) -> Arc<FixedCounter> {
        let counter = Arc::new(FixedCounter::new(count));
        self.counters.register(key, counter.clone());
        counter
    }
}

/// File version of the fixture company and group.
pub fn file_version(file_version_id: i64, mime_type: &str) -> FileVersion {
    FileVersionBuilder::default()
        .file_version_id(file_version_id)
        .company_id(COMPANY_ID)
        .group_id(GROUP_ID)
        .mime_type(mime_type)
        .title(format!("file-{}", file_version_id))
        .build()
        .unwrap()
}

/// Configuration entry visible to every company.
pub fn global_entry(uuid: &str) -> ConfigurationEntry {
    ConfigurationEntryBuilder::default()
        .uuid(uuid)
        .name(uuid.to_uppercase())
        .build()
        .unwrap()
}

/// Descriptor for a JPEG variant.
pub fn descriptor(width: u32, height: u32, size: u64) -> VariantDescriptor {
    VariantDescriptorBuilder::default()
        .mime_type("image/jpeg")
        .width(width)
        .height(height)
        .size(size)
        .build()
        .unwrap()
}

/// Stream over the given bytes.
pub fn content(bytes: &[u8]) -> ContentStream {
    Box::new(Cursor::new(bytes.to_vec()))
}
