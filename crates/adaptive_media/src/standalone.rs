//! A registry wired to the bundled collaborators.

use adaptive_media_database::InMemoryImageRecordStore;
use adaptive_media_error::AdaptiveMediaResult;
use adaptive_media_image::{
    AdaptiveMediaConfig, AdaptiveMediaImageService, AdaptiveMediaImageServiceBuilder,
    InMemoryFileVersionSource, SequentialIdGenerator, StaticConfigurationResolver,
};
use adaptive_media_interface::{
    ConfigurationResolver, CounterRegistry, ImageStorage, ServiceSlot,
};
use adaptive_media_storage::FileSystemImageStorage;
use std::sync::Arc;

/// Key the bundled file version source is registered under as a counter.
pub const FILE_VERSION_COUNTER_KEY: &str = "file-versions";

/// A started registry backed by filesystem bytes, in-memory records, and
/// in-memory file versions.
///
/// The file version source is also registered as a counter under
/// [`FILE_VERSION_COUNTER_KEY`].
#[derive(Debug)]
pub struct StandaloneRegistry {
    service: AdaptiveMediaImageService,
    records: InMemoryImageRecordStore,
    file_versions: InMemoryFileVersionSource,
    storage: ServiceSlot<dyn ImageStorage>,
    resolver: ServiceSlot<dyn ConfigurationResolver>,
    counters: CounterRegistry,
}

impl StandaloneRegistry {
    /// Build and start a registry from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be created.
    #[tracing::instrument(skip(config), fields(base_path = %config.storage.base_path.display()))]
    pub fn open(config: &AdaptiveMediaConfig) -> AdaptiveMediaResult<Self> {
        let storage: ServiceSlot<dyn ImageStorage> = ServiceSlot::with_service(
            "image storage",
            Arc::new(FileSystemImageStorage::new(config.storage.base_path.clone())?),
        );
        let resolver: ServiceSlot<dyn ConfigurationResolver> = ServiceSlot::with_service(
            "configuration resolver",
            Arc::new(StaticConfigurationResolver::from_config(config)),
        );

        let records = InMemoryImageRecordStore::new();
        let file_versions = InMemoryFileVersionSource::new();
        let counters = CounterRegistry::new();
        counters.register(FILE_VERSION_COUNTER_KEY, Arc::new(file_versions.clone()));

        let service = AdaptiveMediaImageServiceBuilder::default()
            .records(Arc::new(records.clone()))
            .file_versions(Arc::new(file_versions.clone()))
            .ids(Arc::new(SequentialIdGenerator::new()))
            .storage(storage.clone())
            .resolver(resolver.clone())
            .counters(counters.clone())
            .build()?;
        service.start();

        tracing::info!(
            configurations = config.configurations.len(),
            "Standalone registry opened"
        );
        Ok(Self {
            service,
            records,
            file_versions,
            storage,
            resolver,
            counters,
        })
    }

    /// The registry service.
    pub fn service(&self) -> &AdaptiveMediaImageService {
        &self.service
    }

    /// The in-memory record store behind the service.
    pub fn records(&self) -> &InMemoryImageRecordStore {
        &self.records
    }

    /// The file versions variants may be generated from.
    pub fn file_versions(&self) -> &InMemoryFileVersionSource {
        &self.file_versions
    }

    /// Slot holding the byte storage backend.
    pub fn storage(&self) -> &ServiceSlot<dyn ImageStorage> {
        &self.storage
    }

    /// Slot holding the configuration resolver.
    pub fn resolver(&self) -> &ServiceSlot<dyn ConfigurationResolver> {
        &self.resolver
    }

    /// Counters contributing to the expected variant count.
    pub fn counters(&self) -> &CounterRegistry {
        &self.counters
    }
}

impl Drop for StandaloneRegistry {
    fn drop(&mut self) {
        self.service.stop();
    }
}
