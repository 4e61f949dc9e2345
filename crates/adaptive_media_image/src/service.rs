//! The adaptive media image registry service.

use adaptive_media_core::{AdaptiveMediaImage, AdaptiveMediaImageBuilder, VariantDescriptor};
use adaptive_media_error::{
    AdaptiveMediaError, AdaptiveMediaResult, BuilderError, ImageError, ImageErrorKind,
};
use adaptive_media_interface::{
    ConfigurationResolver, ContentStream, CounterRegistry, FileVersionSource, IdGenerator,
    ImageRecordStore, ImageStorage, ServiceSlot, ServiceTracker,
};
use chrono::Utc;
use std::sync::{Arc, PoisonError, RwLock};

/// Collaborator views held while the service is started.
struct Trackers {
    storage: ServiceTracker<dyn ImageStorage>,
    resolver: ServiceTracker<dyn ConfigurationResolver>,
    counters: CounterRegistry,
}

/// Registry of generated image variants.
///
/// Holds at most one [`AdaptiveMediaImage`] per configuration and file
/// version. Bytes go to whichever [`ImageStorage`] is published in the
/// storage slot, configurations come from the [`ConfigurationResolver`]
/// published in the resolver slot, and expected counts come from the
/// counters registered in the [`CounterRegistry`] at call time.
///
/// Operations that need a published collaborator only work between
/// [`start`](Self::start) and [`stop`](Self::stop).
///
/// # Example
///
/// ```rust,ignore
/// use adaptive_media_image::AdaptiveMediaImageServiceBuilder;
/// use std::sync::Arc;
///
/// let service = AdaptiveMediaImageServiceBuilder::default()
///     .records(Arc::new(records))
///     .file_versions(Arc::new(file_versions))
///     .ids(Arc::new(ids))
///     .storage(storage_slot)
///     .resolver(resolver_slot)
///     .counters(counters)
///     .build()?;
/// service.start();
/// ```
#[derive(derive_builder::Builder)]
#[builder(pattern = "owned", build_fn(private, name = "build_internal"))]
pub struct AdaptiveMediaImageService {
    /// Metadata record store.
    records: Arc<dyn ImageRecordStore>,
    /// Document store the source file versions live in.
    file_versions: Arc<dyn FileVersionSource>,
    /// Identifier source for new records.
    ids: Arc<dyn IdGenerator>,
    /// Slot the byte storage backend is published into.
    #[builder(default = "ServiceSlot::empty(\"image storage\")")]
    storage: ServiceSlot<dyn ImageStorage>,
    /// Slot the configuration resolver is published into.
    #[builder(default = "ServiceSlot::empty(\"configuration resolver\")")]
    resolver: ServiceSlot<dyn ConfigurationResolver>,
    /// Expected-count contributors.
    #[builder(default)]
    counters: CounterRegistry,
    #[builder(setter(skip))]
    trackers: RwLock<Option<Trackers>>,
}

impl AdaptiveMediaImageServiceBuilder {
    /// Build the AdaptiveMediaImageService.
    ///
    /// # Errors
    ///
    /// Returns error if the record store, file version source, or id
    /// generator is missing.
    pub fn build(self) -> AdaptiveMediaResult<AdaptiveMediaImageService> {
        Ok(self
            .build_internal()
            .map_err(|e| BuilderError::from(e.to_string()))?)
    }
}

impl std::fmt::Debug for AdaptiveMediaImageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptiveMediaImageService")
            .field("storage", &self.storage)
            .field("resolver", &self.resolver)
            .field("counters", &self.counters)
            .field("started", &self.is_started())
            .finish_non_exhaustive()
    }
}

#[track_caller]
fn unavailable(what: &str) -> AdaptiveMediaError {
    ImageError::new(ImageErrorKind::DependencyUnavailable(what.to_string())).into()
}

#[track_caller]
fn storage_failure(err: AdaptiveMediaError) -> AdaptiveMediaError {
    ImageError::new(ImageErrorKind::StorageFailure(err.to_string())).into()
}

impl AdaptiveMediaImageService {
    /// Open trackers on the storage and resolver slots and a view of the
    /// counter registry.
    ///
    /// Starting an already started service does nothing.
    #[tracing::instrument(skip(self))]
    pub fn start(&self) {
        let mut trackers = self.trackers.write().unwrap_or_else(PoisonError::into_inner);
        if trackers.is_some() {
            tracing::debug!("Registry already started");
            return;
        }
        *trackers = Some(Trackers {
            storage: self.storage.track(),
            resolver: self.resolver.track(),
            counters: self.counters.clone(),
        });
        tracing::info!("Adaptive media image registry started");
    }

    /// Close the trackers opened by [`start`](Self::start).
    #[tracing::instrument(skip(self))]
    pub fn stop(&self) {
        let closed = self
            .trackers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if closed.is_some() {
            tracing::info!("Adaptive media image registry stopped");
        } else {
            tracing::debug!("Registry was not started");
        }
    }

    /// Check whether the service is between `start` and `stop`.
    pub fn is_started(&self) -> bool {
        self.trackers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    #[track_caller]
    fn storage(&self) -> AdaptiveMediaResult<Arc<dyn ImageStorage>> {
        let trackers = self.trackers.read().unwrap_or_else(PoisonError::into_inner);
        let tracker = &trackers
            .as_ref()
            .ok_or_else(|| unavailable("registry is not started"))?
            .storage;
        tracker.service().ok_or_else(|| unavailable(tracker.name()))
    }

    #[track_caller]
    fn resolver(&self) -> AdaptiveMediaResult<Arc<dyn ConfigurationResolver>> {
        let trackers = self.trackers.read().unwrap_or_else(PoisonError::into_inner);
        let tracker = &trackers
            .as_ref()
            .ok_or_else(|| unavailable("registry is not started"))?
            .resolver;
        tracker.service().ok_or_else(|| unavailable(tracker.name()))
    }

    #[track_caller]
    fn counters(&self) -> AdaptiveMediaResult<CounterRegistry> {
        let trackers = self.trackers.read().unwrap_or_else(PoisonError::into_inner);
        trackers
            .as_ref()
            .map(|trackers| trackers.counters.clone())
            .ok_or_else(|| unavailable("registry is not started"))
    }

    /// Record a generated variant and store its bytes.
    ///
    /// # Arguments
    ///
    /// * `configuration_uuid` - Configuration that produced the variant
    /// * `file_version_id` - Source the variant was generated from
    /// * `descriptor` - MIME type, dimensions, and size of the variant
    /// * `content` - The variant bytes
    ///
    /// # Returns
    ///
    /// The stored record, with company and group copied from the file version.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `configuration_uuid` is empty
    /// - `DependencyUnavailable` if storage or resolver is not available
    /// - `DuplicateVariant` if a record already exists for the pair
    /// - `SourceNotFound` if the file version does not exist
    /// - `ConfigurationNotFound` if the company has no such configuration
    /// - `StorageFailure` if the backend rejects the bytes; no record is written
    #[tracing::instrument(
        skip(self, descriptor, content),
        fields(mime_type = %descriptor.mime_type(), size = *descriptor.size())
    )]
    pub async fn add_variant(
        &self,
        configuration_uuid: &str,
        file_version_id: i64,
        descriptor: VariantDescriptor,
        content: ContentStream,
    ) -> AdaptiveMediaResult<AdaptiveMediaImage> {
        if configuration_uuid.is_empty() {
            return Err(ImageError::new(ImageErrorKind::InvalidArgument(
                "configuration uuid must not be empty".to_string(),
            ))
            .into());
        }

        let storage = self.storage()?;
        let resolver = self.resolver()?;

        if let Some(existing) = self
            .records
            .fetch_by_configuration_and_file_version(configuration_uuid, file_version_id)
            .await?
        {
            tracing::warn!(
                image_id = *existing.image_id(),
                "Variant already registered, rejecting duplicate"
            );
            return Err(ImageError::new(ImageErrorKind::DuplicateVariant {
                configuration_uuid: configuration_uuid.to_string(),
                file_version_id,
            })
            .into());
        }

        let file_version = self
            .file_versions
            .get_file_version(file_version_id)
            .await?
            .ok_or_else(|| ImageError::new(ImageErrorKind::SourceNotFound(file_version_id)))?;

        let company_id = *file_version.company_id();
        let entry = resolver
            .resolve(company_id, configuration_uuid)
            .await?
            .ok_or_else(|| {
                ImageError::new(ImageErrorKind::ConfigurationNotFound {
                    company_id,
                    configuration_uuid: configuration_uuid.to_string(),
                })
            })?;

        let stored = storage
            .save(&file_version, &entry, content)
            .await
            .map_err(storage_failure)?;
        tracing::debug!(storage_path = %stored.storage_path, "Variant bytes stored");

        let image = AdaptiveMediaImageBuilder::default()
            .image_id(self.ids.next_id().await?)
            .company_id(company_id)
            .group_id(*file_version.group_id())
            .create_date(Utc::now())
            .file_version_id(file_version_id)
            .mime_type(descriptor.mime_type().clone())
            .width(*descriptor.width())
            .height(*descriptor.height())
            .size(*descriptor.size())
            .configuration_uuid(configuration_uuid)
            .build()?;

        let image = self.records.create(image).await?;
        tracing::info!(
            image_id = *image.image_id(),
            company_id,
            "Variant registered"
        );
        Ok(image)
    }

    /// Remove every variant of a file version, metadata first, then bytes.
    ///
    /// Zero matching records is not an error; the backend is still asked to
    /// delete.
    ///
    /// # Errors
    ///
    /// - `DependencyUnavailable` if storage is not available
    /// - `SourceNotFound` if the file version is gone; metadata is already removed
    /// - `StorageFailure` if the backend delete fails; metadata is already removed
    #[tracing::instrument(skip(self))]
    pub async fn delete_variants_for_file_version(
        &self,
        file_version_id: i64,
    ) -> AdaptiveMediaResult<()> {
        let storage = self.storage()?;

        let images = self.records.find_by_file_version(file_version_id).await?;
        for image in &images {
            self.records.remove(*image.image_id()).await?;
        }
        tracing::debug!(removed = images.len(), "Variant records removed");

        let file_version = self
            .file_versions
            .get_file_version(file_version_id)
            .await?
            .ok_or_else(|| ImageError::new(ImageErrorKind::SourceNotFound(file_version_id)))?;

        storage
            .delete(&file_version)
            .await
            .map_err(storage_failure)?;

        tracing::info!(removed = images.len(), "Variants deleted");
        Ok(())
    }

    /// Look up the variant for a configuration and file version.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_variant(
        &self,
        configuration_uuid: &str,
        file_version_id: i64,
    ) -> AdaptiveMediaResult<Option<AdaptiveMediaImage>> {
        let image = self
            .records
            .fetch_by_configuration_and_file_version(configuration_uuid, file_version_id)
            .await?;
        tracing::debug!(found = image.is_some(), "Fetched variant");
        Ok(image)
    }

    /// Number of variants recorded for a company and configuration.
    pub async fn count_variants(
        &self,
        company_id: i64,
        configuration_uuid: &str,
    ) -> AdaptiveMediaResult<u64> {
        self.records
            .count_by_company_and_configuration(company_id, configuration_uuid)
            .await
    }

    /// Every variant recorded for a file version, ordered by image id.
    pub async fn variants_for_file_version(
        &self,
        file_version_id: i64,
    ) -> AdaptiveMediaResult<Vec<AdaptiveMediaImage>> {
        self.records.find_by_file_version(file_version_id).await
    }

    /// Percentage of expected variants that exist for a company and
    /// configuration, in `0..=100`.
    ///
    /// The expected count is the sum over the counters registered right now.
    /// No expected variants yields 0.
    ///
    /// # Errors
    ///
    /// `DependencyUnavailable` if the service is not started.
    #[tracing::instrument(skip(self))]
    pub async fn get_percentage(
        &self,
        company_id: i64,
        configuration_uuid: &str,
    ) -> AdaptiveMediaResult<u8> {
        let snapshot = self.counters()?.snapshot();

        let mut expected: u64 = 0;
        for (key, counter) in snapshot {
            let count = counter.count_expected_images(company_id).await;
            tracing::debug!(counter = %key, count, "Counted expected variants");
            expected = expected.saturating_add(count);
        }

        if expected == 0 {
            return Ok(0);
        }

        let actual = self.count_variants(company_id, configuration_uuid).await?;
        let percentage = (u128::from(actual) * 100 / u128::from(expected)).min(100);
        tracing::debug!(expected, actual, percentage, "Computed completion");

        Ok(u8::try_from(percentage).unwrap_or(100))
    }
}
