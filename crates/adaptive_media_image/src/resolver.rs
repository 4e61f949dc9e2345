//! Configuration resolver over a fixed set of entries.

use crate::AdaptiveMediaConfig;
use adaptive_media_core::ConfigurationEntry;
use adaptive_media_error::AdaptiveMediaResult;
use adaptive_media_interface::ConfigurationResolver;
use async_trait::async_trait;

/// Resolves configuration uuids against entries known at construction.
///
/// An entry matches a company when its uuid matches and it is either global
/// or scoped to that company. Company-scoped entries win over global ones
/// with the same uuid. Disabled entries still resolve, so variants created
/// before an entry was disabled keep a valid configuration.
///
/// # Example
///
/// ```
/// use adaptive_media_core::ConfigurationEntryBuilder;
/// use adaptive_media_image::StaticConfigurationResolver;
///
/// let thumbnail = ConfigurationEntryBuilder::default()
///     .uuid("thumbnail")
///     .name("Thumbnail")
///     .build()
///     .unwrap();
/// let resolver = StaticConfigurationResolver::new(vec![thumbnail]);
/// assert_eq!(resolver.entries().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticConfigurationResolver {
    entries: Vec<ConfigurationEntry>,
}

impl StaticConfigurationResolver {
    /// Create a resolver over the given entries.
    pub fn new(entries: Vec<ConfigurationEntry>) -> Self {
        Self { entries }
    }

    /// Create a resolver over the `[[configurations]]` of a loaded config.
    pub fn from_config(config: &AdaptiveMediaConfig) -> Self {
        Self::new(config.configurations.clone())
    }

    /// Every known entry.
    pub fn entries(&self) -> &[ConfigurationEntry] {
        &self.entries
    }

    fn find(&self, company_id: i64, configuration_uuid: &str) -> Option<&ConfigurationEntry> {
        let mut candidates = self
            .entries
            .iter()
            .filter(|entry| entry.uuid() == configuration_uuid && entry.applies_to(company_id));
        let first = candidates.next()?;
        if first.company_id().is_some() {
            return Some(first);
        }
        candidates
            .find(|entry| entry.company_id().is_some())
            .or(Some(first))
    }
}

#[async_trait]
impl ConfigurationResolver for StaticConfigurationResolver {
    #[tracing::instrument(skip(self))]
    async fn resolve(
        &self,
        company_id: i64,
        configuration_uuid: &str,
    ) -> AdaptiveMediaResult<Option<ConfigurationEntry>> {
        let entry = self.find(company_id, configuration_uuid).cloned();
        tracing::debug!(found = entry.is_some(), "Resolved configuration");
        Ok(entry)
    }
}
