//! Adaptive media configuration entries.

use adaptive_media_error::{AdaptiveMediaResult, BuilderError};
use serde::{Deserialize, Serialize};

/// A named policy describing how variants are generated.
///
/// Entries without a `company_id` apply to every company.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct ConfigurationEntry {
    /// Opaque identifier referenced by variant records.
    uuid: String,
    /// Human readable name.
    name: String,
    /// Free-form description.
    #[builder(default)]
    #[serde(default)]
    description: String,
    /// Company this entry belongs to.
    #[builder(default)]
    #[serde(default)]
    company_id: Option<i64>,
    /// Maximum variant width in pixels.
    #[builder(default)]
    #[serde(default)]
    max_width: Option<u32>,
    /// Maximum variant height in pixels.
    #[builder(default)]
    #[serde(default)]
    max_height: Option<u32>,
    /// Whether new variants should be generated for this entry.
    #[builder(default = "true")]
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ConfigurationEntry {
    /// Whether this entry is visible to the given company.
    pub fn applies_to(&self, company_id: i64) -> bool {
        self.company_id.is_none_or(|id| id == company_id)
    }
}

impl ConfigurationEntryBuilder {
    /// Build the ConfigurationEntry.
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing.
    pub fn build(&self) -> AdaptiveMediaResult<ConfigurationEntry> {
        Ok(self
            .build_internal()
            .map_err(|e| BuilderError::from(e.to_string()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_without_company_applies_everywhere() {
        let entry = ConfigurationEntryBuilder::default()
            .uuid("thumbnail")
            .name("Thumbnail")
            .build()
            .unwrap();
        assert!(entry.applies_to(1));
        assert!(entry.applies_to(99));
        assert!(*entry.enabled());
    }

    #[test]
    fn entry_with_company_is_scoped() {
        let entry = ConfigurationEntryBuilder::default()
            .uuid("preview")
            .name("Preview")
            .company_id(Some(7))
            .build()
            .unwrap();
        assert!(entry.applies_to(7));
        assert!(!entry.applies_to(8));
    }
}
