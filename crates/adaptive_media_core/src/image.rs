//! Adaptive media image metadata records.

use adaptive_media_error::{AdaptiveMediaResult, BuilderError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing one generated variant of a file version.
///
/// At most one record exists per `(configuration_uuid, file_version_id)`.
/// Records are immutable once stored.
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
pub struct AdaptiveMediaImage {
    /// Generated identifier.
    image_id: i64,
    /// Company copied from the source file version.
    company_id: i64,
    /// Group copied from the source file version.
    group_id: i64,
    /// When the record was created.
    create_date: DateTime<Utc>,
    /// File version the variant was derived from.
    file_version_id: i64,
    /// MIME type of the variant bytes.
    mime_type: String,
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Size of the variant in bytes.
    size: u64,
    /// Configuration that produced the variant.
    configuration_uuid: String,
}

impl AdaptiveMediaImageBuilder {
    /// Build the AdaptiveMediaImage.
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing.
    pub fn build(&self) -> AdaptiveMediaResult<AdaptiveMediaImage> {
        Ok(self
            .build_internal()
            .map_err(|e| BuilderError::from(e.to_string()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_every_field() {
        let result = AdaptiveMediaImageBuilder::default()
            .image_id(1)
            .company_id(1)
            .build();
        assert!(result.is_err());
    }
}
