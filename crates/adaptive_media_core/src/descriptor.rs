//! Caller-supplied description of a generated variant.

use adaptive_media_error::{AdaptiveMediaResult, BuilderError};
use serde::{Deserialize, Serialize};

/// Attributes of a variant the caller has already generated.
///
/// # Examples
///
/// ```
/// use adaptive_media_core::VariantDescriptorBuilder;
///
/// let descriptor = VariantDescriptorBuilder::default()
///     .mime_type("image/jpeg")
///     .width(320u32)
///     .height(200u32)
///     .size(18_432u64)
///     .build()
///     .unwrap();
/// assert_eq!(*descriptor.width(), 320);
/// ```
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
pub struct VariantDescriptor {
    /// MIME type of the variant bytes.
    mime_type: String,
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Size in bytes.
    size: u64,
}

impl VariantDescriptorBuilder {
    /// Build the VariantDescriptor.
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing.
    pub fn build(&self) -> AdaptiveMediaResult<VariantDescriptor> {
        Ok(self
            .build_internal()
            .map_err(|e| BuilderError::from(e.to_string()))?)
    }
}
