//! Core data types for the adaptive media image registry.
//!
//! These are the values that flow between the registry and its collaborators:
//! the source [`FileVersion`] a variant is derived from, the caller's
//! [`VariantDescriptor`], the [`ConfigurationEntry`] describing how it was
//! generated, the [`AdaptiveMediaImage`] metadata record, and the
//! [`StoredImage`] receipt a storage backend hands back.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod configuration;
mod descriptor;
mod file_version;
mod image;
mod mime;
mod stored;

pub use configuration::{ConfigurationEntry, ConfigurationEntryBuilder};
pub use descriptor::{VariantDescriptor, VariantDescriptorBuilder};
pub use file_version::{FileVersion, FileVersionBuilder};
pub use image::{AdaptiveMediaImage, AdaptiveMediaImageBuilder};
pub use mime::{SUPPORTED_IMAGE_MIME_TYPES, is_supported_image_mime_type};
pub use stored::StoredImage;
