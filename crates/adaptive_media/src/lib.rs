//! Adaptive media - registry of generated image variants.
//!
//! Keeps exactly one metadata record per (configuration, file version)
//! pair, delegates the variant bytes to a storage backend, and reports how
//! many of the expected variants exist for a company.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use adaptive_media::{AdaptiveMediaConfig, StandaloneRegistry, VariantDescriptorBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     adaptive_media::init_observability()?;
//!
//!     let registry = StandaloneRegistry::open(&AdaptiveMediaConfig::load()?)?;
//!     registry.file_versions().insert(file_version).await;
//!
//!     let descriptor = VariantDescriptorBuilder::default()
//!         .mime_type("image/jpeg")
//!         .width(300u32)
//!         .height(200u32)
//!         .size(4096u64)
//!         .build()?;
//!     let image = registry
//!         .service()
//!         .add_variant("thumbnail", 1, descriptor, Box::new(bytes))
//!         .await?;
//!     println!("Stored variant {}", image.image_id());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `postgres` - PostgreSQL record store
//!
//! # Architecture
//!
//! - `adaptive_media_error` - Error types
//! - `adaptive_media_core` - Data types
//! - `adaptive_media_interface` - Collaborator traits, service slots, counters
//! - `adaptive_media_storage` - Filesystem byte storage
//! - `adaptive_media_database` - Record stores
//! - `adaptive_media_image` - The registry service and its configuration
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observability;
mod standalone;

pub use adaptive_media_core::*;
pub use adaptive_media_database::*;
pub use adaptive_media_error::*;
pub use adaptive_media_image::*;
pub use adaptive_media_interface::*;
pub use adaptive_media_storage::FileSystemImageStorage;

pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};
pub use standalone::{FILE_VERSION_COUNTER_KEY, StandaloneRegistry};
