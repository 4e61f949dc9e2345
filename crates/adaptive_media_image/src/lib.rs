//! Adaptive media image registry.
//!
//! [`AdaptiveMediaImageService`] records one metadata entry per generated
//! variant of a file version, hands the variant bytes to an
//! [`ImageStorage`](adaptive_media_interface::ImageStorage) backend, and
//! reports how far variant generation has progressed for a company.
//!
//! The crate also ships the collaborators a standalone deployment needs:
//! - [`AdaptiveMediaConfig`]: layered TOML configuration
//! - [`StaticConfigurationResolver`]: resolver over configured entries
//! - [`SequentialIdGenerator`]: process-local identifiers
//! - [`InMemoryFileVersionSource`]: file versions held in memory, doubling as
//!   an image counter

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod id;
mod resolver;
mod service;
mod source;

pub use config::{AdaptiveMediaConfig, StorageConfig};
pub use id::SequentialIdGenerator;
pub use resolver::StaticConfigurationResolver;
pub use service::{AdaptiveMediaImageService, AdaptiveMediaImageServiceBuilder};
pub use source::InMemoryFileVersionSource;
