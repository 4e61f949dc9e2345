//! Byte storage backends for adaptive media image variants.
//!
//! Variant metadata lives in a record store; this crate only persists the
//! bytes, keyed by source file version and configuration.
//!
//! # Example
//!
//! ```rust
//! use adaptive_media_core::{ConfigurationEntryBuilder, FileVersionBuilder};
//! use adaptive_media_interface::ImageStorage;
//! use adaptive_media_storage::FileSystemImageStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemImageStorage::new("/tmp/adaptive-media")?;
//! let version = FileVersionBuilder::default()
//!     .file_version_id(101)
//!     .company_id(1)
//!     .group_id(20)
//!     .mime_type("image/png")
//!     .build()?;
//! let entry = ConfigurationEntryBuilder::default()
//!     .uuid("thumbnail")
//!     .name("Thumbnail")
//!     .build()?;
//!
//! let stored = storage
//!     .save(&version, &entry, Box::new(&b"png bytes"[..]))
//!     .await?;
//! assert_eq!(stored.size_bytes, 9);
//! assert!(storage.has_content(&version, &entry).await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;

pub use adaptive_media_error::{StorageError, StorageErrorKind};
pub use filesystem::FileSystemImageStorage;
