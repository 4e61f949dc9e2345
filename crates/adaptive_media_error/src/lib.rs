//! Error types for the adaptive media image registry.
//!
//! This crate provides the foundation error types used throughout the workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use adaptive_media_error::{AdaptiveMediaResult, ImageError, ImageErrorKind};
//!
//! fn lookup(file_version_id: i64) -> AdaptiveMediaResult<String> {
//!     Err(ImageError::new(ImageErrorKind::SourceNotFound(file_version_id)))?
//! }
//!
//! let err = lookup(42).unwrap_err();
//! assert!(matches!(err.image_kind(), Some(ImageErrorKind::SourceNotFound(42))));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod database;
mod error;
mod image;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{AdaptiveMediaError, AdaptiveMediaErrorKind, AdaptiveMediaResult};
pub use image::{ImageError, ImageErrorKind};
pub use storage::{StorageError, StorageErrorKind};
