//! Source file versions.

use adaptive_media_error::{AdaptiveMediaResult, BuilderError};
use serde::{Deserialize, Serialize};

/// A version of an original file held by the document store.
///
/// Variants copy their tenant scoping (`company_id`, `group_id`) from here.
///
/// # Examples
///
/// ```
/// use adaptive_media_core::FileVersionBuilder;
///
/// let version = FileVersionBuilder::default()
///     .file_version_id(101)
///     .company_id(1)
///     .group_id(20)
///     .mime_type("image/png")
///     .title("logo.png")
///     .build()
///     .unwrap();
/// assert_eq!(*version.company_id(), 1);
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
pub struct FileVersion {
    /// Identifier of this file version.
    file_version_id: i64,
    /// Owning company (tenant).
    company_id: i64,
    /// Owning group (collection) within the company.
    group_id: i64,
    /// MIME type of the original content.
    mime_type: String,
    /// Display title of the file.
    #[builder(default)]
    title: String,
}

impl FileVersionBuilder {
    /// Build the FileVersion.
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing.
    pub fn build(&self) -> AdaptiveMediaResult<FileVersion> {
        Ok(self
            .build_internal()
            .map_err(|e| BuilderError::from(e.to_string()))?)
    }
}
