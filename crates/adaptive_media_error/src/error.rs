//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, DatabaseError, ImageError, ImageErrorKind, StorageError};

/// Every error the workspace can surface, discriminated by subsystem.
///
/// # Examples
///
/// ```
/// use adaptive_media_error::{AdaptiveMediaError, ConfigError, ConfigErrorKind};
///
/// let err: AdaptiveMediaError =
///     ConfigError::new(ConfigErrorKind::Parse("missing base_path".to_string())).into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AdaptiveMediaErrorKind {
    /// Registry operation error
    #[from(ImageError)]
    Image(ImageError),
    /// Byte storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Record store error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Adaptive media error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Adaptive Media Error: {}", _0)]
pub struct AdaptiveMediaError(Box<AdaptiveMediaErrorKind>);

impl AdaptiveMediaError {
    /// Create a new error from a kind.
    pub fn new(kind: AdaptiveMediaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AdaptiveMediaErrorKind {
        &self.0
    }

    /// Registry error kind, if this is a registry error.
    pub fn image_kind(&self) -> Option<&ImageErrorKind> {
        match self.kind() {
            AdaptiveMediaErrorKind::Image(e) => Some(&e.kind),
            _ => None,
        }
    }

    /// Whether the caller may reasonably retry the failed operation.
    ///
    /// Only registry storage failures are classed as transient.
    pub fn is_retryable(&self) -> bool {
        self.image_kind().is_some_and(ImageErrorKind::is_retryable)
    }
}

// Generic From implementation for any type that converts to AdaptiveMediaErrorKind
impl<T> From<T> for AdaptiveMediaError
where
    T: Into<AdaptiveMediaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for adaptive media operations.
pub type AdaptiveMediaResult<T> = std::result::Result<T, AdaptiveMediaError>;
