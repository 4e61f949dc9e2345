//! Registry error types.

/// Failure kinds surfaced by the adaptive media image registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ImageErrorKind {
    /// A variant already exists for this configuration and file version
    #[display(
        "Duplicate variant for configuration '{}' and file version {}",
        configuration_uuid,
        file_version_id
    )]
    DuplicateVariant {
        /// Configuration identifier of the rejected variant
        configuration_uuid: String,
        /// File version identifier of the rejected variant
        file_version_id: i64,
    },

    /// The source file version does not exist
    #[display("File version {} not found", _0)]
    SourceNotFound(i64),

    /// The configuration resolver has no entry for this company
    #[display(
        "Configuration '{}' not found for company {}",
        configuration_uuid,
        company_id
    )]
    ConfigurationNotFound {
        /// Company the configuration was resolved for
        company_id: i64,
        /// Configuration identifier that did not resolve
        configuration_uuid: String,
    },

    /// Byte persistence or removal failed
    #[display("Storage failure: {}", _0)]
    StorageFailure(String),

    /// A required collaborator is not registered at call time
    #[display("Dependency unavailable: {}", _0)]
    DependencyUnavailable(String),

    /// A caller-supplied argument violates a precondition
    #[display("Invalid argument: {}", _0)]
    InvalidArgument(String),
}

impl ImageErrorKind {
    /// Check if the failure may be transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageFailure(_))
    }
}

/// Registry error with location tracking.
///
/// # Examples
///
/// ```
/// use adaptive_media_error::{ImageError, ImageErrorKind};
///
/// let err = ImageError::new(ImageErrorKind::StorageFailure("disk full".to_string()));
/// assert!(err.kind.is_retryable());
/// assert!(format!("{}", err).contains("disk full"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Error: {} at line {} in {}", kind, line, file)]
pub struct ImageError {
    /// The kind of error that occurred
    pub kind: ImageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ImageError {
    /// Create a new registry error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_failures_are_retryable() {
        assert!(ImageErrorKind::StorageFailure("io".into()).is_retryable());
        assert!(!ImageErrorKind::SourceNotFound(1).is_retryable());
        assert!(!ImageErrorKind::DependencyUnavailable("storage".into()).is_retryable());
        assert!(
            !ImageErrorKind::DuplicateVariant {
                configuration_uuid: "small".into(),
                file_version_id: 1,
            }
            .is_retryable()
        );
    }
}
