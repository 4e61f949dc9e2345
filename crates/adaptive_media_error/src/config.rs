//! Configuration error types.

/// Stages at which loading configuration can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConfigErrorKind {
    /// An explicitly named configuration file could not be read
    #[display("Failed to read configuration from {}", _0)]
    Read(String),
    /// The layered sources could not be merged
    #[display("Failed to build configuration: {}", _0)]
    Build(String),
    /// The merged configuration does not match the expected schema
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use adaptive_media_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Parse("missing field `uuid`".to_string()));
/// assert!(format!("{}", err).contains("missing field"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
