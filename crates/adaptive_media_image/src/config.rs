//! Registry configuration.
//!
//! Configuration is layered:
//! - Bundled defaults (include_str! from adaptive_media.toml)
//! - User overrides (~/.config/adaptive_media/adaptive_media.toml, then
//!   ./adaptive_media.toml)
//!
//! Later layers take precedence.

use adaptive_media_core::ConfigurationEntry;
use adaptive_media_error::{AdaptiveMediaError, AdaptiveMediaResult, ConfigError, ConfigErrorKind};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Byte storage settings.
///
/// ```toml
/// [storage]
/// base_path = "data/adaptive_media"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory of the filesystem backend
    pub base_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("data/adaptive_media"),
        }
    }
}

/// Top-level adaptive media configuration.
///
/// # Example
///
/// ```toml
/// [storage]
/// base_path = "/var/lib/adaptive_media"
///
/// [[configurations]]
/// uuid = "thumbnail"
/// name = "Thumbnail"
/// max_width = 300
/// max_height = 300
///
/// [[configurations]]
/// uuid = "banner"
/// name = "Banner"
/// company_id = 20
/// max_width = 1600
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct AdaptiveMediaConfig {
    /// Byte storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Configuration entries variants are generated for
    #[serde(default)]
    pub configurations: Vec<ConfigurationEntry>,
}

impl AdaptiveMediaConfig {
    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the schema.
    #[instrument(skip_all)]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> AdaptiveMediaResult<Self> {
        debug!(path = %path.as_ref().display(), "Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                AdaptiveMediaError::from(ConfigError::new(ConfigErrorKind::Read(format!(
                    "{}: {}",
                    path.as_ref().display(),
                    e
                ))))
            })?
            .try_deserialize()
            .map_err(|e| {
                AdaptiveMediaError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
            })
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if any present layer is malformed.
    #[instrument]
    pub fn load() -> AdaptiveMediaResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../adaptive_media.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/adaptive_media/adaptive_media.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("adaptive_media").required(false));

        builder
            .build()
            .map_err(|e| {
                AdaptiveMediaError::from(ConfigError::new(ConfigErrorKind::Build(e.to_string())))
            })?
            .try_deserialize()
            .map_err(|e| {
                AdaptiveMediaError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
            })
    }

    /// Look up a configured entry by uuid, ignoring company scoping.
    pub fn configuration(&self, uuid: &str) -> Option<&ConfigurationEntry> {
        self.configurations.iter().find(|entry| entry.uuid() == uuid)
    }
}
