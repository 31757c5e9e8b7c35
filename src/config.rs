//! Configuration file support for VizuMap.
//!
//! A session is described by a JSON file: where the embedding table lives,
//! which columns to use, how thumbnails are rendered and how much to log.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_THUMBNAIL_HEIGHT, DEFAULT_THUMBNAIL_WIDTH, JPEG_QUALITY,
};
use crate::hover::DisplayConfig;
use crate::table::ColumnBindings;
use crate::table::source::validate_fraction;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Thumbnail rendering section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    /// Default thumbnail width in pixels
    #[serde(default = "default_width_px")]
    pub width_px: u32,

    /// Default thumbnail height in pixels
    #[serde(default = "default_height_px")]
    pub height_px: u32,

    /// Show only this source channel, as grayscale
    #[serde(default)]
    pub channel: Option<usize>,

    /// Apply linear contrast gain
    #[serde(default)]
    pub enhance_contrast: bool,

    /// JPEG quality of encoded thumbnails (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_jpeg_quality() -> u8 {
    JPEG_QUALITY
}

fn default_width_px() -> u32 {
    DEFAULT_THUMBNAIL_WIDTH
}

fn default_height_px() -> u32 {
    DEFAULT_THUMBNAIL_HEIGHT
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width_px: default_width_px(),
            height_px: default_height_px(),
            channel: None,
            enhance_contrast: false,
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// CSV file with embeddings and metadata
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,

    /// Column bindings for the input file
    #[serde(default)]
    pub columns: ColumnBindings,

    /// Thumbnail rendering settings
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,

    /// Fraction of rows to plot, sampled uniformly at random
    #[serde(default = "default_display_fraction")]
    pub display_fraction: f64,

    /// Include the cluster label in tooltips
    #[serde(default = "default_show_cluster")]
    pub show_cluster: bool,

    /// Number of encoded thumbnails to keep for re-hovered points (0 disables)
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_input_file() -> PathBuf {
    PathBuf::from("data/embeddings.csv")
}

fn default_display_fraction() -> f64 {
    1.0
}

fn default_show_cluster() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl VizConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            input_file: default_input_file(),
            columns: ColumnBindings::default(),
            thumbnail: ThumbnailConfig::default(),
            display_fraction: default_display_fraction(),
            show_cluster: default_show_cluster(),
            cache_capacity: default_cache_capacity(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_fraction(self.display_fraction)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.thumbnail.width_px == 0 || self.thumbnail.height_px == 0 {
            return Err(ConfigError::Invalid(format!(
                "Thumbnail size must be positive, got {}x{}",
                self.thumbnail.width_px, self.thumbnail.height_px
            )));
        }

        if !(1..=100).contains(&self.thumbnail.jpeg_quality) {
            return Err(ConfigError::Invalid(format!(
                "JPEG quality must be in 1-100, got {}",
                self.thumbnail.jpeg_quality
            )));
        }

        Ok(())
    }

    /// Display settings for hover resolution.
    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            thumbnail_size: (self.thumbnail.width_px, self.thumbnail.height_px),
            channel: self.thumbnail.channel,
            enhance_contrast: self.thumbnail.enhance_contrast,
            show_cluster: self.show_cluster,
        }
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "vizumap-config.json"
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("vizumap").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("vizumap")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A value is out of its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut config = VizConfig::new();
        config.columns.display = vec!["name".into(), "species".into()];
        config.thumbnail.channel = Some(2);
        config.log_level = LogLevel::Debug;

        let json = config.to_json().unwrap();
        assert_eq!(VizConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = VizConfig::from_json(r#"{ "version": 1 }"#).unwrap();

        assert_eq!(config.thumbnail.width_px, DEFAULT_THUMBNAIL_WIDTH);
        assert_eq!(config.columns, ColumnBindings::default());
        assert_eq!(config.display_fraction, 1.0);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_display_launch_setting_is_ignored() {
        // Configs written for a browser front-end may still carry this key
        let config =
            VizConfig::from_json(r#"{ "version": 1, "open_browser": true }"#).unwrap();
        assert_eq!(config, VizConfig::new());
    }

    #[test]
    fn test_log_level_is_lowercase() {
        let config =
            VizConfig::from_json(r#"{ "version": 1, "log_level": "trace" }"#).unwrap();
        assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn test_rejects_newer_version() {
        let err = VizConfig::from_json(r#"{ "version": 99 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_rejects_bad_fraction_and_size() {
        let err = VizConfig::from_json(r#"{ "version": 1, "display_fraction": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = VizConfig::from_json(r#"{ "version": 1, "thumbnail": { "width_px": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_jpeg_quality() {
        let config = VizConfig::from_json(r#"{ "version": 1 }"#).unwrap();
        assert_eq!(config.thumbnail.jpeg_quality, JPEG_QUALITY);

        let config =
            VizConfig::from_json(r#"{ "version": 1, "thumbnail": { "jpeg_quality": 60 } }"#)
                .unwrap();
        assert_eq!(config.thumbnail.jpeg_quality, 60);

        let err = VizConfig::from_json(r#"{ "version": 1, "thumbnail": { "jpeg_quality": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_display_config() {
        let mut config = VizConfig::new();
        config.thumbnail.width_px = 200;
        config.thumbnail.height_px = 100;
        config.show_cluster = false;

        let display = config.display_config();
        assert_eq!(display.thumbnail_size, (200, 100));
        assert!(!display.show_cluster);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = VizConfig::new();
        config.save(&path).unwrap();
        assert_eq!(VizConfig::load(&path).unwrap(), config);
    }
}
