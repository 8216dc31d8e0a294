//! Configuration management.
//!
//! Configuration is read from a TOML file and then overridden by
//! `FEEDMUTE_*` environment variables:
//!
//! ```toml
//! storage_key = "mtd_ame_mute_catches"
//! pattern_cache_capacity = 256
//! preferences_path = "/var/lib/feedmute/preferences.json"
//!
//! [features]
//! catch_tracking = true
//!
//! [logging]
//! level = "feedmute=debug"
//! format = "json"
//! ```

mod features;

pub use features::FeatureFlags;

use crate::catches::DEFAULT_STORAGE_KEY;
use crate::filters::DEFAULT_PATTERN_CACHE_CAPACITY;
use crate::observability::{LogFormat, LoggingConfig};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the catch storage key.
pub const STORAGE_KEY_ENV: &str = "FEEDMUTE_STORAGE_KEY";
/// Environment variable overriding the pattern cache capacity.
pub const PATTERN_CACHE_CAPACITY_ENV: &str = "FEEDMUTE_PATTERN_CACHE_CAPACITY";
/// Environment variable overriding the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "FEEDMUTE_PREFERENCES_PATH";
/// Environment variable toggling catch tracking.
pub const CATCH_TRACKING_ENV: &str = "FEEDMUTE_CATCH_TRACKING";

/// Main configuration for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Preference key catches are persisted under.
    pub storage_key: String,
    /// Number of compiled filter patterns kept.
    pub pattern_cache_capacity: usize,
    /// Preferences file used by [`FilePreferences`](crate::storage::FilePreferences).
    pub preferences_path: PathBuf,
    /// Feature flags.
    pub features: FeatureFlags,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Catch storage key.
    pub storage_key: Option<String>,
    /// Pattern cache capacity.
    pub pattern_cache_capacity: Option<usize>,
    /// Preferences file path.
    pub preferences_path: Option<String>,
    /// Feature flags.
    pub features: Option<FeatureFlags>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
}

/// Logging section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLogging {
    /// Filter directive, e.g. `info` or `feedmute=debug`.
    pub level: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            pattern_cache_capacity: DEFAULT_PATTERN_CACHE_CAPACITY,
            preferences_path: default_preferences_path(),
            features: FeatureFlags::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path, then applies env overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: e.to_string(),
        })?;
        let mut config = Self::from_toml(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parses configuration from TOML text, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;
        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Uses `feedmute/config.toml` in the platform config dir, falling back to
    /// defaults if it is missing or invalid. Env overrides always apply.
    #[must_use]
    pub fn load_default() -> Self {
        let from_file = directories::ProjectDirs::from("", "", "feedmute")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .filter(|path| path.exists())
            .and_then(|path| match Self::load_from_file(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "ignoring invalid config file"
                    );
                    None
                },
            });

        from_file.unwrap_or_else(|| {
            let mut config = Self::default();
            config.apply_env_overrides();
            config
        })
    }

    /// Sets the storage key.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the feature flags.
    #[must_use]
    pub const fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Sets the preferences file path.
    #[must_use]
    pub fn with_preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = path.into();
        self
    }

    /// Converts a `ConfigFile` to `EngineConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(key) = file.storage_key {
            config.storage_key = key;
        }
        if let Some(capacity) = file.pattern_cache_capacity {
            config.pattern_cache_capacity = capacity;
        }
        if let Some(path) = file.preferences_path {
            config.preferences_path = PathBuf::from(path);
        }
        if let Some(features) = file.features {
            config.features = features;
        }
        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                config.logging.level = level;
            }
            if let Some(format) = logging.format {
                config.logging.format = LogFormat::parse(&format);
            }
        }

        config
    }

    /// Applies `FEEDMUTE_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = parse_string_env(STORAGE_KEY_ENV) {
            self.storage_key = key;
        }
        if let Some(capacity) =
            parse_string_env(PATTERN_CACHE_CAPACITY_ENV).and_then(|v| v.parse().ok())
        {
            self.pattern_cache_capacity = capacity;
        }
        if let Some(path) = parse_string_env(PREFERENCES_PATH_ENV) {
            self.preferences_path = PathBuf::from(path);
        }
        if let Some(enabled) = parse_bool_env(CATCH_TRACKING_ENV) {
            self.features.catch_tracking = enabled;
        }
        self.logging.apply_env_overrides();
    }
}

fn default_preferences_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "feedmute").map_or_else(
        || PathBuf::from(".feedmute").join("preferences.json"),
        |dirs| dirs.data_dir().join("preferences.json"),
    )
}

pub(crate) fn parse_bool_env(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        let value = value.to_lowercase();
        value == "true" || value == "1" || value == "yes"
    })
}

pub(crate) fn parse_string_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.storage_key, "mtd_ame_mute_catches");
        assert_eq!(config.pattern_cache_capacity, 256);
        assert!(config.features.catch_tracking);
        assert!(config.preferences_path.ends_with("preferences.json"));
    }

    #[test]
    fn test_from_toml() {
        let config = EngineConfig::from_toml(
            r#"
            storage_key = "custom_catches"
            pattern_cache_capacity = 8
            preferences_path = "/tmp/prefs.json"

            [features]
            catch_tracking = false

            [logging]
            level = "feedmute=trace"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage_key, "custom_catches");
        assert_eq!(config.pattern_cache_capacity, 8);
        assert_eq!(config.preferences_path, PathBuf::from("/tmp/prefs.json"));
        assert!(!config.features.catch_tracking);
        assert_eq!(config.logging.level, "feedmute=trace");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml("[features]\n").unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(config.features.catch_tracking);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            EngineConfig::from_toml("storage_key = [1"),
            Err(Error::OperationFailed { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(EngineConfig::load_from_file(Path::new("/nonexistent/feedmute.toml")).is_err());
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::new()
            .with_storage_key("k")
            .with_features(FeatureFlags::none())
            .with_preferences_path("p.json");
        assert_eq!(config.storage_key, "k");
        assert!(!config.features.catch_tracking);
        assert_eq!(config.preferences_path, PathBuf::from("p.json"));
    }
}
