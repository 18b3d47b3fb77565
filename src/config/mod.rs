//! Configuration module for recipebox
//!
//! Manages where the recipe backend lives and how the client behaves.
//! Configuration is stored in the user's config directory
//! (`~/.config/recipebox/config.toml` on Linux) and every key can be
//! overridden with a `RECIPEBOX_<KEY>` environment variable.

mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, Environment, File, FileFormat};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "RECIPEBOX";

/// Keys accepted by `config get` / `config set`
pub const KEYS: [&str; 6] = [
    "api_url",
    "request_timeout_secs",
    "search_debounce_ms",
    "featured_limit",
    "quiet",
    "share_subject",
];

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RecipeBoxConfig {
    /// Root of the REST backend; recipes live under `{api_url}/recipes`
    pub api_url: String,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Quiet period before typed search input is committed
    pub search_debounce_ms: u64,

    /// Number of recipes in the featured view
    pub featured_limit: usize,

    /// Suppress informational output by default
    pub quiet: bool,

    /// Subject line of share-by-email links
    pub share_subject: String,
}

impl Default for RecipeBoxConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001".to_string(),
            request_timeout_secs: 30,
            search_debounce_ms: 500,
            featured_limit: 3,
            quiet: false,
            share_subject: "Recipes".to_string(),
        }
    }
}

impl RecipeBoxConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("recipebox").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file plus environment overrides
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an override cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        if Self::config_path()?.exists() {
            Self::load()
        } else {
            first_time_setup()
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Current value of a key, as text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "api_url" => self.api_url.clone(),
            "request_timeout_secs" => self.request_timeout_secs.to_string(),
            "search_debounce_ms" => self.search_debounce_ms.to_string(),
            "featured_limit" => self.featured_limit.to_string(),
            "quiet" => self.quiet.to_string(),
            "share_subject" => self.share_subject.clone(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Parse and assign a key; does not save
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.clone();
        match key {
            "api_url" => next.api_url = value.trim_end_matches('/').to_string(),
            "request_timeout_secs" => next.request_timeout_secs = parse_value(key, value)?,
            "search_debounce_ms" => next.search_debounce_ms = parse_value(key, value)?,
            "featured_limit" => next.featured_limit = parse_value(key, value)?,
            "quiet" => next.quiet = parse_value(key, value)?,
            "share_subject" => next.share_subject = value.to_string(),
            _ => return Err(unknown_key(key)),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Check values that deserialize fine but cannot be used
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| ConfigError::Message(format!("Invalid api_url '{}': {e}", self.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Message(format!(
                "Invalid api_url '{}': expected an http or https address",
                self.api_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.featured_limit == 0 {
            return Err(ConfigError::Message(
                "featured_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::Message(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        KEYS.join(", ")
    ))
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Message(format!("Invalid value for {key}: '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RecipeBoxConfig::default();
        assert_eq!(config.api_url, "http://localhost:3001");
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.featured_limit, 3);
        assert!(!config.quiet);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = RecipeBoxConfig::default();
        config.api_url = "https://recipes.example.com/api".to_string();
        config.featured_limit = 5;
        config.save_to(&path).unwrap();

        let loaded = RecipeBoxConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = RecipeBoxConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.share_subject, "Recipes");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let loaded = RecipeBoxConfig::load_from(&path).unwrap();
        assert!(loaded.quiet);
        assert_eq!(loaded.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_url_in_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"localhost\"\n").unwrap();

        assert!(RecipeBoxConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_get_and_set() {
        let mut config = RecipeBoxConfig::default();
        config.set("featured_limit", "6").unwrap();
        config.set("api_url", "http://127.0.0.1:4000/").unwrap();
        assert_eq!(config.get("featured_limit").unwrap(), "6");
        assert_eq!(config.get("api_url").unwrap(), "http://127.0.0.1:4000");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = RecipeBoxConfig::default();
        assert!(config.set("quiet", "maybe").is_err());
        assert!(config.set("featured_limit", "0").is_err());
        assert!(config.set("api_url", "ftp://x").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, RecipeBoxConfig::default());
    }

    #[test]
    fn test_get_unknown_key_lists_keys() {
        let err = RecipeBoxConfig::default().get("nope").unwrap_err();
        assert!(err.to_string().contains("api_url"));
    }
}
