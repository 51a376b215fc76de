//! Configuration file parser for ~/.config/campusfeed/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted but logged as warnings since they are usually typos.
use crate::engine::EngineSettings;
use crate::feed::{CategoryFilter, ParseCategoryError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// A value parsed but is outside the range the engine accepts.
    #[error("Invalid config value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl From<ParseCategoryError> for ConfigError {
    fn from(e: ParseCategoryError) -> Self {
        ConfigError::Invalid {
            key: "initial_category",
            reason: e.to_string(),
        }
    }
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Milliseconds between generated items.
    pub tick_interval_ms: u64,

    /// Simulated detail fetch latency in milliseconds.
    pub detail_delay_ms: u64,

    /// Maximum number of items kept in the feed (0 = unlimited).
    pub max_items: usize,

    /// Category selected at startup: All, Tech, Campus or Sports.
    pub initial_category: String,

    /// Keep numbering items from one counter when the category changes.
    pub continuous_ids: bool,

    /// Fixed seed for category selection (unset = random each run).
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_interval_ms: 2000,
            detail_delay_ms: 1500,
            max_items: 0,
            initial_category: "All".to_string(),
            continuous_ids: true,
            seed: None,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 7] = [
        "theme",
        "tick_interval_ms",
        "detail_delay_ms",
        "max_items",
        "initial_category",
        "continuous_ids",
        "seed",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Out-of-range values → `Err(ConfigError::Invalid)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading so a huge file is never pulled into memory.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            theme = %config.theme,
            tick_interval_ms = config.tick_interval_ms,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "tick_interval_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        self.category()?;
        Ok(())
    }

    /// The configured initial category.
    pub fn category(&self) -> Result<CategoryFilter, ConfigError> {
        Ok(self.initial_category.parse::<CategoryFilter>()?)
    }

    /// Convert to the engine's settings.
    pub fn engine_settings(&self) -> Result<EngineSettings, ConfigError> {
        Ok(EngineSettings {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            detail_delay: Duration::from_millis(self.detail_delay_ms),
            max_items: self.max_items,
            initial_category: self.category()?,
            continuous_ids: self.continuous_ids,
            seed: self.seed,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("campusfeed_config_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.tick_interval_ms, 2000);
        assert_eq!(config.detail_delay_ms, 1500);
        assert_eq!(config.max_items, 0);
        assert_eq!(config.initial_category, "All");
        assert!(config.continuous_ids);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_default_engine_settings_match_engine_defaults() {
        let settings = Config::default().engine_settings().unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/campusfeed_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_file_returns_default() {
        let path = write_config("empty", "");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
        cleanup(&path);
    }

    #[test]
    fn test_whitespace_only_returns_default() {
        assert_eq!(Config::from_toml("  \n \n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let path = write_config("partial", "tick_interval_ms = 500\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.detail_delay_ms, 1500);
        assert_eq!(config.theme, "dark");
        cleanup(&path);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
theme = "light"
tick_interval_ms = 1000
detail_delay_ms = 250
max_items = 50
initial_category = "sports"
continuous_ids = false
seed = 99
"#;
        let config = Config::from_toml(content).unwrap();
        let settings = config.engine_settings().unwrap();

        assert_eq!(config.theme, "light");
        assert_eq!(settings.tick_interval, Duration::from_millis(1000));
        assert_eq!(settings.detail_delay, Duration::from_millis(250));
        assert_eq!(settings.max_items, 50);
        assert_eq!(settings.initial_category, CategoryFilter::Sports);
        assert!(!settings.continuous_ids);
        assert_eq!(settings.seed, Some(99));
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::from_toml("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let err = Config::from_toml("tick_interval_ms = \"fast\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = Config::from_toml("tick_interval_ms = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "tick_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_detail_delay_allowed() {
        let config = Config::from_toml("detail_delay_ms = 0\n").unwrap();
        assert_eq!(
            config.engine_settings().unwrap().detail_delay,
            Duration::ZERO
        );
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = Config::from_toml("initial_category = \"weather\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "initial_category",
                ..
            }
        ));
        assert!(err.to_string().contains("weather"));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let content = r#"
theme = "dark"
refresh_interval_minutes = 30
"#;
        let config = Config::from_toml(content).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = write_config("too_large", &"a".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));
        cleanup(&path);
    }
}
