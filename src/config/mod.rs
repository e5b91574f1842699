// SPDX-License-Identifier: MPL-2.0
//! This module handles the engine's configuration, loading and saving
//! queue preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[queue]` - Capacity and default auto-dismiss delay
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()`/`save_with_override()`
//! 3. Set `TOAST_QUEUE_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toast_queue::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.queue.max_active = Some(3);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::notifications::{DefaultDuration, MaxActive};
use crate::error::{Error, Result};
use crate::notifications::QueueSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ToastQueue";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TOAST_QUEUE_CONFIG_DIR";

/// Warning key returned by [`load`] when an existing file cannot be used.
pub const CONFIG_LOAD_WARNING: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// Notification queue settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueConfig {
    /// Maximum number of notifications active at once.
    #[serde(default = "default_max_active", skip_serializing_if = "Option::is_none")]
    pub max_active: Option<usize>,

    /// Auto-dismiss delay for requests without an explicit duration.
    #[serde(
        default = "default_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_duration_ms: Option<u64>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_active: default_max_active(),
            default_duration_ms: default_duration_ms(),
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_max_active() -> Option<usize> {
    Some(DEFAULT_MAX_ACTIVE)
}

#[allow(clippy::unnecessary_wraps)]
fn default_duration_ms() -> Option<u64> {
    Some(DEFAULT_DURATION_MS)
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub queue: QueueConfig,
}

impl Config {
    /// Resolves the raw file values into validated engine settings.
    ///
    /// Missing values fall back to defaults; out-of-range values are clamped.
    #[must_use]
    pub fn queue_settings(&self) -> QueueSettings {
        QueueSettings {
            max_active: self
                .queue
                .max_active
                .map(MaxActive::new)
                .unwrap_or_default(),
            default_duration: self
                .queue
                .default_duration_ms
                .map(DefaultDuration::from_millis)
                .unwrap_or_default(),
        }
    }
}

// =============================================================================
// Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    let dir = base_dir
        .or_else(|| std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from))
        .or_else(|| dirs::config_dir().map(|path| path.join(APP_NAME)))?;
    Some(dir.join(CONFIG_FILE))
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Never fails: an unreadable or invalid file yields the defaults plus a
/// warning key the caller may surface to the user.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "Falling back to default config");
                    return (Config::default(), Some(CONFIG_LOAD_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            queue: QueueConfig {
                max_active: Some(3),
                default_duration_ms: Some(4500),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_falls_back_with_warning_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[queue]\nmax_active = \"many\"")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(CONFIG_LOAD_WARNING));
    }

    #[test]
    fn load_with_override_missing_file_returns_defaults_silently() {
        let temp_dir = tempdir().expect("failed to create temp dir");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_with_override_then_load_with_override() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut config = Config::default();
        config.queue.max_active = Some(8);

        save_with_override(&config, Some(temp_dir.path().to_path_buf()))
            .expect("save should succeed");
        let (loaded, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert!(warning.is_none());
        assert_eq!(loaded.queue.max_active, Some(8));
    }

    #[test]
    fn missing_section_uses_defaults() {
        let config: Config = toml::from_str("").expect("empty config should parse");
        assert_eq!(config.queue.max_active, Some(DEFAULT_MAX_ACTIVE));
        assert_eq!(config.queue.default_duration_ms, Some(DEFAULT_DURATION_MS));
    }

    #[test]
    fn queue_settings_clamps_out_of_range_values() {
        let config = Config {
            queue: QueueConfig {
                max_active: Some(0),
                default_duration_ms: Some(MAX_DURATION_MS * 10),
            },
        };

        let settings = config.queue_settings();

        assert_eq!(settings.max_active.value(), MIN_MAX_ACTIVE);
        assert_eq!(settings.default_duration.as_millis(), MAX_DURATION_MS);
    }

    #[test]
    fn queue_settings_none_values_use_defaults() {
        let config = Config {
            queue: QueueConfig {
                max_active: None,
                default_duration_ms: None,
            },
        };

        let settings = config.queue_settings();

        assert_eq!(settings.max_active.value(), DEFAULT_MAX_ACTIVE);
        assert_eq!(
            settings.default_duration.as_duration(),
            Duration::from_millis(DEFAULT_DURATION_MS)
        );
    }
}
