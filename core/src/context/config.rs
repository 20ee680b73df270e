//! Application configuration
//!
//! Re-exports the shared `AppConfig` from respawn-types and adds
//! platform-specific defaults and persistence.

use std::path::PathBuf;

pub use respawn_types::AppConfig;

use super::ConfigError;

const APP_NAME: &str = "respawn";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Defaults
// ─────────────────────────────────────────────────────────────────────────────

fn default_data_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join(APP_NAME).join("boss_data.json"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "boss_data.json".to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence and path resolution
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn load_with_defaults() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
    fn data_path(&self) -> PathBuf;
    fn backup_path(&self) -> PathBuf;
}

impl AppConfigExt for AppConfig {
    /// Load the stored config, writing platform defaults on first run.
    /// A broken config file is logged and replaced by defaults in memory only.
    fn load() -> Self {
        if let Ok(path) = Self::config_path()
            && !path.exists()
        {
            let config = Self::load_with_defaults();
            if let Err(e) = config.save() {
                tracing::warn!(error = %e, "Could not write default configuration");
            }
            return config;
        }

        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "Configuration unreadable, using defaults");
            Self::load_with_defaults()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        confy::load(APP_NAME, CONFIG_NAME).map_err(ConfigError::Load)
    }

    /// Load with platform-specific defaults (used when no config file exists)
    fn load_with_defaults() -> Self {
        AppConfig::with_data_file(default_data_file())
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Locate)
    }

    fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_file)
    }

    /// Backup directory, defaulting to the record file's directory
    fn backup_path(&self) -> PathBuf {
        if !self.backup_dir.is_empty() {
            return PathBuf::from(&self.backup_dir);
        }
        self.data_path()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
