//! Shared configuration types for respawn
//!
//! Serializable settings shared by the core library and any front end.
//! Persistence lives in respawn-core (`AppConfigExt`) since it needs
//! platform-specific paths.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Tracker settings.
///
/// Every field has a serde default so older config files keep loading after
/// new settings are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shared record file. Point every user at the same path to share kills.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Directory for point-in-time backups. Empty means the data file's directory.
    #[serde(default)]
    pub backup_dir: String,

    /// Seconds between board refreshes in watch mode.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

fn default_data_file() -> String {
    "boss_data.json".to_string()
}

fn default_refresh_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_data_file(default_data_file())
    }
}

impl AppConfig {
    /// Config with a specific record file and default everything else.
    pub fn with_data_file(data_file: String) -> Self {
        Self {
            data_file,
            backup_dir: String::new(),
            refresh_secs: default_refresh_secs(),
        }
    }

    /// Refresh period, never below one second.
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_secs.max(1))
    }
}
