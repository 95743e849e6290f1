//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde. Fields
//! are optional where validation decides whether they are required, so
//! that error messages come from [`ValidatedConfig`](super::ValidatedConfig)
//! rather than the deserializer.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from the TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// When true, detect the external IP via ifconfig.net instead of
    /// using `external_ip`.
    #[serde(default)]
    pub detect_ip: bool,

    /// Static external address. Required when `detect_ip` is false;
    /// used as a fallback while detection has not succeeded yet.
    pub external_ip: Option<String>,

    /// Path to the log file (JSON, rotated daily).
    pub log_path: Option<PathBuf>,

    /// Servers to keep registered with the launcher directory.
    #[serde(default)]
    pub servers: Vec<ServerSection>,

    /// HTTP API listen configuration.
    pub api: Option<ApiSection>,

    /// Sync cadence tuning.
    #[serde(default)]
    pub sync: SyncSection,
}

/// One server entry.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Label for the server (metrics gauge, logs).
    pub name: Option<String>,

    /// Query port (1-65535), unique across entries.
    pub port: Option<u16>,
}

/// HTTP API configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Listen address. Empty or absent means all interfaces.
    pub host: Option<String>,

    /// Listen port. Defaults to 8888.
    pub port: Option<u16>,
}

/// Sync cadence configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncSection {
    /// Seconds between periodic syncs (default: 3600).
    pub interval: Option<u64>,

    /// Maximum random start delay per sync attempt in seconds
    /// (default: 20; 0 disables jitter).
    pub jitter_max: Option<u64>,

    /// Seconds between IP detection probes in detect-IP mode
    /// (default: 600).
    pub detect_interval: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# dzsa-sync Configuration File

# Detect the external IP via https://ifconfig.net/json and re-sync all
# servers immediately when it changes.
detect_ip = false

# Static external address. Required when detect_ip = false; otherwise
# used as a fallback until the first detection probe succeeds.
external_ip = "203.0.113.7"

# Path to the log file (JSON lines, rotated daily).
log_path = "/var/log/dzsa-sync/dzsa-sync.log"

# One [[servers]] block per DayZ server to keep registered.
[[servers]]
name = "chernarus-1"
port = 2302

# [[servers]]
# name = "livonia-1"
# port = 2402

# HTTP API for /metrics and /api/v1/servers.
[api]
# host = ""        # empty = all interfaces
# port = 8888

[sync]
# Seconds between periodic syncs (default: 3600)
# interval = 3600

# Maximum random start delay per sync attempt, seconds (0 disables)
# jitter_max = 20

# Seconds between IP detection probes in detect-IP mode
# detect_interval = 600
"#
    .to_string()
}
