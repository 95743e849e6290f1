//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sync::SyncTarget;

use super::cli::Cli;
use super::defaults;
use super::error::{field, ConfigError};
use super::toml::{default_config_template, TomlConfig};

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::load`] to read the file named by the CLI, or
/// [`ValidatedConfig::from_raw`] to validate an already-parsed
/// [`TomlConfig`]. Both return errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Whether to detect the external IP via ifconfig.net.
    pub detect_ip: bool,

    /// Static external address. Always present in fixed-IP mode;
    /// optional fallback in detect-IP mode.
    pub external_ip: Option<String>,

    /// Path to the log file.
    pub log_path: PathBuf,

    /// Servers to keep registered, in file order.
    pub servers: Vec<SyncTarget>,

    /// API listen host. Empty means all interfaces.
    pub api_host: String,

    /// API listen port.
    pub api_port: u16,

    /// Interval between periodic syncs.
    pub sync_interval: Duration,

    /// Maximum random start delay per sync attempt.
    pub jitter_max: Duration,

    /// Interval between IP detection probes.
    pub detect_interval: Duration,

    /// Verbose logging enabled.
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let external_ip = self.external_ip.as_deref().unwrap_or("none");
        write!(
            f,
            "Config {{ detect_ip: {}, external_ip: {}, servers: {}, api: {}, \
             sync_interval: {}s, jitter_max: {}s, detect_interval: {}s, log: {} }}",
            self.detect_ip,
            external_ip,
            self.servers.len(),
            self.api_addr(),
            self.sync_interval.as_secs(),
            self.jitter_max.as_secs(),
            self.detect_interval.as_secs(),
            self.log_path.display(),
        )
    }
}

impl ValidatedConfig {
    /// Loads and validates the configuration file named by the CLI.
    ///
    /// # Errors
    ///
    /// Returns an error if `--config` is missing, or the file cannot be
    /// read, parsed, or validated.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli.config.as_ref().ok_or_else(|| {
            ConfigError::missing(field::CONFIG, "Pass --config <path>.")
        })?;
        let toml = TomlConfig::load(path)?;
        Self::from_raw(cli, &toml)
    }

    /// Validates an already-parsed configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_path` is missing
    /// - `external_ip` is missing while `detect_ip` is false
    /// - the servers list is empty, has incomplete entries, or repeats a port
    /// - the API port or an interval is zero
    pub fn from_raw(cli: &Cli, toml: &TomlConfig) -> Result<Self, ConfigError> {
        let log_path = toml.log_path.clone().ok_or_else(|| {
            ConfigError::missing(field::LOG_PATH, "Set log_path in the config file.")
        })?;

        let external_ip = toml
            .external_ip
            .clone()
            .filter(|address| !address.is_empty());
        if !toml.detect_ip && external_ip.is_none() {
            return Err(ConfigError::missing(
                field::EXTERNAL_IP,
                "Set external_ip, or enable detect_ip.",
            ));
        }

        let servers = Self::resolve_servers(toml)?;

        let (api_host, api_port) = Self::resolve_api(toml)?;

        let sync_interval = Self::resolve_interval(
            toml.sync.interval,
            defaults::sync_interval(),
            "sync.interval",
        )?;
        let detect_interval = Self::resolve_interval(
            toml.sync.detect_interval,
            defaults::detect_interval(),
            "sync.detect_interval",
        )?;
        // Zero is meaningful here: it disables jitter.
        let jitter_max = toml
            .sync
            .jitter_max
            .map_or(defaults::sync_jitter_max(), Duration::from_secs);

        Ok(Self {
            detect_ip: toml.detect_ip,
            external_ip,
            log_path,
            servers,
            api_host,
            api_port,
            sync_interval,
            jitter_max,
            detect_interval,
            verbose: cli.verbose,
        })
    }

    fn resolve_servers(toml: &TomlConfig) -> Result<Vec<SyncTarget>, ConfigError> {
        if toml.servers.is_empty() {
            return Err(ConfigError::NoServers);
        }

        let mut seen = BTreeSet::new();
        let mut servers = Vec::with_capacity(toml.servers.len());
        for (index, entry) in toml.servers.iter().enumerate() {
            let name = entry
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| ConfigError::InvalidServer {
                    index,
                    reason: "name is required".to_string(),
                })?;
            let port = entry.port.ok_or_else(|| ConfigError::InvalidServer {
                index,
                reason: "port is required".to_string(),
            })?;
            if port == 0 {
                return Err(ConfigError::InvalidServer {
                    index,
                    reason: "port must be 1-65535".to_string(),
                });
            }
            if !seen.insert(port) {
                return Err(ConfigError::DuplicatePort(port));
            }
            servers.push(SyncTarget::new(name, port));
        }
        Ok(servers)
    }

    fn resolve_api(toml: &TomlConfig) -> Result<(String, u16), ConfigError> {
        let Some(api) = &toml.api else {
            return Ok((String::new(), defaults::API_PORT));
        };
        let host = api.host.clone().unwrap_or_default();
        let port = api.port.unwrap_or(defaults::API_PORT);
        if port == 0 {
            return Err(ConfigError::InvalidApiPort(port));
        }
        Ok((host, port))
    }

    fn resolve_interval(
        configured: Option<u64>,
        default: Duration,
        name: &'static str,
    ) -> Result<Duration, ConfigError> {
        match configured {
            None => Ok(default),
            Some(0) => Err(ConfigError::InvalidDuration {
                field: name,
                reason: "must be greater than zero".to_string(),
            }),
            Some(secs) => Ok(Duration::from_secs(secs)),
        }
    }

    /// Returns the configured query ports, in file order.
    #[must_use]
    pub fn ports(&self) -> Vec<u16> {
        self.servers.iter().map(|s| s.port).collect()
    }

    /// Returns the API listen address in `host:port` form.
    ///
    /// An empty host maps to all interfaces.
    #[must_use]
    pub fn api_addr(&self) -> String {
        let host = if self.api_host.is_empty() {
            "0.0.0.0"
        } else {
            &self.api_host
        };
        format!("{host}:{}", self.api_port)
    }
}

/// Writes the default configuration template to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, default_config_template()).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
