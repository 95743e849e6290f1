//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations. All of
/// these are fatal at startup; nothing here is recoverable at runtime.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// The servers list is empty.
    #[error("servers must not be empty")]
    NoServers,

    /// A server entry failed validation.
    #[error("servers[{index}]: {reason}")]
    InvalidServer {
        /// Index of the entry in the config file
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Two server entries share a query port.
    #[error("duplicate port: {0}")]
    DuplicatePort(u16),

    /// The API listen port is invalid.
    #[error("api.port must be 1-65535, got {0}")]
    InvalidApiPort(u16),

    /// An interval value is invalid (zero).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names for `MissingRequired` errors.
pub mod field {
    /// The `--config` CLI flag.
    pub const CONFIG: &str = "config";
    /// The log file path.
    pub const LOG_PATH: &str = "log_path";
    /// The static external address.
    pub const EXTERNAL_IP: &str = "external_ip";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
