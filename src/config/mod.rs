//! Configuration layer for dzsa-sync.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! The CLI stays deliberately small: everything that describes the
//! deployment (servers, addresses, intervals) lives in the config file
//! passed via `--config`; the command line only selects the file and the
//! log verbosity.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::{field, ConfigError};
pub use toml::{default_config_template, ApiSection, ServerSection, SyncSection, TomlConfig};
pub use validated::{write_default_config, ValidatedConfig};
