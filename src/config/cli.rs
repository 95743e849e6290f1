//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dzsa-sync: DZSA launcher registration daemon
///
/// Keeps the configured DayZ servers registered with the DZSA launcher
/// directory and serves the latest sync results over a local HTTP API.
#[derive(Debug, Parser)]
#[command(name = "dzsa-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the TOML configuration file (required for run mode)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (also mirrors logs to stdout)
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for dzsa-sync
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "dzsa-sync.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
