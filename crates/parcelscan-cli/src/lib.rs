//! Parcelscan CLI library.
//!
//! Core functionality for the parcelscan command-line interface:
//! configuration management, command execution, the message-export
//! provider, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod provider;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use provider::JsonExportProvider;
