//! CLI module for docpager
//!
//! Provides command-line interface for:
//! - serve: Seed the store and serve list endpoints
//! - query: One-shot list query

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{execute_query, open_store, query, run, run_command, serve};
pub use config::{CollectionConfig, Config};
pub use errors::{CliError, CliResult, ConfigError, ConfigResult};
