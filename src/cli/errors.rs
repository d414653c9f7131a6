//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed to stderr and the process exits
//! non-zero.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::observability::LoggingError;
use crate::results::ResultsError;
use crate::schema::SchemaError;
use crate::store::StoreError;

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config declares no collections")]
    NoCollections,

    #[error("Invalid collection config: {0}")]
    Schema(#[from] SchemaError),
}

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// Seeding or querying the store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Query failed: {0}")]
    Results(#[from] ResultsError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// Config result type
pub type ConfigResult<T> = Result<T, ConfigError>;
