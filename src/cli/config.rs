//! Configuration file
//!
//! ```json
//! {
//!   "http": {"host": "127.0.0.1", "port": 54321, "cors_origins": []},
//!   "logging": {"level": "info", "json": false},
//!   "collections": [
//!     {"name": "products", "collection": "jtProduct", "seed": "./data/products.json"}
//!   ]
//! }
//! ```
//!
//! Relative seed paths are resolved against the config file's directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigResult};
use crate::http_server::HttpServerConfig;
use crate::observability::LoggingConfig;
use crate::schema::{CollectionRegistry, CollectionSchema};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Listable collections (at least one)
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
}

/// One collection: its schema plus an optional seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    #[serde(flatten)]
    pub schema: CollectionSchema,

    /// JSON file holding an array of documents loaded at startup
    #[serde(default)]
    pub seed: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent() {
            config.resolve_seed_paths(base);
        }

        config.validate()?;

        Ok(config)
    }

    /// Parse without validating or resolving paths
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.registry().map(|_| ())
    }

    /// Build the collection registry the config describes
    pub fn registry(&self) -> ConfigResult<CollectionRegistry> {
        if self.collections.is_empty() {
            return Err(ConfigError::NoCollections);
        }

        let schemas = self.collections.iter().map(|c| c.schema.clone());
        Ok(CollectionRegistry::from_schemas(schemas)?)
    }

    fn resolve_seed_paths(&mut self, base: &Path) {
        for collection in &mut self.collections {
            if let Some(seed) = &collection.seed {
                if seed.is_relative() {
                    collection.seed = Some(base.join(seed));
                }
            }
        }
    }
}
