//! Collection schema

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// How one entity is listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchema {
    /// Route name, e.g. `products`
    pub name: String,

    /// Store collection, e.g. `jtProduct` (defaults to `name`)
    #[serde(default)]
    pub collection: Option<String>,

    /// Creation timestamp used for the default sort. `None` when the
    /// entity has no such field; ordering is then store-defined.
    #[serde(default)]
    pub timestamp_field: Option<String>,

    /// Relation expanded on every list call
    #[serde(default)]
    pub expand: Option<String>,

    /// Relation field -> target store collection
    #[serde(default)]
    pub relations: BTreeMap<String, String>,
}

impl CollectionSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection: None,
            timestamp_field: None,
            expand: None,
            relations: BTreeMap::new(),
        }
    }

    pub fn stored_in(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn with_timestamp(mut self, field: impl Into<String>) -> Self {
        self.timestamp_field = Some(field.into());
        self
    }

    pub fn with_relation(mut self, field: impl Into<String>, target: impl Into<String>) -> Self {
        self.relations.insert(field.into(), target.into());
        self
    }

    pub fn expanding(mut self, field: impl Into<String>) -> Self {
        self.expand = Some(field.into());
        self
    }

    /// Store collection backing this schema
    pub fn store_collection(&self) -> &str {
        self.collection.as_deref().unwrap_or(&self.name)
    }

    pub fn timestamp_field(&self) -> Option<&str> {
        self.timestamp_field.as_deref()
    }

    pub fn expand(&self) -> Option<&str> {
        self.expand.as_deref()
    }

    /// Check the schema on its own (targets are checked by the registry)
    pub fn validate(&self) -> SchemaResult<()> {
        let valid_name = |s: &str| {
            !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        };
        if !valid_name(&self.name) {
            return Err(SchemaError::InvalidName(self.name.clone()));
        }
        if !valid_name(self.store_collection()) {
            return Err(SchemaError::InvalidName(self.store_collection().to_string()));
        }

        if let Some(field) = &self.expand {
            if !self.relations.contains_key(field) {
                return Err(SchemaError::UndeclaredExpansion {
                    collection: self.name.clone(),
                    field: field.clone(),
                });
            }
        }
        Ok(())
    }
}
