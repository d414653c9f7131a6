//! Collection registry

use std::collections::BTreeMap;

use super::collection::CollectionSchema;
use super::errors::{SchemaError, SchemaResult};

/// Route name -> schema
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    schemas: BTreeMap<String, CollectionSchema>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and validate a registry from a list of schemas
    pub fn from_schemas(schemas: impl IntoIterator<Item = CollectionSchema>) -> SchemaResult<Self> {
        let mut registry = Self::new();
        for schema in schemas {
            registry.register(schema)?;
        }
        registry.validate()?;
        Ok(registry)
    }

    /// Register a schema under its route name
    pub fn register(&mut self, schema: CollectionSchema) -> SchemaResult<()> {
        schema.validate()?;
        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::Duplicate(schema.name));
        }
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Check every relation points at a registered store collection
    pub fn validate(&self) -> SchemaResult<()> {
        for schema in self.schemas.values() {
            for (field, target) in &schema.relations {
                let known = self
                    .schemas
                    .values()
                    .any(|s| s.store_collection() == target);
                if !known {
                    return Err(SchemaError::UnknownTarget {
                        collection: schema.name.clone(),
                        field: field.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CollectionSchema> {
        self.schemas.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectionSchema> {
        self.schemas.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = CollectionRegistry::from_schemas([
            CollectionSchema::new("orders").stored_in("jtOrder"),
            CollectionSchema::new("works")
                .stored_in("jtWork")
                .with_relation("order_id", "jtOrder")
                .expanding("order_id"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("works").unwrap().expand(), Some("order_id"));
        assert!(registry.get("jtWork").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["orders", "works"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = CollectionRegistry::from_schemas([
            CollectionSchema::new("codes"),
            CollectionSchema::new("codes"),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::Duplicate("codes".to_string()));
    }

    #[test]
    fn test_unknown_relation_target() {
        let err = CollectionRegistry::from_schemas([
            CollectionSchema::new("works").with_relation("order_id", "jtOrder")
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownTarget { .. }));
    }
}
