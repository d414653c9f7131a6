//! # Collection Schemas
//!
//! Binds each listable entity to its store collection, its creation
//! timestamp field (if any) and the relations it can expand.

mod collection;
mod errors;
mod registry;

pub use collection::CollectionSchema;
pub use errors::{SchemaError, SchemaResult};
pub use registry::CollectionRegistry;
