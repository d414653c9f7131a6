//! Schema registration errors

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two schemas share a route name
    #[error("Collection '{0}' is registered twice")]
    Duplicate(String),

    /// Name is empty or not usable as a path segment
    #[error("Invalid collection name: '{0}'")]
    InvalidName(String),

    /// `expand` names a field that is not a declared relation
    #[error("Collection '{collection}' expands '{field}', which is not a declared relation")]
    UndeclaredExpansion { collection: String, field: String },

    /// Relation points at a collection nobody registered
    #[error("Relation '{collection}.{field}' targets unknown collection '{target}'")]
    UnknownTarget {
        collection: String,
        field: String,
        target: String,
    },
}
