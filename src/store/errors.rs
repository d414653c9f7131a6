//! # Store Errors
//!
//! Failures reported by a document store adapter. Propagated unchanged by
//! the executor.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store cannot serve requests (connectivity, poisoned state)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Operation exceeded the adapter's deadline
    #[error("Store operation timed out: {0}")]
    Timeout(String),

    /// Filter uses an operator the store does not understand
    #[error("Unsupported operator '{operator}' on field '{field}'")]
    UnsupportedOperator { field: String, operator: String },

    /// Filter condition is structurally invalid for the store
    #[error("Invalid condition on field '{field}': {reason}")]
    InvalidCondition { field: String, reason: String },

    /// Expansion names a field that is not a declared relation
    #[error("Collection '{collection}' has no relation named '{field}'")]
    UnknownRelation { collection: String, field: String },

    /// Document rejected on write
    #[error("Invalid document for '{collection}': {reason}")]
    InvalidDocument { collection: String, reason: String },

    /// Seed data could not be loaded
    #[error("Failed to seed '{collection}' from {path}: {reason}")]
    Seed {
        collection: String,
        path: String,
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn unsupported(field: &str, operator: &str) -> Self {
        Self::UnsupportedOperator {
            field: field.to_string(),
            operator: operator.to_string(),
        }
    }

    pub(crate) fn invalid_condition(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidCondition {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
