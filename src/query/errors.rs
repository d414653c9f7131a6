//! # Query Errors
//!
//! Raised when inbound parameters cannot be parsed into the structured
//! filter, projection, sort or page forms. Always terminal for the request.

use thiserror::Error;

/// Result type for query parsing
pub type QueryResult<T> = Result<T, QueryError>;

/// Malformed query input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Descriptor is not a key/value mapping
    #[error("Query must be a mapping of field names to values, got {0}")]
    NotAMapping(&'static str),

    /// Bracketed key is unbalanced or empty
    #[error("Malformed query key: {0}")]
    MalformedKey(String),

    /// Bracket nesting deeper than allowed
    #[error("Query key '{key}' nests deeper than {max} levels")]
    TooDeep { key: String, max: usize },

    /// Same key used both as a scalar and as a nested map
    #[error("Conflicting values for query key: {0}")]
    ConflictingKey(String),

    /// A control parameter had the wrong shape
    #[error("Invalid value for '{param}': {reason}")]
    InvalidControl { param: &'static str, reason: String },

    /// `select` mixes included and excluded fields
    #[error("Projection cannot mix included and excluded fields: {0}")]
    MixedProjection(String),

    /// `sort` token has no field name
    #[error("Invalid sort field: '{0}'")]
    InvalidSortField(String),

    /// `page`/`limit` outside the representable range
    #[error("Page {page} with limit {limit} is out of range")]
    PageOutOfRange { page: u64, limit: u64 },
}

impl QueryError {
    pub(crate) fn invalid_control(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidControl {
            param,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::invalid_control("page", "must be a positive integer");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'page': must be a positive integer"
        );

        let err = QueryError::TooDeep {
            key: "a[b][c]".to_string(),
            max: 1,
        };
        assert!(err.to_string().contains("deeper than 1"));
    }
}
