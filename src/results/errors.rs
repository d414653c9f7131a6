//! Pipeline errors
//!
//! Both kinds are terminal; no partial envelope is ever produced.

use thiserror::Error;

use crate::query::QueryError;
use crate::store::StoreError;

/// Result type for the list pipeline
pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultsError {
    /// Malformed filter, selection, sort or page input
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Count or fetch failed in the store
    #[error(transparent)]
    Store(#[from] StoreError),
}
