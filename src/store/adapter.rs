//! Store adapter interface
//!
//! Any document store (in-memory, networked) plugs in behind
//! [`DocumentStore`]. Adapters own their connections and serialization;
//! cancellation happens by dropping the returned future.

use async_trait::async_trait;

use super::errors::StoreResult;
use crate::query::NormalizedFilter;
use crate::resolver::{Projection, SortSpec};
use crate::Document;

/// Parameters of a bounded fetch
#[derive(Debug, Clone, Copy)]
pub struct FindQuery<'a> {
    pub filter: &'a NormalizedFilter,
    pub projection: &'a Projection,
    pub sort: &'a SortSpec,
    pub skip: u64,
    pub limit: u64,
    /// Relation field to replace with the referenced documents
    pub expand: Option<&'a str>,
}

/// Document store operations consumed by the executor
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Count documents matching the filter
    async fn count(&self, collection: &str, filter: &NormalizedFilter) -> StoreResult<u64>;

    /// Fetch one projected, sorted, bounded page of matching documents
    async fn find(&self, collection: &str, query: FindQuery<'_>) -> StoreResult<Vec<Document>>;
}
