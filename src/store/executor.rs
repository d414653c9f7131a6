//! Store executor
//!
//! Runs the count and the bounded fetch for one page against an injected
//! [`DocumentStore`].

use std::sync::Arc;

use tracing::{debug, warn};

use super::adapter::{DocumentStore, FindQuery};
use super::errors::StoreResult;
use crate::query::{NormalizedFilter, PageRequest};
use crate::resolver::{Projection, SortSpec};
use crate::Document;

/// Everything needed to fetch one page
#[derive(Debug, Clone, Copy)]
pub struct PageQuery<'a> {
    pub collection: &'a str,
    pub filter: &'a NormalizedFilter,
    pub projection: &'a Projection,
    pub sort: &'a SortSpec,
    pub page: PageRequest,
    pub expand: Option<&'a str>,
}

/// Outcome of one page fetch
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// Documents matching the filter, across all pages
    pub total: u64,
    /// Documents on the requested page
    pub documents: Vec<Document>,
}

/// Executes page queries against a document store
#[derive(Clone)]
pub struct StoreExecutor {
    store: Arc<dyn DocumentStore>,
}

impl StoreExecutor {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Count all matches and fetch the requested page.
    ///
    /// Both store calls run concurrently. If either fails the other is
    /// dropped and the error is returned as-is.
    pub async fn execute(&self, query: PageQuery<'_>) -> StoreResult<PageResult> {
        let find = FindQuery {
            filter: query.filter,
            projection: query.projection,
            sort: query.sort,
            skip: query.page.start_index(),
            limit: query.page.limit(),
            expand: query.expand,
        };

        debug!(
            collection = query.collection,
            skip = find.skip,
            limit = find.limit,
            sort = %query.sort,
            "executing page query"
        );

        let result = tokio::try_join!(
            self.store.count(query.collection, query.filter),
            self.store.find(query.collection, find),
        );

        match result {
            Ok((total, documents)) => Ok(PageResult { total, documents }),
            Err(e) => {
                warn!(collection = query.collection, error = %e, "store query failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store_with(count: usize) -> Arc<MemoryStore> {
        let store = MemoryStore::new();
        for i in 0..count {
            store
                .insert(
                    "codes",
                    json!({"_id": format!("c{i:03}"), "seq": i}).as_object().cloned().unwrap(),
                )
                .unwrap();
        }
        Arc::new(store)
    }

    fn page_query<'a>(
        filter: &'a NormalizedFilter,
        projection: &'a Projection,
        sort: &'a SortSpec,
        page: PageRequest,
    ) -> PageQuery<'a> {
        PageQuery {
            collection: "codes",
            filter,
            projection,
            sort,
            page,
            expand: None,
        }
    }

    #[tokio::test]
    async fn test_skip_derived_from_page() {
        let executor = StoreExecutor::new(store_with(30));
        let filter = NormalizedFilter::match_all();
        let projection = Projection::All;
        let sort = SortSpec::unordered();

        let result = executor
            .execute(page_query(&filter, &projection, &sort, PageRequest::new(3, 10).unwrap()))
            .await
            .unwrap();

        assert_eq!(result.total, 30);
        assert_eq!(result.documents.len(), 10);
        assert_eq!(result.documents[0]["_id"], json!("c020"));
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let executor = StoreExecutor::new(store_with(5));
        let filter = NormalizedFilter::match_all();
        let projection = Projection::All;
        let sort = SortSpec::unordered();

        let result = executor
            .execute(page_query(&filter, &projection, &sort, PageRequest::new(4, 5).unwrap()))
            .await
            .unwrap();

        assert_eq!(result.total, 5);
        assert!(result.documents.is_empty());
    }

    struct FailingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn count(&self, _: &str, _: &NormalizedFilter) -> StoreResult<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn find(&self, _: &str, _: FindQuery<'_>) -> StoreResult<Vec<Document>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_store_error_propagates_unchanged() {
        let store = Arc::new(FailingStore {
            calls: AtomicUsize::new(0),
        });
        let executor = StoreExecutor::new(store.clone());
        let filter = NormalizedFilter::match_all();
        let projection = Projection::All;
        let sort = SortSpec::unordered();

        let err = executor
            .execute(page_query(&filter, &projection, &sort, PageRequest::default()))
            .await
            .unwrap_err();

        assert_eq!(err, StoreError::Unavailable("connection refused".to_string()));
        // no retries
        assert!(store.calls.load(Ordering::SeqCst) <= 2);
    }
}
