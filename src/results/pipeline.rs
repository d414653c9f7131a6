//! List pipeline for one collection

use std::sync::Arc;

use tracing::{debug, instrument, trace};

use super::errors::ResultsResult;
use crate::pagination::ResultEnvelope;
use crate::query::{QueryDescriptor, QueryNormalizer};
use crate::resolver::QueryResolver;
use crate::schema::CollectionSchema;
use crate::store::{DocumentStore, PageQuery, StoreExecutor};

/// Paginated listing bound to one collection schema.
///
/// Cheap to clone; the store handle is shared.
#[derive(Clone)]
pub struct AdvancedResults {
    executor: StoreExecutor,
    schema: CollectionSchema,
}

impl AdvancedResults {
    pub fn new(store: Arc<dyn DocumentStore>, schema: CollectionSchema) -> Self {
        Self {
            executor: StoreExecutor::new(store),
            schema,
        }
    }

    pub fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    /// Decode a raw query string and run the pipeline
    pub async fn run_query_string(&self, query: &str) -> ResultsResult<ResultEnvelope> {
        let descriptor = QueryDescriptor::from_query_string(query)?;
        self.run(descriptor).await
    }

    /// Run the pipeline for one request
    #[instrument(skip_all, fields(collection = %self.schema.name))]
    pub async fn run(&self, descriptor: QueryDescriptor) -> ResultsResult<ResultEnvelope> {
        let (controls, filter) = QueryNormalizer::normalize(descriptor)?;
        let (projection, sort) = QueryResolver::resolve(&controls, self.schema.timestamp_field())?;

        debug!(
            %filter,
            page = controls.page.page(),
            limit = controls.page.limit(),
            "normalized query"
        );

        let result = self
            .executor
            .execute(PageQuery {
                collection: self.schema.store_collection(),
                filter: &filter,
                projection: &projection,
                sort: &sort,
                page: controls.page,
                expand: self.schema.expand(),
            })
            .await?;

        trace!(total = result.total, documents = ?result.documents, "fetched page");

        Ok(ResultEnvelope::assemble(
            controls.page,
            result.total,
            result.documents,
        ))
    }
}
