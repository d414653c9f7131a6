//! List and health routes
//!
//! `GET /v1/:collection` runs the list pipeline of the named collection
//! over the raw query string. The string is handed over undecoded so that
//! bracketed keys and repeated values keep their structure.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::{HttpError, HttpResult};
use crate::pagination::ResultEnvelope;
use crate::results::AdvancedResults;
use crate::schema::CollectionRegistry;
use crate::store::DocumentStore;

/// Shared state: one pipeline per registered collection
#[derive(Clone)]
pub struct ListState {
    pipelines: HashMap<String, AdvancedResults>,
}

impl ListState {
    pub fn new(store: Arc<dyn DocumentStore>, registry: &CollectionRegistry) -> Self {
        let pipelines = registry
            .iter()
            .map(|schema| {
                (
                    schema.name.clone(),
                    AdvancedResults::new(Arc::clone(&store), schema.clone()),
                )
            })
            .collect();
        Self { pipelines }
    }

    /// Pipeline for a route name
    pub fn pipeline(&self, name: &str) -> Option<&AdvancedResults> {
        self.pipelines.get(name)
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.pipelines.keys().map(String::as_str)
    }
}

/// List routes, meant to be nested under `/v1`
pub fn list_routes(state: Arc<ListState>) -> Router {
    Router::new()
        .route("/:collection", get(list_handler))
        .with_state(state)
}

async fn list_handler(
    State(state): State<Arc<ListState>>,
    Path(collection): Path<String>,
    RawQuery(query): RawQuery,
) -> HttpResult<Json<ResultEnvelope>> {
    let pipeline = state
        .pipeline(&collection)
        .ok_or_else(|| HttpError::UnknownCollection(collection.clone()))?;

    let query = query.unwrap_or_default();
    debug!(collection = %collection, query = %query, "list request");

    let envelope = pipeline.run_query_string(&query).await?;
    Ok(Json(envelope))
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
