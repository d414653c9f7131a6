//! # HTTP Server Module
//!
//! Exposes the list pipeline over HTTP.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/v1/:collection` - Filtered, sorted, projected and paginated listing

pub mod config;
pub mod errors;
pub mod routes;
pub mod server;

pub use config::{HttpServerConfig, DEFAULT_PORT};
pub use errors::{ErrorResponse, HttpError, HttpResult};
pub use routes::{health_routes, list_routes, HealthResponse, ListState};
pub use server::HttpServer;
