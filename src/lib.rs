//! docpager - filtered, sorted, projected and paginated listing over a
//! document store
//!
//! A request's query string flows through four stages:
//!
//! 1. [`query`] decodes it and splits control parameters from the filter
//! 2. [`resolver`] turns `select` and `sort` into a projection and sort spec
//! 3. [`store`] counts all matches and fetches one page
//! 4. [`pagination`] computes next/prev indicators and wraps the envelope
//!
//! [`results`] runs the stages for one collection; [`http_server`] and
//! [`cli`] expose it.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod pagination;
pub mod query;
pub mod resolver;
pub mod results;
pub mod schema;
pub mod store;

/// A stored document: a JSON object keyed by field name
pub type Document = serde_json::Map<String, serde_json::Value>;
