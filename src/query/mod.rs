//! # Query Normalization
//!
//! Turns an inbound, loosely-typed set of query parameters into the
//! structures the store executor consumes.
//!
//! # Flow
//!
//! 1. Decode the raw query string into a [`QueryDescriptor`]
//! 2. Split off the reserved control keys (`select`, `sort`, `page`, `limit`)
//! 3. Rewrite comparison operator keys into store-native form
//!
//! Reserved keys never reach the store as filter conditions.

mod descriptor;
mod errors;
mod normalizer;
mod page;

pub use descriptor::{QueryDescriptor, MAX_DEPTH};
pub use errors::{QueryError, QueryResult};
pub use normalizer::{ControlParams, NormalizedFilter, QueryNormalizer, OPERATOR_KEYS, RESERVED_KEYS};
pub use page::{PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE};
