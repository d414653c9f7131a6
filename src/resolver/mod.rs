//! # Projection & Sort Resolver
//!
//! Turns the comma-separated `select` and `sort` control values into
//! structured projection and ordering specs.
//!
//! - `select` absent → all fields
//! - `sort` absent → descending by the collection's creation timestamp,
//!   or store-defined ordering when the collection has none

mod projection;
mod sort;

pub use projection::{Projection, ID_FIELD};
pub use sort::{SortDirection, SortKey, SortSpec, DEFAULT_TIMESTAMP_FIELD};

use crate::query::{ControlParams, QueryResult};

/// Stateless resolver for projection and sort controls
pub struct QueryResolver;

impl QueryResolver {
    /// Resolve both specs from the controls split off by the normalizer
    pub fn resolve(
        controls: &ControlParams,
        timestamp_field: Option<&str>,
    ) -> QueryResult<(Projection, SortSpec)> {
        let projection = Projection::parse(controls.select.as_deref())?;
        let sort = SortSpec::parse(controls.sort.as_deref(), timestamp_field)?;
        Ok((projection, sort))
    }
}
