//! # Store Executor
//!
//! Issues the count and bounded fetch against an abstract document store.
//!
//! # Execution Flow
//!
//! 1. `count(filter)` over the whole match set, ignoring pagination
//! 2. `find(filter, projection, sort, skip, limit, expand)` for one page
//!
//! Both calls use the same filter but do not share a snapshot. Writes
//! landing between them can leave `total` out of step with the fetched
//! page. No retries are attempted; adapter failures surface unchanged.

mod adapter;
mod errors;
mod executor;
mod matcher;
mod memory;
mod ordering;

pub use adapter::{DocumentStore, FindQuery};
pub use errors::{StoreError, StoreResult};
pub use executor::{PageQuery, PageResult, StoreExecutor};
pub use matcher::FilterMatcher;
pub use memory::MemoryStore;
pub use ordering::DocumentSorter;
