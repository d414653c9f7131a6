//! # Advanced Results
//!
//! The full list pipeline for one collection:
//!
//! 1. Normalize the query descriptor (strip controls, rewrite operators)
//! 2. Resolve projection and sort
//! 3. Count and fetch the page through the store executor
//! 4. Compute pagination and assemble the envelope
//!
//! Every stage is stateless; nothing survives the call except the store.

mod errors;
mod pipeline;

pub use errors::{ResultsError, ResultsResult};
pub use pipeline::AdvancedResults;
