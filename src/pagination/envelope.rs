//! Response envelope
//!
//! ```json
//! {
//!   "success": true,
//!   "count": 2,
//!   "pagination": {"next": {"page": 2, "limit": 2}},
//!   "data": [{...}, {...}]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::calculator::Pagination;
use crate::query::PageRequest;
use crate::Document;

/// Uniform list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope<T = Document> {
    pub success: bool,
    /// Documents on this page, not the total match count
    pub count: usize,
    pub pagination: Pagination,
    pub data: Vec<T>,
}

impl<T> ResultEnvelope<T> {
    /// Assemble the envelope for a fetched page
    pub fn assemble(page: PageRequest, total: u64, data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            pagination: Pagination::compute(page, total),
            data,
        }
    }
}
