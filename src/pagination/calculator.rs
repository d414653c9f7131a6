//! Pagination calculator
//!
//! With `start = (page - 1) * limit` and `end = page * limit`:
//! - `next` is present iff `end < total`
//! - `prev` is present iff `start > 0`
//!
//! Absent indicators are omitted from the serialized form.

use serde::{Deserialize, Serialize};

use crate::query::PageRequest;

/// Pointer to an adjacent page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIndicator {
    pub page: u64,
    pub limit: u64,
}

/// Adjacent page indicators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PageIndicator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageIndicator>,
}

impl Pagination {
    /// Compute indicators for `page` given `total` matching documents
    pub fn compute(page: PageRequest, total: u64) -> Self {
        let limit = page.limit();

        let next = (page.end_index() < total).then(|| PageIndicator {
            page: page.page() + 1,
            limit,
        });
        let prev = (page.start_index() > 0).then(|| PageIndicator {
            page: page.page() - 1,
            limit,
        });

        Self { next, prev }
    }
}
