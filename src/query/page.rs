//! Page request parsing
//!
//! `page` and `limit` are positive integers. Zero, negative or
//! non-numeric values are rejected rather than clamped.

use serde::Serialize;

use super::errors::{QueryError, QueryResult};

/// Default page if not specified
pub const DEFAULT_PAGE: u64 = 1;

/// Default limit if not specified
pub const DEFAULT_LIMIT: u64 = 25;

/// A validated page request.
///
/// `page * limit` is guaranteed to fit in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> QueryResult<Self> {
        if page == 0 {
            return Err(QueryError::invalid_control("page", "must be at least 1"));
        }
        if limit == 0 {
            return Err(QueryError::invalid_control("limit", "must be at least 1"));
        }
        if page.checked_mul(limit).is_none() {
            return Err(QueryError::PageOutOfRange { page, limit });
        }
        Ok(Self { page, limit })
    }

    /// Parse optional textual `page` and `limit` values, applying defaults
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> QueryResult<Self> {
        let page = match page {
            Some(text) => parse_positive("page", text)?,
            None => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(text) => parse_positive("limit", text)?,
            None => DEFAULT_LIMIT,
        };
        Self::new(page, limit)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Documents skipped before this page: `(page - 1) * limit`
    pub fn start_index(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// Index one past the last document of this page: `page * limit`
    pub fn end_index(&self) -> u64 {
        self.page * self.limit
    }
}

fn parse_positive(param: &'static str, text: &str) -> QueryResult<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QueryError::invalid_control(
            param,
            format!("'{text}' is not a positive integer"),
        ));
    }
    let value: u64 = text
        .parse()
        .map_err(|_| QueryError::invalid_control(param, format!("'{text}' is too large")))?;
    if value == 0 {
        return Err(QueryError::invalid_control(param, "must be at least 1"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::parse(None, None).unwrap();
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 25);
        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn test_parse_values() {
        let page = PageRequest::parse(Some("3"), Some(" 10 ")).unwrap();
        assert_eq!(page.page(), 3);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.start_index(), 20);
        assert_eq!(page.end_index(), 30);
    }

    #[test]
    fn test_rejects_non_positive() {
        for bad in ["0", "-1", "abc", "", "1.5", "2abc", "+3"] {
            assert!(
                PageRequest::parse(Some(bad), None).is_err(),
                "page {bad:?} should be rejected"
            );
            assert!(
                PageRequest::parse(None, Some(bad)).is_err(),
                "limit {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_overflow() {
        let err = PageRequest::new(u64::MAX, 2).unwrap_err();
        assert!(matches!(err, QueryError::PageOutOfRange { .. }));

        let err = PageRequest::parse(Some("99999999999999999999999"), None).unwrap_err();
        assert!(matches!(err, QueryError::InvalidControl { param: "page", .. }));
    }

    #[test]
    fn test_first_page_starts_at_zero() {
        let page = PageRequest::new(1, 25).unwrap();
        assert_eq!(page.start_index(), 0);
        assert_eq!(page.end_index(), 25);
    }
}
