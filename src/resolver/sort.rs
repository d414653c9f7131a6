//! Sort specification
//!
//! `sort=-cost,name` orders by `cost` descending, then `name` ascending.

use std::fmt;

use serde::Serialize;

use crate::query::{QueryError, QueryResult};

/// Conventional creation-timestamp field
pub const DEFAULT_TIMESTAMP_FIELD: &str = "createdAt";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One ordering key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.field),
            SortDirection::Desc => write!(f, "-{}", self.field),
        }
    }
}

/// Ordered sort keys. Empty means store-defined ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// No ordering requested
    pub fn unordered() -> Self {
        Self::default()
    }

    /// Ordering applied when `sort` is absent.
    ///
    /// Collections without a timestamp field get store-defined ordering.
    pub fn default_for(timestamp_field: Option<&str>) -> Self {
        match timestamp_field {
            Some(field) => Self::new(vec![SortKey::desc(field)]),
            None => Self::unordered(),
        }
    }

    /// Parse a `sort` value.
    ///
    /// An empty (but present) value yields store-defined ordering; only an
    /// absent value falls back to [`SortSpec::default_for`].
    pub fn parse(sort: Option<&str>, timestamp_field: Option<&str>) -> QueryResult<Self> {
        let Some(sort) = sort else {
            return Ok(Self::default_for(timestamp_field));
        };

        let mut keys: Vec<SortKey> = Vec::new();
        for token in sort.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let key = match token.strip_prefix('-') {
                Some(field) => SortKey::desc(field),
                None => SortKey::asc(token.strip_prefix('+').unwrap_or(token)),
            };
            if key.field.is_empty() {
                return Err(QueryError::InvalidSortField(token.to_string()));
            }
            // first mention of a field wins
            if !keys.iter().any(|k| k.field == key.field) {
                keys.push(key);
            }
        }

        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}
