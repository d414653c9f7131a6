//! Query normalizer
//!
//! Strips the reserved control keys out of a descriptor and rewrites
//! comparison operator keys (`gt`, `gte`, `lt`, `lte`, `in`) into
//! store-native form (`$gt`, ...).
//!
//! The rewrite walks the filter tree and only touches map keys below a
//! field name. Top-level keys are field names and scalar values are data;
//! neither is ever rewritten, so `?status=in` stays `{"status": "in"}`.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::descriptor::{json_type_name, QueryDescriptor};
use super::errors::{QueryError, QueryResult};
use super::page::PageRequest;

/// Control keys removed before filtering
pub const RESERVED_KEYS: [&str; 4] = ["select", "sort", "page", "limit"];

/// Operator keys rewritten to store-native form
pub const OPERATOR_KEYS: [&str; 5] = ["gt", "gte", "lt", "lte", "in"];

/// Filter passed to the store.
///
/// Never contains a reserved key at the top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedFilter {
    conditions: Map<String, Value>,
}

impl NormalizedFilter {
    /// Filter that matches every document
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.conditions.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Iterate `(field, condition)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.conditions.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.conditions
    }
}

impl fmt::Display for NormalizedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.conditions) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// Raw control values split off the descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlParams {
    /// Comma-separated projection, if given
    pub select: Option<String>,
    /// Comma-separated sort fields, if given
    pub sort: Option<String>,
    /// Validated page and limit
    pub page: PageRequest,
}

/// Stateless query normalizer
pub struct QueryNormalizer;

impl QueryNormalizer {
    /// Split a descriptor into control parameters and a store filter
    pub fn normalize(descriptor: QueryDescriptor) -> QueryResult<(ControlParams, NormalizedFilter)> {
        let mut entries = descriptor.into_entries();

        let select = take_control(&mut entries, "select")?;
        let sort = take_control(&mut entries, "sort")?;
        let page = take_control(&mut entries, "page")?;
        let limit = take_control(&mut entries, "limit")?;

        let page = PageRequest::parse(page.as_deref(), limit.as_deref())?;

        let conditions = entries
            .into_iter()
            .map(|(field, condition)| (field, rewrite_operators(condition)))
            .collect();

        Ok((
            ControlParams { select, sort, page },
            NormalizedFilter { conditions },
        ))
    }

    /// Map an operator keyword to its store form, if it is one
    pub fn store_operator(key: &str) -> Option<String> {
        OPERATOR_KEYS
            .contains(&key)
            .then(|| format!("${key}"))
    }
}

/// Remove a reserved key and return its textual value
fn take_control(entries: &mut Map<String, Value>, param: &'static str) -> QueryResult<Option<String>> {
    match entries.remove(param) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(QueryError::invalid_control(
            param,
            format!("expected a single value, got {}", json_type_name(&other)),
        )),
    }
}

/// Rewrite operator keys in every map below a field.
///
/// Array elements are values, not operator positions, and are left alone.
fn rewrite_operators(condition: Value) -> Value {
    match condition {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    let key = QueryNormalizer::store_operator(&key).unwrap_or(key);
                    (key, rewrite_operators(value))
                })
                .collect(),
        ),
        other => other,
    }
}
