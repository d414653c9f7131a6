//! # Filter Matching
//!
//! Evaluates a normalized filter against a document using document-store
//! semantics:
//!
//! - `{"field": value}` matches on equality; array fields match when any
//!   element is equal
//! - `{"field": {"$op": arg, ...}}` applies each operator (AND)
//! - `{"field": {"key": ...}}` without `$` keys matches the sub-document exactly
//! - dotted fields (`order.customer`) descend into sub-documents
//!
//! Query-string values arrive as text, so a numeric document value compares
//! numerically against a numeric string.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};
use crate::query::NormalizedFilter;
use crate::Document;

/// Stateless filter evaluator
pub struct FilterMatcher;

impl FilterMatcher {
    /// Check if a document matches every condition in the filter
    pub fn matches(document: &Document, filter: &NormalizedFilter) -> StoreResult<bool> {
        for (field, condition) in filter.iter() {
            if !Self::matches_condition(field, lookup(document, field), condition)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn matches_condition(field: &str, value: Option<&Value>, condition: &Value) -> StoreResult<bool> {
        match condition {
            Value::Object(ops) if ops.keys().any(|k| k.starts_with('$')) => {
                if !ops.keys().all(|k| k.starts_with('$')) {
                    return Err(StoreError::invalid_condition(
                        field,
                        "operators cannot be mixed with plain keys",
                    ));
                }
                for (operator, argument) in ops {
                    if !apply_operator(field, operator, value, argument)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            expected => Ok(equals(value, expected)),
        }
    }
}

fn apply_operator(
    field: &str,
    operator: &str,
    value: Option<&Value>,
    argument: &Value,
) -> StoreResult<bool> {
    let result = match operator {
        "$eq" => equals(value, argument),
        "$ne" => !equals(value, argument),
        "$gt" => compares(value, argument, |o| o == Ordering::Greater),
        "$gte" => compares(value, argument, |o| o != Ordering::Less),
        "$lt" => compares(value, argument, |o| o == Ordering::Less),
        "$lte" => compares(value, argument, |o| o != Ordering::Greater),
        "$in" => candidates(argument).iter().any(|c| equals(value, c)),
        "$nin" => !candidates(argument).iter().any(|c| equals(value, c)),
        "$exists" => value.is_some() == truthy(field, argument)?,
        _ => return Err(StoreError::unsupported(field, operator)),
    };
    Ok(result)
}

/// Resolve a possibly dotted field path
pub(crate) fn lookup<'a>(document: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if let Some(value) = document.get(path) {
        return Some(value);
    }

    let mut parts = path.split('.');
    let mut current = document.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Equality with array-membership and text coercion
fn equals(value: Option<&Value>, expected: &Value) -> bool {
    match value {
        None => expected.is_null(),
        Some(Value::Array(items)) if !expected.is_array() => {
            items.iter().any(|item| loose_eq(item, expected))
        }
        Some(actual) => loose_eq(actual, expected),
    }
}

fn loose_eq(actual: &Value, expected: &Value) -> bool {
    if actual == expected {
        return true;
    }
    match (actual, expected) {
        (Value::Number(n), Value::String(s)) => match (n.as_f64(), s.trim().parse::<f64>()) {
            (Some(a), Ok(b)) => a == b,
            _ => false,
        },
        (Value::Bool(b), Value::String(s)) => s.parse::<bool>() == Ok(*b),
        _ => false,
    }
}

fn compares(value: Option<&Value>, argument: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    match value {
        None => false,
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| compare_bracketed(item, argument).is_some_and(&accept)),
        Some(actual) => compare_bracketed(actual, argument).is_some_and(&accept),
    }
}

/// Compare within a type bracket; values of unrelated types never compare
fn compare_bracketed(actual: &Value, argument: &Value) -> Option<Ordering> {
    match (actual, argument) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::Number(a), Value::String(b)) => a.as_f64()?.partial_cmp(&b.trim().parse::<f64>().ok()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// `$in` accepts a list, or a single value from a one-off query parameter
fn candidates(argument: &Value) -> Vec<Value> {
    match argument {
        Value::Array(items) => items.clone(),
        single => vec![single.clone()],
    }
}

fn truthy(field: &str, argument: &Value) -> StoreResult<bool> {
    match argument {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64() != Some(0.0)),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(StoreError::invalid_condition(
                field,
                format!("$exists expects a boolean, got '{s}'"),
            )),
        },
        _ => Err(StoreError::invalid_condition(field, "$exists expects a boolean")),
    }
}
