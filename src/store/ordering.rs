//! Document ordering
//!
//! Sorts documents by a multi-key [`SortSpec`], deterministically.

use std::cmp::Ordering;

use serde_json::Value;

use super::matcher::lookup;
use crate::resolver::{SortDirection, SortSpec};
use crate::Document;

static NULL: Value = Value::Null;

/// Sorts fetched documents
pub struct DocumentSorter;

impl DocumentSorter {
    /// Sorts documents according to the sort specification.
    ///
    /// Sort is stable; an empty spec leaves insertion order untouched.
    pub fn sort(documents: &mut [Document], spec: &SortSpec) {
        if spec.is_empty() {
            return;
        }

        documents.sort_by(|a, b| {
            for key in spec.keys() {
                let ordering = Self::compare_values(lookup(a, &key.field), lookup(b, &key.field));
                let ordering = match key.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }

    /// Compares two JSON values for sorting.
    ///
    /// Ordering rules:
    /// - missing = null < bool < number < string < array < object
    /// - For same types, natural ordering
    pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        let a = a.unwrap_or(&NULL);
        let b = b.unwrap_or(&NULL);

        let type_order = |v: &Value| -> u8 {
            match v {
                Value::Null => 0,
                Value::Bool(_) => 1,
                Value::Number(_) => 2,
                Value::String(_) => 3,
                Value::Array(_) => 4,
                Value::Object(_) => 5,
            }
        };

        match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => {
                let x = x.as_f64().unwrap_or(0.0);
                let y = y.as_f64().unwrap_or(0.0);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (Value::String(x), Value::String(y)) => x.cmp(y),
            _ => type_order(a).cmp(&type_order(b)),
        }
    }
}
