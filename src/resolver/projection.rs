//! Field projection
//!
//! `select=name,cost` keeps only those fields plus `_id`.
//! `select=-note,-change_log` drops those fields and keeps the rest.
//! Dotted fields (`order.customer`) address sub-document paths.

use serde::Serialize;
use serde_json::Value;

use crate::query::{QueryError, QueryResult};
use crate::Document;

/// Identifier field kept by inclusion projections
pub const ID_FIELD: &str = "_id";

/// Fields selected for return
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Every field
    #[default]
    All,
    /// Only the listed fields (in request order)
    Include { fields: Vec<String>, keep_id: bool },
    /// Every field except the listed ones
    Exclude { fields: Vec<String> },
}

impl Projection {
    /// Parse a `select` value
    pub fn parse(select: Option<&str>) -> QueryResult<Self> {
        let Some(select) = select else {
            return Ok(Self::All);
        };

        let mut included: Vec<String> = Vec::new();
        let mut excluded: Vec<String> = Vec::new();

        for token in select.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (list, name) = match token.strip_prefix('-') {
                Some(name) => (&mut excluded, name),
                None => (&mut included, token.strip_prefix('+').unwrap_or(token)),
            };
            if name.is_empty() {
                return Err(QueryError::invalid_control(
                    "select",
                    format!("'{token}' has no field name"),
                ));
            }
            if !list.iter().any(|f| f == name) {
                list.push(name.to_string());
            }
        }

        if included.is_empty() {
            return Ok(if excluded.is_empty() {
                Self::All
            } else {
                Self::Exclude { fields: excluded }
            });
        }

        // `-_id` is the one exclusion allowed alongside an inclusion list
        let keep_id = !excluded.iter().any(|f| f == ID_FIELD);
        excluded.retain(|f| f != ID_FIELD);
        if !excluded.is_empty() {
            return Err(QueryError::MixedProjection(select.to_string()));
        }

        Ok(Self::Include {
            fields: included,
            keep_id,
        })
    }

    /// Include only the given fields (plus `_id`)
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Include {
            fields: fields.into_iter().map(Into::into).collect(),
            keep_id: true,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Listed field names, empty for [`Projection::All`]
    pub fn fields(&self) -> &[String] {
        match self {
            Self::All => &[],
            Self::Include { fields, .. } | Self::Exclude { fields } => fields,
        }
    }

    /// Apply to a document.
    ///
    /// Dotted fields (`order.customer`) select or drop a path inside
    /// sub-documents; the enclosing objects keep only what was selected.
    pub fn apply(&self, mut document: Document) -> Document {
        match self {
            Self::All => document,
            Self::Include { fields, keep_id } => {
                let mut projected = Document::new();
                if *keep_id {
                    if let Some(id) = document.remove(ID_FIELD) {
                        projected.insert(ID_FIELD.to_string(), id);
                    }
                }
                for field in fields {
                    if let Some(value) = document.remove(field.as_str()) {
                        merge_into(&mut projected, field, value);
                    } else if let Some(value) = take_path(&mut document, field) {
                        put_path(&mut projected, field, value);
                    }
                }
                projected
            }
            Self::Exclude { fields } => {
                for field in fields {
                    take_path(&mut document, field);
                }
                document
            }
        }
    }
}

/// Remove and return the value at a possibly dotted path.
///
/// A literal top-level key containing dots wins over the nested path.
fn take_path(document: &mut Document, path: &str) -> Option<Value> {
    if let Some(value) = document.remove(path) {
        return Some(value);
    }

    let (parent, leaf) = path.rsplit_once('.')?;
    let mut current = document;
    for part in parent.split('.') {
        current = current.get_mut(part)?.as_object_mut()?;
    }
    current.remove(leaf)
}

/// Insert under `key`, merging with an object already placed there by a
/// more specific path
fn merge_into(document: &mut Document, key: &str, value: Value) {
    if let Value::Object(incoming) = value {
        if let Some(Value::Object(existing)) = document.get_mut(key) {
            for (field, nested) in incoming {
                merge_into(existing, &field, nested);
            }
            return;
        }
        document.insert(key.to_string(), Value::Object(incoming));
        return;
    }
    document.insert(key.to_string(), value);
}

/// Insert `value` at a possibly dotted path, creating parent objects
fn put_path(document: &mut Document, path: &str, value: Value) {
    let mut parts = path.split('.').peekable();
    let mut current = document;
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            merge_into(current, part, value);
            return;
        }
        let child = current
            .entry(part)
            .or_insert_with(|| Value::Object(Document::new()));
        match child.as_object_mut() {
            Some(map) => current = map,
            None => return,
        }
    }
}
