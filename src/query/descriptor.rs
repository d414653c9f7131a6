//! # Query Descriptor
//!
//! Decodes request query strings into a structured key/value mapping.
//!
//! Supports the bracket notation used by REST clients:
//! - `status=active` → `{"status": "active"}`
//! - `cost[gt]=100` → `{"cost": {"gt": "100"}}`
//! - `tag[]=a&tag[]=b` or `tag=a&tag=b` → `{"tag": ["a", "b"]}`

use serde::{Deserialize, Serialize};
use serde_json::map::Entry;
use serde_json::{Map, Value};

use super::errors::{QueryError, QueryResult};

/// Maximum bracket nesting below the field name
pub const MAX_DEPTH: usize = 5;

/// Inbound query parameters, reserved control keys included
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryDescriptor {
    entries: Map<String, Value>,
}

/// One bracketed component of a query key
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// `[name]`
    Field(String),
    /// `[]`
    Append,
}

impl QueryDescriptor {
    /// Create an empty descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored.
    pub fn from_query_string(query: &str) -> QueryResult<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()).into_owned())
    }

    /// Build a descriptor from already-decoded key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut entries = Map::new();

        for (key, value) in pairs {
            let key = key.as_ref();
            let (root, segments) = split_key(key)?;
            insert_at(&mut entries, key, root, &segments, Value::String(value.into()))?;
        }

        Ok(Self { entries })
    }

    /// Wrap an already-structured JSON value.
    ///
    /// Fails unless the value is an object.
    pub fn from_value(value: Value) -> QueryResult<Self> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(QueryError::NotAMapping(json_type_name(&other))),
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Set a value, replacing any previous one
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Check if a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the underlying mapping
    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Consume into the underlying mapping
    pub fn into_entries(self) -> Map<String, Value> {
        self.entries
    }
}

impl TryFrom<Value> for QueryDescriptor {
    type Error = QueryError;

    fn try_from(value: Value) -> QueryResult<Self> {
        Self::from_value(value)
    }
}

/// Split `a[b][]` into its root name and bracket segments
fn split_key(key: &str) -> QueryResult<(&str, Vec<Segment>)> {
    let malformed = || QueryError::MalformedKey(key.to_string());

    let (root, mut rest) = match key.find('[') {
        Some(pos) => (&key[..pos], &key[pos..]),
        None => (key, ""),
    };

    if root.is_empty() || root.contains(']') {
        return Err(malformed());
    }

    let mut segments = Vec::new();
    while !rest.is_empty() {
        let inner_end = rest.find(']').ok_or_else(malformed)?;
        if !rest.starts_with('[') {
            return Err(malformed());
        }
        let inner = &rest[1..inner_end];
        if inner.contains('[') {
            return Err(malformed());
        }

        segments.push(if inner.is_empty() {
            Segment::Append
        } else {
            Segment::Field(inner.to_string())
        });
        rest = &rest[inner_end + 1..];
    }

    if segments.len() > MAX_DEPTH {
        return Err(QueryError::TooDeep {
            key: key.to_string(),
            max: MAX_DEPTH,
        });
    }

    // `[]` only makes sense as the final segment
    if let Some(pos) = segments.iter().position(|s| *s == Segment::Append) {
        if pos + 1 != segments.len() {
            return Err(malformed());
        }
    }

    Ok((root, segments))
}

/// Insert `value` under `name`, descending through `segments`
fn insert_at(
    slot: &mut Map<String, Value>,
    key: &str,
    name: &str,
    segments: &[Segment],
    value: Value,
) -> QueryResult<()> {
    let conflict = || QueryError::ConflictingKey(key.to_string());

    match segments.first() {
        None | Some(Segment::Append) => {
            let as_list = matches!(segments.first(), Some(Segment::Append));
            match slot.entry(name) {
                Entry::Vacant(entry) => {
                    entry.insert(if as_list {
                        Value::Array(vec![value])
                    } else {
                        value
                    });
                }
                Entry::Occupied(mut entry) => match entry.get_mut() {
                    Value::Array(items) => items.push(value),
                    Value::Object(_) => return Err(conflict()),
                    existing => {
                        let previous = existing.take();
                        *existing = Value::Array(vec![previous, value]);
                    }
                },
            }
            Ok(())
        }
        Some(Segment::Field(child)) => {
            let nested = slot
                .entry(name)
                .or_insert_with(|| Value::Object(Map::new()));
            match nested {
                Value::Object(map) => insert_at(map, key, child, &segments[1..], value),
                _ => Err(conflict()),
            }
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
