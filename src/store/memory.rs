//! # In-Memory Document Store
//!
//! A [`DocumentStore`] backed by process memory, with the filter,
//! projection, sort and relation-expansion semantics of a document
//! database. Documents keep insertion order, which is the store-defined
//! ordering used when no sort is requested.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, trace};
use uuid::Uuid;

use super::adapter::{DocumentStore, FindQuery};
use super::errors::{StoreError, StoreResult};
use super::matcher::FilterMatcher;
use super::ordering::DocumentSorter;
use crate::query::NormalizedFilter;
use crate::resolver::ID_FIELD;
use crate::schema::CollectionRegistry;
use crate::Document;

/// In-memory store: collection name -> documents
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,

    /// collection -> relation field -> target collection
    relations: HashMap<String, HashMap<String, String>>,

    /// collection -> creation timestamp field stamped on insert
    timestamps: HashMap<String, String>,

    /// Last issued timestamp, in epoch milliseconds
    last_stamp: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store with the relations and timestamp fields of a registry
    pub fn for_registry(registry: &CollectionRegistry) -> Self {
        let mut store = Self::new();
        for schema in registry.iter() {
            let collection = schema.store_collection();
            for (field, target) in &schema.relations {
                store = store.with_relation(collection, field.as_str(), target.as_str());
            }
            if let Some(field) = schema.timestamp_field() {
                store = store.with_timestamps(collection, field);
            }
        }
        store
    }

    /// Declare `field` on `collection` as a reference into `target`
    pub fn with_relation(
        mut self,
        collection: impl Into<String>,
        field: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.relations
            .entry(collection.into())
            .or_default()
            .insert(field.into(), target.into());
        self
    }

    /// Stamp `field` with the insert time on documents that lack it
    pub fn with_timestamps(mut self, collection: impl Into<String>, field: impl Into<String>) -> Self {
        self.timestamps.insert(collection.into(), field.into());
        self
    }

    /// Insert a document, assigning an `_id` if missing.
    ///
    /// Returns the document's identifier.
    pub fn insert(&self, collection: &str, document: Document) -> StoreResult<Value> {
        let (id, document) = self.prepare(collection, document);
        self.write()?
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    /// Insert every object in a JSON array.
    ///
    /// All-or-nothing: a non-object element rejects the whole batch.
    pub fn insert_many(&self, collection: &str, documents: Value) -> StoreResult<usize> {
        let invalid = |reason: String| StoreError::InvalidDocument {
            collection: collection.to_string(),
            reason,
        };

        let Value::Array(items) = documents else {
            return Err(invalid("expected an array of documents".to_string()));
        };

        let batch = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(document) => Ok(document),
                _ => Err(invalid(format!("document #{index} is not an object"))),
            })
            .collect::<StoreResult<Vec<Document>>>()?;

        let prepared: Vec<Document> = batch
            .into_iter()
            .map(|document| self.prepare(collection, document).1)
            .collect();

        let inserted = prepared.len();
        self.write()?
            .entry(collection.to_string())
            .or_default()
            .extend(prepared);
        Ok(inserted)
    }

    /// Assign a missing `_id` and creation timestamp
    fn prepare(&self, collection: &str, mut document: Document) -> (Value, Document) {
        let id = document
            .entry(ID_FIELD)
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()))
            .clone();

        if let Some(field) = self.timestamps.get(collection) {
            document
                .entry(field.as_str())
                .or_insert_with(|| Value::String(self.next_stamp()));
        }

        (id, document)
    }

    /// Wall-clock timestamp, strictly later than any previously issued one
    fn next_stamp(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_stamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        let millis = now.max(previous + 1);

        DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Load a collection from a JSON file holding an array of documents
    pub fn seed_from_file(&self, collection: &str, path: &Path) -> StoreResult<usize> {
        let seed_error = |reason: String| StoreError::Seed {
            collection: collection.to_string(),
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| seed_error(e.to_string()))?;
        let documents: Value =
            serde_json::from_str(&content).map_err(|e| seed_error(e.to_string()))?;
        let inserted = self
            .insert_many(collection, documents)
            .map_err(|e| seed_error(e.to_string()))?;

        debug!(collection, path = %path.display(), inserted, "seeded collection");
        Ok(inserted)
    }

    /// Number of documents in a collection, ignoring any filter
    pub fn len(&self, collection: &str) -> StoreResult<usize> {
        Ok(self.read()?.get(collection).map_or(0, Vec::len))
    }

    pub fn is_empty(&self, collection: &str) -> StoreResult<bool> {
        Ok(self.len(collection)? == 0)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Vec<Document>>>> {
        self.collections
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Vec<Document>>>> {
        self.collections
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn matching(
        documents: &[Document],
        filter: &NormalizedFilter,
    ) -> StoreResult<Vec<Document>> {
        let mut matched = Vec::new();
        for document in documents {
            if FilterMatcher::matches(document, filter)? {
                matched.push(document.clone());
            }
        }
        Ok(matched)
    }

    /// Replace reference ids in `field` with the referenced documents.
    ///
    /// Missing single references become `null`; missing entries of a
    /// reference list are dropped.
    fn expand(
        &self,
        collections: &HashMap<String, Vec<Document>>,
        collection: &str,
        field: &str,
        documents: &mut [Document],
    ) -> StoreResult<()> {
        let target = self
            .relations
            .get(collection)
            .and_then(|fields| fields.get(field))
            .ok_or_else(|| StoreError::UnknownRelation {
                collection: collection.to_string(),
                field: field.to_string(),
            })?;

        let referenced: HashMap<String, &Document> = collections
            .get(target)
            .map(|docs| {
                docs.iter()
                    .filter_map(|d| d.get(ID_FIELD).map(|id| (id_key(id), d)))
                    .collect()
            })
            .unwrap_or_default();

        let resolve = |id: &Value| {
            referenced
                .get(&id_key(id))
                .map(|d| Value::Object((*d).clone()))
        };

        for document in documents.iter_mut() {
            let Some(value) = document.get_mut(field) else {
                continue;
            };
            *value = match value.take() {
                Value::Array(ids) => Value::Array(ids.iter().filter_map(resolve).collect()),
                Value::Null => Value::Null,
                id => resolve(&id).unwrap_or(Value::Null),
            };
        }

        Ok(())
    }
}

/// Lookup key for an identifier value
fn id_key(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn count(&self, collection: &str, filter: &NormalizedFilter) -> StoreResult<u64> {
        let collections = self.read()?;
        let Some(documents) = collections.get(collection) else {
            return Ok(0);
        };

        let mut total: u64 = 0;
        for document in documents {
            if FilterMatcher::matches(document, filter)? {
                total += 1;
            }
        }
        Ok(total)
    }

    async fn find(&self, collection: &str, query: FindQuery<'_>) -> StoreResult<Vec<Document>> {
        let collections = self.read()?;
        let documents = collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut matched = Self::matching(documents, query.filter)?;
        DocumentSorter::sort(&mut matched, query.sort);

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        let mut page: Vec<Document> = matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|document| query.projection.apply(document))
            .collect();

        if let Some(field) = query.expand {
            self.expand(&collections, collection, field, &mut page)?;
        }

        trace!(collection, returned = page.len(), "memory store find");
        Ok(page)
    }
}
