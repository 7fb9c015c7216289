//! In-memory storage engine
//!
//! This module provides an in-memory implementation of the [`Database`]
//! trait, suitable for development, testing, and deployments where the
//! whole store fits in memory and durability is handled by JSON snapshots
//! on shutdown.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::store::{DOC_ID_KEY, DOC_REV_KEY, Database, StoreError};

/// One collection: documents by id, plus insertion order for stable scans.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CollectionData {
    docs: HashMap<String, serde_json::Value>,
    order: Vec<String>,
}

/// A simple in-memory storage engine using `HashMap`s per collection.
///
/// Provides basic persistence via [`save_to_file`](InMemory::save_to_file)
/// and [`load_from_file`](InMemory::load_from_file), serializing the whole
/// store to JSON.
#[derive(Debug, Default)]
pub struct InMemory {
    collections: RwLock<HashMap<String, CollectionData>>,
}

impl InMemory {
    /// Creates a new, empty `InMemory` store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves the entire store state to a file as JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let collections = self.collections.read().unwrap();
        let json =
            serde_json::to_string_pretty(&*collections).map_err(|e| StoreError::PersistenceFailed {
                reason: format!("serialize store: {e}"),
            })?;
        std::fs::write(path, json).map_err(|e| {
            StoreError::PersistenceFailed {
                reason: format!("write store file: {e}"),
            }
            .into()
        })
    }

    /// Loads store state from a JSON file.
    ///
    /// A missing file yields a new, empty store.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path).map_err(|e| StoreError::PersistenceFailed {
            reason: format!("read store file: {e}"),
        })?;
        let collections: HashMap<String, CollectionData> =
            serde_json::from_str(&json).map_err(|e| StoreError::PersistenceFailed {
                reason: format!("parse store file: {e}"),
            })?;
        Ok(Self {
            collections: RwLock::new(collections),
        })
    }

    fn rev_of(doc: &serde_json::Value) -> u64 {
        doc.get(DOC_REV_KEY).and_then(|v| v.as_u64()).unwrap_or(0)
    }

    fn stamp(doc: &mut serde_json::Value, id: &str, rev: u64) -> Result<()> {
        let obj = doc
            .as_object_mut()
            .ok_or_else(|| StoreError::MalformedDocument {
                collection: String::new(),
                id: id.to_string(),
            })?;
        obj.insert(DOC_ID_KEY.to_string(), serde_json::Value::String(id.into()));
        obj.insert(DOC_REV_KEY.to_string(), serde_json::Value::from(rev));
        Ok(())
    }
}

impl Database for InMemory {
    fn insert(&self, collection: &str, id: &str, mut doc: serde_json::Value) -> Result<()> {
        Self::stamp(&mut doc, id, 1)?;
        let mut collections = self.collections.write().unwrap();
        let data = collections.entry(collection.to_string()).or_default();
        if data.docs.contains_key(id) {
            return Err(StoreError::AlreadyExists {
                collection: collection.to_string(),
                id: id.to_string(),
            }
            .into());
        }
        data.docs.insert(id.to_string(), doc);
        data.order.push(id.to_string());
        Ok(())
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<serde_json::Value>> {
        let collections = self.collections.read().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|data| data.docs.get(id))
            .cloned())
    }

    fn replace(
        &self,
        collection: &str,
        id: &str,
        expected_rev: u64,
        mut doc: serde_json::Value,
    ) -> Result<u64> {
        let mut collections = self.collections.write().unwrap();
        let data = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        let stored = data.docs.get_mut(id).ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;

        let actual = Self::rev_of(stored);
        if actual != expected_rev {
            return Err(StoreError::RevisionConflict {
                collection: collection.to_string(),
                id: id.to_string(),
                expected: expected_rev,
                actual,
            }
            .into());
        }

        let next = actual + 1;
        Self::stamp(&mut doc, id, next)?;
        *stored = doc;
        Ok(next)
    }

    fn scan(&self, collection: &str) -> Result<Vec<serde_json::Value>> {
        let collections = self.collections.read().unwrap();
        Ok(collections
            .get(collection)
            .map(|data| {
                data.order
                    .iter()
                    .filter_map(|id| data.docs.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn remove(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.collections.write().unwrap();
        let data = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        if data.docs.remove(id).is_none() {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }
            .into());
        }
        data.order.retain(|existing| existing != id);
        Ok(())
    }
}
