//! Typed collection access.
//!
//! `Collection` provides a record-oriented view over one named collection
//! of a [`Database`], similar to a database table with automatic primary
//! key generation.
//!
//! # Features
//! - Automatically generates UUIDv4 primary keys for new records
//! - Serde round-tripping between the record type and raw JSON documents
//! - Revision tracking for optimistic-concurrency replaces
//! - Predicate search across all records

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::Result;
use crate::store::{DOC_ID_KEY, DOC_REV_KEY, Database, StoreError};

/// A record read from a collection, with its storage identity attached.
///
/// The `id` and `rev` ride outside the record type: `rev` is what a
/// subsequent [`Collection::replace`] must present to win the write.
#[derive(Debug, Clone)]
pub struct Stored<T> {
    pub id: String,
    pub rev: u64,
    pub doc: T,
}

impl<T: Serialize> Serialize for Stored<T> {
    /// Serializes as the document object with `_id` and `_rev` spliced in,
    /// which is the wire shape clients see.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error as _;
        let mut value = serde_json::to_value(&self.doc).map_err(S::Error::custom)?;
        match value.as_object_mut() {
            Some(obj) => {
                obj.insert(DOC_ID_KEY.to_string(), self.id.clone().into());
                obj.insert(DOC_REV_KEY.to_string(), self.rev.into());
            }
            None => return Err(S::Error::custom("stored document is not an object")),
        }
        value.serialize(serializer)
    }
}

/// A typed view over one collection of a [`Database`].
pub struct Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    name: &'static str,
    db: Arc<dyn Database>,
    phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            db: Arc::clone(&self.db),
            phantom: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a typed view over `name` in the given engine.
    pub fn new(db: Arc<dyn Database>, name: &'static str) -> Self {
        Self {
            name,
            db,
            phantom: PhantomData,
        }
    }

    /// The collection name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Inserts a new record and returns its generated primary key.
    pub fn insert(&self, doc: &T) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.db.insert(self.name, &id, self.to_raw(doc)?)?;
        Ok(id)
    }

    /// Retrieves a record by its primary key.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no record exists under `id`.
    pub fn get(&self, id: impl AsRef<str>) -> Result<Stored<T>> {
        let id = id.as_ref();
        self.try_get(id)?.ok_or_else(|| {
            StoreError::NotFound {
                collection: self.name.to_string(),
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Retrieves a record by its primary key, or `None` when absent.
    pub fn try_get(&self, id: impl AsRef<str>) -> Result<Option<Stored<T>>> {
        let id = id.as_ref();
        match self.db.get(self.name, id)? {
            Some(raw) => Ok(Some(self.from_raw(raw)?)),
            None => Ok(None),
        }
    }

    /// Replaces a record, presenting the revision observed at read time.
    ///
    /// # Errors
    /// Returns [`StoreError::RevisionConflict`] when another writer has
    /// replaced the record since `stored` was read.
    pub fn replace(&self, stored: &Stored<T>) -> Result<u64> {
        self.db
            .replace(self.name, &stored.id, stored.rev, self.to_raw(&stored.doc)?)
    }

    /// Returns all records matching the predicate, in insertion order.
    pub fn search(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<Stored<T>>> {
        let mut matches = Vec::new();
        for raw in self.db.scan(self.name)? {
            let stored = self.from_raw(raw)?;
            if predicate(&stored.doc) {
                matches.push(stored);
            }
        }
        Ok(matches)
    }

    /// Returns the first record matching the predicate.
    pub fn find_first(&self, predicate: impl Fn(&T) -> bool) -> Result<Option<Stored<T>>> {
        for raw in self.db.scan(self.name)? {
            let stored = self.from_raw(raw)?;
            if predicate(&stored.doc) {
                return Ok(Some(stored));
            }
        }
        Ok(None)
    }

    /// Counts records matching the predicate.
    pub fn count(&self, predicate: impl Fn(&T) -> bool) -> Result<usize> {
        Ok(self.search(predicate)?.len())
    }

    /// Permanently removes a record. Soft deletion is the caller's concern.
    pub fn remove(&self, id: impl AsRef<str>) -> Result<()> {
        self.db.remove(self.name, id.as_ref())
    }

    /// Read-mutate-replace with one retry on revision conflict.
    ///
    /// `mutate` is called with the freshly read record and returns the
    /// document to write. If the replace loses to a concurrent writer the
    /// record is re-read and `mutate` runs once more against the new state;
    /// a second conflict propagates to the caller.
    pub fn update_with(
        &self,
        id: impl AsRef<str>,
        mutate: impl Fn(&Stored<T>) -> Result<T>,
    ) -> Result<Stored<T>> {
        let id = id.as_ref();
        let mut last_err = None;
        for _ in 0..2 {
            let stored = self.get(id)?;
            let doc = mutate(&stored)?;
            let next = Stored {
                id: stored.id.clone(),
                rev: stored.rev,
                doc,
            };
            match self.replace(&next) {
                Ok(rev) => return Ok(Stored { rev, ..next }),
                Err(e) if e.is_conflict() => last_err = Some(e),
                Err(e) => return Err(e),
            }
        }
        Err(last_err.expect("conflict retry exhausted"))
    }

    fn to_raw(&self, doc: &T) -> Result<serde_json::Value> {
        serde_json::to_value(doc).map_err(|e| {
            StoreError::SerializationFailed {
                collection: self.name.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn from_raw(&self, raw: serde_json::Value) -> Result<Stored<T>> {
        let id = raw
            .get(DOC_ID_KEY)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let rev = raw.get(DOC_REV_KEY).and_then(|v| v.as_u64()).unwrap_or(0);
        let doc = serde_json::from_value(raw).map_err(|e| StoreError::DeserializationFailed {
            collection: self.name.to_string(),
            reason: format!("record '{id}': {e}"),
        })?;
        Ok(Stored { id, rev, doc })
    }
}
