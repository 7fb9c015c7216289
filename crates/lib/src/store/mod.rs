//! Pluggable document storage.
//!
//! The store holds every entity as a JSON document keyed by string id
//! inside a named collection. [`Database`] is the raw engine contract;
//! [`Collection`] layers typed serde access, key generation, and paging on
//! top of it. The only engine shipped here is [`InMemory`], which keeps
//! collections in `RwLock`ed maps with whole-store JSON file persistence.
//!
//! Revisions: every stored document carries a `_rev` counter managed by the
//! engine. Writers read a document (observing its revision), merge, and
//! replace with the observed revision; a replace whose revision is stale
//! fails with [`StoreError::RevisionConflict`] instead of silently losing
//! the other writer's update.

pub mod collection;
pub mod errors;
pub mod in_memory;

pub use collection::{Collection, Stored};
pub use errors::StoreError;
pub use in_memory::InMemory;

use std::fmt::Debug;

use crate::Result;

/// Reserved field carrying a document's primary key.
pub const DOC_ID_KEY: &str = "_id";

/// Reserved field carrying a document's revision counter.
pub const DOC_REV_KEY: &str = "_rev";

/// Raw document storage engine.
///
/// Implementations persist JSON objects by `(collection, id)`. The engine
/// owns the `_id` and `_rev` fields: `insert` stamps both, `replace` checks
/// and bumps `_rev`. All methods are safe to call concurrently.
pub trait Database: Send + Sync + Debug {
    /// Inserts a fresh document. Fails with [`StoreError::AlreadyExists`]
    /// if the id is taken.
    fn insert(&self, collection: &str, id: &str, doc: serde_json::Value) -> Result<()>;

    /// Fetches a document by id, or `None` when absent.
    fn get(&self, collection: &str, id: &str) -> Result<Option<serde_json::Value>>;

    /// Replaces a document, enforcing optimistic concurrency.
    ///
    /// `expected_rev` must equal the stored `_rev`; on success the new
    /// revision is stamped into the document and returned.
    fn replace(
        &self,
        collection: &str,
        id: &str,
        expected_rev: u64,
        doc: serde_json::Value,
    ) -> Result<u64>;

    /// Returns all documents in a collection, in insertion order.
    fn scan(&self, collection: &str) -> Result<Vec<serde_json::Value>>;

    /// Permanently removes a document. Soft deletion is a service-level
    /// concern; engines only hard-delete.
    fn remove(&self, collection: &str, id: &str) -> Result<()>;
}
