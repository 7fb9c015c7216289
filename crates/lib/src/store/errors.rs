//! Error types for store operations.
//!
//! This module defines structured error types for the document store,
//! covering lookups, revision conflicts, and serialization failures.

use thiserror::Error;

/// Structured error types for store operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document exists under the given key
    #[error("document not found in '{collection}': {id}")]
    NotFound { collection: String, id: String },

    /// A replace lost the race: the stored revision advanced since read
    #[error("revision conflict in '{collection}' for {id}: expected {expected}, found {actual}")]
    RevisionConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },

    /// A document already exists under a key that must be fresh
    #[error("document already exists in '{collection}': {id}")]
    AlreadyExists { collection: String, id: String },

    /// Serialization of a document failed
    #[error("serialization failed in '{collection}': {reason}")]
    SerializationFailed { collection: String, reason: String },

    /// Deserialization of a document failed
    #[error("deserialization failed in '{collection}': {reason}")]
    DeserializationFailed { collection: String, reason: String },

    /// A stored document is not a JSON object
    #[error("malformed document in '{collection}' for {id}")]
    MalformedDocument { collection: String, id: String },

    /// Loading or saving the store file failed
    #[error("store persistence failed: {reason}")]
    PersistenceFailed { reason: String },
}

impl StoreError {
    /// Check if this error indicates a missing document.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Check if this error is a revision conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            StoreError::RevisionConflict { .. } | StoreError::AlreadyExists { .. }
        )
    }

    /// Check if this error is related to serialization.
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            StoreError::SerializationFailed { .. } | StoreError::DeserializationFailed { .. }
        )
    }

    /// Check if this error is an I/O-level persistence failure.
    pub fn is_io_error(&self) -> bool {
        matches!(self, StoreError::PersistenceFailed { .. })
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
