//! Error types for merge operations.
//!
//! This module defines structured error types for the partial-update merge
//! engine, providing detailed context for precondition violations and
//! reconciliation failures surfaced to the HTTP layer as bad requests.

use thiserror::Error;

/// Structured error types for merge operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MergeError {
    /// A merge entry point received something other than an object
    #[error("merge input is not an object: found {actual}")]
    NotAnObject { actual: String },

    /// An identity-keyed patch item has no match in the stored array
    #[error("no stored item matches identity '{id}'")]
    UnmatchedIdentity { id: String },
}

impl MergeError {
    /// Check if this error is a merge-input precondition violation.
    pub fn is_precondition(&self) -> bool {
        matches!(self, MergeError::NotAnObject { .. })
    }

    /// Check if this error is about an unmatched identity item.
    pub fn is_unmatched_identity(&self) -> bool {
        matches!(self, MergeError::UnmatchedIdentity { .. })
    }

    /// Get the identity involved, if this is an identity-related error.
    pub fn identity(&self) -> Option<&str> {
        match self {
            MergeError::UnmatchedIdentity { id } => Some(id),
            _ => None,
        }
    }
}

// Conversion from MergeError to the main Error type
impl From<MergeError> for crate::Error {
    fn from(err: MergeError) -> Self {
        crate::Error::Merge(err)
    }
}
