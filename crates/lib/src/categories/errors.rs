//! Error types for category operations.

use thiserror::Error;

/// Structured error types for the category catalog.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CategoryError {
    /// A category with this name already exists
    #[error("category already exists: {name}")]
    NameTaken { name: String },

    /// No category matches the lookup
    #[error("could not find category")]
    NotFound,
}

impl CategoryError {
    /// Check if this error indicates a missing category.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CategoryError::NotFound)
    }

    /// Check if this error indicates a duplicate name.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CategoryError::NameTaken { .. })
    }
}

// Conversion from CategoryError to the main Error type
impl From<CategoryError> for crate::Error {
    fn from(err: CategoryError) -> Self {
        crate::Error::Category(err)
    }
}
