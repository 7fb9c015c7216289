//! Error types for product operations.

use thiserror::Error;

/// Structured error types for the product catalog.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProductError {
    /// No product matches the lookup
    #[error("could not find product")]
    NotFound,

    /// A creation or update payload failed a field constraint
    #[error("invalid product data: {reason}")]
    Validation { reason: String },
}

impl ProductError {
    /// Check if this error indicates a missing product.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProductError::NotFound)
    }

    /// Check if this error is a payload validation failure.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, ProductError::Validation { .. })
    }
}

// Conversion from ProductError to the main Error type
impl From<ProductError> for crate::Error {
    fn from(err: ProductError) -> Self {
        crate::Error::Product(err)
    }
}
