//! Error types for cart operations.

use thiserror::Error;

/// Structured error types for carts.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CartError {
    /// No cart matches the lookup
    #[error("could not find cart")]
    NotFound,

    /// The cart is not in a state that allows the operation
    #[error("cart is {status}, not active")]
    NotActive { status: String },

    /// A line item failed a field constraint
    #[error("invalid cart item: {reason}")]
    InvalidItem { reason: String },
}

impl CartError {
    /// Check if this error indicates a missing cart.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CartError::NotFound)
    }

    /// Check if this error is a payload validation failure.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, CartError::InvalidItem { .. } | CartError::NotActive { .. })
    }
}

// Conversion from CartError to the main Error type
impl From<CartError> for crate::Error {
    fn from(err: CartError) -> Self {
        crate::Error::Cart(err)
    }
}
