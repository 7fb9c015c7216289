//! Error types for order operations.

use thiserror::Error;

/// Structured error types for orders.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum OrderError {
    /// No order matches the lookup
    #[error("could not find order")]
    NotFound,

    /// The requested status change is not a legal transition
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// A creation payload failed a field constraint
    #[error("invalid order data: {reason}")]
    Validation { reason: String },

    /// The caller does not own the order and is not an admin
    #[error("order belongs to another customer")]
    NotOwner,
}

impl OrderError {
    /// Check if this error indicates a missing order.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrderError::NotFound)
    }

    /// Check if this error is a payload or transition validation failure.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            OrderError::InvalidTransition { .. } | OrderError::Validation { .. }
        )
    }

    /// Check if this error is an ownership violation.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, OrderError::NotOwner)
    }
}

// Conversion from OrderError to the main Error type
impl From<OrderError> for crate::Error {
    fn from(err: OrderError) -> Self {
        crate::Error::Order(err)
    }
}
