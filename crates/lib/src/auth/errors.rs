//! Error types for authentication operations.

use thiserror::Error;

/// Structured error types for authentication and token handling.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login failed: no account under the given email
    #[error("authentication failed: user not found")]
    UserNotFound,

    /// Login failed: password mismatch
    #[error("unauthorized access: wrong password")]
    WrongPassword,

    /// The account is soft-deleted
    #[error("user is deleted")]
    AccountDeleted,

    /// The account is deactivated
    #[error("user account is on hold")]
    AccountInactive,

    /// The caller lacks the required role
    #[error("permission denied: {reason}")]
    PermissionDenied { reason: String },

    /// A token failed signature or structural validation
    #[error("invalid token: {reason}")]
    TokenInvalid { reason: String },

    /// A token is past its expiry
    #[error("token is expired")]
    TokenExpired,

    /// Password hashing or verification machinery failed
    #[error("password hashing failed: {reason}")]
    HashingFailed { reason: String },

    /// Sealing or opening an encrypted token failed
    #[error("token sealing failed: {reason}")]
    SealFailed { reason: String },
}

impl AuthError {
    /// Check if this error means the credentials were wrong.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::WrongPassword | AuthError::TokenInvalid { .. } | AuthError::TokenExpired
        )
    }

    /// Check if this error means access is forbidden for a valid identity.
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            AuthError::PermissionDenied { .. }
                | AuthError::AccountDeleted
                | AuthError::AccountInactive
        )
    }

    /// Check if this error indicates a missing account.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AuthError::UserNotFound)
    }
}

// Conversion from AuthError to the main Error type
impl From<AuthError> for crate::Error {
    fn from(err: AuthError) -> Self {
        crate::Error::Auth(err)
    }
}
