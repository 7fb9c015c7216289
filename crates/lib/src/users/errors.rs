//! Error types for the user system.

use thiserror::Error;

/// Structured error types for account and profile operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum UserError {
    /// Registration attempted with an email that is already taken
    #[error("user already exists with the {email}")]
    EmailTaken { email: String },

    /// No account matches the lookup
    #[error("could not find user")]
    NotFound,

    /// No profile exists for the given account
    #[error("could not find user profile")]
    ProfileNotFound,

    /// A verification token or OTP is past its expiry
    #[error("{kind} is expired")]
    VerificationExpired { kind: &'static str },

    /// A verification token or OTP does not match the stored one
    #[error("invalid {kind}")]
    VerificationMismatch { kind: &'static str },

    /// The account has no outstanding verification to check against
    #[error("no {kind} is outstanding")]
    VerificationMissing { kind: &'static str },

    /// A fresh token was requested before the reissue gap elapsed
    #[error("you can generate a new token after 1 minute")]
    TokenReissueTooSoon,

    /// The submitted current password does not match
    #[error("current password is not matched")]
    CurrentPasswordMismatch,

    /// The new password is the same as the one already stored
    #[error("already used this password")]
    PasswordReused,
}

impl UserError {
    /// Check if this error indicates a missing account or profile.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UserError::NotFound | UserError::ProfileNotFound)
    }

    /// Check if this error is a verification failure.
    pub fn is_verification_error(&self) -> bool {
        matches!(
            self,
            UserError::VerificationExpired { .. }
                | UserError::VerificationMismatch { .. }
                | UserError::VerificationMissing { .. }
        )
    }

    /// Check if this error indicates a duplicate account.
    pub fn is_conflict(&self) -> bool {
        matches!(self, UserError::EmailTaken { .. })
    }

    /// Check if this error renders as a bad request.
    pub fn is_bad_request(&self) -> bool {
        self.is_verification_error()
            || matches!(
                self,
                UserError::TokenReissueTooSoon
                    | UserError::CurrentPasswordMismatch
                    | UserError::PasswordReused
            )
    }
}

// Conversion from UserError to the main Error type
impl From<UserError> for crate::Error {
    fn from(err: UserError) -> Self {
        crate::Error::User(err)
    }
}
