//! Authentication for Bazaar
//!
//! Password hashing (Argon2id), sealed single-purpose tokens (AES-256-GCM),
//! Ed25519-signed access tokens, and the login/authenticate service.

pub mod crypto;
pub mod errors;
pub mod service;
pub mod token;

pub use errors::AuthError;
pub use service::{AuthService, LoginSession, SessionUser};
pub use token::{AccessClaims, AuthKeys, Identity};
