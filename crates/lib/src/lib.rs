//!
//! Bazaar: a document-store commerce backend.
//! This library provides the domain logic, storage, and HTTP surface for
//! running a Bazaar instance.
//!
//! ## Core Concepts
//!
//! * **Merge engine (`merge`)**: Partial-update reconciliation for nested
//!   documents. Every resource's update path merges the client's patch into
//!   the stored document instead of replacing it.
//! * **Store (`store`)**: A pluggable document store. `Database` is the raw
//!   engine contract, `Collection` the typed view with UUID keys and
//!   revision-checked replaces.
//! * **Domain modules (`users`, `categories`, `products`, `carts`,
//!   `orders`)**: One service per resource, each a thin layer of lookups,
//!   validation, and merge-driven updates over its collection.
//! * **Auth (`auth`)**: Argon2 password hashing, sealed single-purpose
//!   tokens, and Ed25519-signed access tokens.
//! * **Server (`server`)**: The axum REST surface tying it together.

pub mod auth;
pub mod carts;
pub mod categories;
pub mod clock;
pub mod constants;
pub mod data;
pub mod merge;
pub mod orders;
pub mod products;
pub mod server;
pub mod store;
pub mod users;

pub use clock::{Clock, SystemClock};

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;

/// Result type used throughout the Bazaar library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Bazaar library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured merge errors from the merge module
    #[error(transparent)]
    Merge(merge::MergeError),

    /// Structured store errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured authentication errors from the auth module
    #[error(transparent)]
    Auth(auth::AuthError),

    /// Structured account/profile errors from the users module
    #[error(transparent)]
    User(users::UserError),

    /// Structured category errors from the categories module
    #[error(transparent)]
    Category(categories::CategoryError),

    /// Structured product errors from the products module
    #[error(transparent)]
    Product(products::ProductError),

    /// Structured cart errors from the carts module
    #[error(transparent)]
    Cart(carts::CartError),

    /// Structured order errors from the orders module
    #[error(transparent)]
    Order(orders::OrderError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Merge(_) => "merge",
            Error::Store(_) => "store",
            Error::Auth(_) => "auth",
            Error::User(_) => "users",
            Error::Category(_) => "categories",
            Error::Product(_) => "products",
            Error::Cart(_) => "carts",
            Error::Order(_) => "orders",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_not_found(),
            Error::Auth(auth_err) => auth_err.is_not_found(),
            Error::User(user_err) => user_err.is_not_found(),
            Error::Category(category_err) => category_err.is_not_found(),
            Error::Product(product_err) => product_err.is_not_found(),
            Error::Cart(cart_err) => cart_err.is_not_found(),
            Error::Order(order_err) => order_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists, or a
    /// revision-checked replace lost the race).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_conflict(),
            Error::User(user_err) => user_err.is_conflict(),
            Error::Category(category_err) => category_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error means the caller's credentials were rejected.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_unauthorized(),
            _ => false,
        }
    }

    /// Check if this error means a valid identity lacks permission.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_permission_denied(),
            Error::Order(order_err) => order_err.is_permission_denied(),
            _ => false,
        }
    }

    /// Check if this error is validation-related (bad request).
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Merge(_) => true,
            Error::User(user_err) => user_err.is_bad_request(),
            Error::Product(product_err) => product_err.is_validation_error(),
            Error::Cart(cart_err) => cart_err.is_validation_error(),
            Error::Order(order_err) => order_err.is_validation_error(),
            Error::Serialize(_) => true,
            _ => false,
        }
    }

    /// Check if this error is merge-related.
    pub fn is_merge_error(&self) -> bool {
        matches!(self, Error::Merge(_))
    }

    /// Check if this error is store/persistence-related.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}
