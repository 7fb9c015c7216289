//! Constants used throughout the Bazaar library.
//!
//! This module provides central definitions for collection names, expiry
//! windows, and pagination defaults shared across the domain modules.

/// Collection name for user accounts.
pub const USERS: &str = "users";

/// Collection name for user profiles.
pub const USER_PROFILES: &str = "user_profiles";

/// Collection name for categories.
pub const CATEGORIES: &str = "categories";

/// Collection name for products.
pub const PRODUCTS: &str = "products";

/// Collection name for carts.
pub const CARTS: &str = "carts";

/// Collection name for orders.
pub const ORDERS: &str = "orders";

/// OTP validity window in milliseconds (15 minutes).
pub const OTP_TTL_MILLIS: u64 = 15 * 60 * 1000;

/// Email-proof token validity window in milliseconds (30 minutes).
pub const EMAIL_PROOF_TTL_MILLIS: u64 = 30 * 60 * 1000;

/// Password-reset token validity window in milliseconds (15 minutes).
pub const PASSWORD_RESET_TTL_MILLIS: u64 = 15 * 60 * 1000;

/// Minimum gap before a fresh verification token may be issued (1 minute).
pub const TOKEN_REISSUE_GAP_MILLIS: u64 = 60 * 1000;

/// Access token lifetime in milliseconds (7 days).
pub const ACCESS_TOKEN_TTL_MILLIS: u64 = 7 * 24 * 60 * 60 * 1000;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Generated product slug length.
pub const SLUG_LENGTH: usize = 8;
