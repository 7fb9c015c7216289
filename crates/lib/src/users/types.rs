//! Account and profile document types.

use serde::{Deserialize, Serialize};

use crate::data::{Audit, GeoLocation, Media, Mobile, SocialLink};

/// A stored user account.
///
/// `password` holds the Argon2 PHC hash, never plaintext. The OTP and
/// sealed-token fields drive the verification and password-reset flows and
/// are cleared of meaning once used (expiry in the past).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub audit: Audit,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_expires_at: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_proof_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_proof_token_expires_at: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_reset_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_reset_token_expires_at: Option<u64>,
    #[serde(default)]
    pub is_super_admin: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_verified: bool,
}

/// A stored user profile, joined to its account by `user`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    #[serde(flatten)]
    pub audit: Audit,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Mobile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socials: Option<Vec<SocialLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_pic: Option<Media>,
    pub profile_percentage: u8,
    pub language: Language,
}

/// Interface language for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    Catalan,
    German,
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Partial account update; merged into the stored account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

/// Partial profile update; merged into the stored profile.
///
/// Nested objects honor `isDeleted`; `socials` reconciles by `_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Mobile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socials: Option<Vec<SocialLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_pic: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

/// Public account view: what list/find endpoints return.
///
/// The password hash and verification secrets never leave the service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_admin: bool,
    pub is_super_admin: bool,
    pub c_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

impl UserView {
    /// Builds the public view of an account, optionally joined to its profile.
    pub fn new(id: String, user: &User, profile: Option<UserProfile>) -> Self {
        Self {
            id,
            email: user.email.clone(),
            is_active: user.audit.is_active,
            is_verified: user.is_verified,
            is_admin: user.is_admin,
            is_super_admin: user.is_super_admin,
            c_time: user.audit.c_time,
            profile,
        }
    }
}
