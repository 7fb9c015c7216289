//! Login and bearer-token authentication.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::auth::errors::AuthError;
use crate::auth::token::{AccessClaims, AuthKeys, Identity, access_token_expiry};
use crate::auth::crypto;
use crate::clock::Clock;
use crate::constants::ACCESS_TOKEN_TTL_MILLIS;
use crate::store::Collection;
use crate::users::types::{User, UserProfile};
use crate::Result;

/// What a successful login returns to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSession {
    /// Token lifetime in milliseconds.
    pub expires_in: u64,
    pub token: String,
    pub user: SessionUser,
}

/// The identity block echoed back alongside the token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub is_verified: bool,
    pub is_admin: bool,
    pub is_super_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub profile_percentage: u8,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    users: Collection<User>,
    profiles: Collection<UserProfile>,
    keys: Arc<AuthKeys>,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(
        users: Collection<User>,
        profiles: Collection<UserProfile>,
        keys: Arc<AuthKeys>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            profiles,
            keys,
            clock,
        }
    }

    /// Validates credentials and issues an access token.
    ///
    /// Checks run in a fixed order: account existence, password, deleted,
    /// inactive, then the requested-role match when `want_admin` is given.
    pub fn login(
        &self,
        email: &str,
        password: &str,
        want_admin: Option<bool>,
    ) -> Result<LoginSession> {
        let email = email.to_lowercase();
        let stored = self
            .users
            .find_first(|u| u.email == email)?
            .ok_or(AuthError::UserNotFound)?;
        let user = &stored.doc;

        crypto::verify_password(password, &user.password)?;

        if user.audit.is_deleted {
            return Err(AuthError::AccountDeleted.into());
        }
        if !user.audit.is_active {
            return Err(AuthError::AccountInactive.into());
        }
        if let Some(want_admin) = want_admin
            && want_admin != user.is_admin
        {
            return Err(AuthError::PermissionDenied {
                reason: "user is not an admin".to_string(),
            }
            .into());
        }

        let profile = self
            .profiles
            .find_first(|p| p.user == stored.id)?
            .map(|p| p.doc);

        let claims = AccessClaims {
            sub: stored.id.clone(),
            email: user.email.clone(),
            is_verified: user.is_verified,
            is_admin: user.is_admin,
            is_super_admin: user.is_super_admin,
            exp: access_token_expiry(self.clock.as_ref()),
        };
        let token = self.keys.issue(&claims)?;
        debug!(user = %stored.id, "issued access token");

        Ok(LoginSession {
            expires_in: ACCESS_TOKEN_TTL_MILLIS,
            token,
            user: SessionUser {
                id: stored.id,
                email: user.email.clone(),
                is_verified: user.is_verified,
                is_admin: user.is_admin,
                is_super_admin: user.is_super_admin,
                first_name: profile.as_ref().and_then(|p| p.first_name.clone()),
                last_name: profile.as_ref().and_then(|p| p.last_name.clone()),
                profile_percentage: profile.map(|p| p.profile_percentage).unwrap_or(0),
            },
        })
    }

    /// Resolves a bearer token into the caller's identity.
    ///
    /// Beyond signature and expiry, the account must still exist and be
    /// neither deleted nor deactivated.
    pub fn authenticate(&self, token: &str) -> Result<Identity> {
        let claims = self.keys.verify(token, self.clock.as_ref())?;

        let stored = self
            .users
            .try_get(&claims.sub)?
            .ok_or(AuthError::UserNotFound)?;
        if stored.doc.audit.is_deleted {
            return Err(AuthError::AccountDeleted.into());
        }
        if !stored.doc.audit.is_active {
            return Err(AuthError::AccountInactive.into());
        }

        Ok(Identity::from(claims))
    }
}
