//! Account lifecycle: registration, verification, password flows.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{AuthKeys, crypto};
use crate::clock::Clock;
use crate::constants::{
    EMAIL_PROOF_TTL_MILLIS, OTP_TTL_MILLIS, PASSWORD_RESET_TTL_MILLIS, TOKEN_REISSUE_GAP_MILLIS,
};
use crate::data::Audit;
use crate::merge::{MergeOptions, merge_typed};
use crate::store::{Collection, Stored};
use crate::users::errors::UserError;
use crate::users::types::{CreateUser, UpdateUser, User, UserProfile, UserView};
use crate::{Error, Result};

/// Claims sealed into email-proof and password-reset tokens.
#[derive(Debug, Serialize, Deserialize)]
struct ProofClaims {
    #[serde(rename = "_id")]
    id: String,
    email: String,
}

/// Account service.
///
/// Owns the users collection and the profile bootstrap that registration
/// performs; password material only ever enters and leaves as Argon2 PHC
/// hashes.
#[derive(Clone)]
pub struct UserService {
    users: Collection<User>,
    profiles: Collection<UserProfile>,
    keys: Arc<AuthKeys>,
    clock: Arc<dyn Clock>,
}

impl UserService {
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

    /// Registers a new account.
    ///
    /// Lowercases the email, rejects duplicates, hashes the password,
    /// stamps a fresh OTP and sealed email-proof token, and creates the
    /// account's (initially sparse) profile.
    pub fn register(&self, data: CreateUser) -> Result<Stored<User>> {
        let email = data.email.to_lowercase();
        if self.find_by_email(&email)?.is_some() {
            return Err(UserError::EmailTaken { email }.into());
        }

        let now = self.clock.now_millis();
        let user = User {
            audit: Audit::created(self.clock.as_ref()),
            email: email.clone(),
            password: crypto::hash_password(&data.password)?,
            otp: Some(rand::thread_rng().gen_range(100_000u32..1_000_000)),
            otp_expires_at: Some(now + OTP_TTL_MILLIS),
            email_proof_token: None,
            email_proof_token_expires_at: None,
            password_reset_token: None,
            password_reset_token_expires_at: None,
            is_super_admin: false,
            is_admin: false,
            is_verified: false,
        };
        let id = self.users.insert(&user)?;

        let token = self.seal_proof(&id, &email)?;
        let stored = self.users.update_with(&id, |current| {
            let mut user = current.doc.clone();
            user.audit.c_by = Some(current.id.clone());
            user.email_proof_token = Some(token.clone());
            user.email_proof_token_expires_at =
                Some(self.clock.now_millis() + EMAIL_PROOF_TTL_MILLIS);
            Ok(user)
        })?;

        let profile = UserProfile {
            audit: Audit::created_by(&id, self.clock.as_ref()),
            user: id.clone(),
            first_name: data.first_name,
            last_name: data.last_name,
            ..UserProfile::default()
        };
        self.profiles.insert(&profile)?;

        info!(user = %id, "registered account");
        Ok(stored)
    }

    /// Verifies an account with its sealed email-proof token.
    pub fn verify_by_token(&self, token: &str) -> Result<Stored<User>> {
        let claims = self.open_proof(token)?;
        let stored = self.users.get(&claims.id).map_err(Self::as_user_not_found)?;

        let expires_at = stored
            .doc
            .email_proof_token_expires_at
            .ok_or(UserError::VerificationMissing { kind: "token" })?;
        if expires_at < self.clock.now_millis() {
            return Err(UserError::VerificationExpired { kind: "token" }.into());
        }
        if stored.doc.email_proof_token.as_deref() != Some(token) {
            return Err(UserError::VerificationMismatch { kind: "token" }.into());
        }

        self.mark_verified(&stored.id)
    }

    /// Verifies an account with the OTP sent at registration.
    pub fn verify_by_otp(&self, email: &str, otp: u32) -> Result<Stored<User>> {
        let stored = self
            .find_by_email(&email.to_lowercase())?
            .ok_or(UserError::NotFound)?;

        let expires_at = stored
            .doc
            .otp_expires_at
            .ok_or(UserError::VerificationMissing { kind: "otp" })?;
        if expires_at < self.clock.now_millis() {
            return Err(UserError::VerificationExpired { kind: "otp" }.into());
        }
        if stored.doc.otp != Some(otp) {
            return Err(UserError::VerificationMismatch { kind: "otp" }.into());
        }

        self.mark_verified(&stored.id)
    }

    /// Issues a fresh email-proof token, enforcing the reissue gap.
    pub fn regenerate_verification(&self, email: &str) -> Result<()> {
        let email = email.to_lowercase();
        let stored = self.find_by_email(&email)?.ok_or(UserError::NotFound)?;

        let now = self.clock.now_millis();
        if let Some(expires_at) = stored.doc.email_proof_token_expires_at
            && expires_at > now + EMAIL_PROOF_TTL_MILLIS - TOKEN_REISSUE_GAP_MILLIS
        {
            return Err(UserError::TokenReissueTooSoon.into());
        }

        let token = self.seal_proof(&stored.id, &email)?;
        self.users.update_with(&stored.id, |current| {
            let mut user = current.doc.clone();
            user.audit.u_by = Some(current.id.clone());
            user.email_proof_token = Some(token.clone());
            user.email_proof_token_expires_at =
                Some(self.clock.now_millis() + EMAIL_PROOF_TTL_MILLIS);
            Ok(user)
        })?;
        Ok(())
    }

    /// Issues a password-reset token, enforcing the reissue gap.
    pub fn password_reset_token(&self, email: &str) -> Result<()> {
        let email = email.to_lowercase();
        let stored = self.find_by_email(&email)?.ok_or(UserError::NotFound)?;

        let now = self.clock.now_millis();
        if let Some(expires_at) = stored.doc.password_reset_token_expires_at
            && expires_at > now + PASSWORD_RESET_TTL_MILLIS - TOKEN_REISSUE_GAP_MILLIS
        {
            return Err(UserError::TokenReissueTooSoon.into());
        }

        let token = self.seal_proof(&stored.id, &email)?;
        self.users.update_with(&stored.id, |current| {
            let mut user = current.doc.clone();
            user.audit.u_by = Some(current.id.clone());
            user.password_reset_token = Some(token.clone());
            user.password_reset_token_expires_at =
                Some(self.clock.now_millis() + PASSWORD_RESET_TTL_MILLIS);
            Ok(user)
        })?;
        Ok(())
    }

    /// Resets a forgotten password using a reset token.
    pub fn forgot_password(&self, token: &str, new_password: &str) -> Result<Stored<User>> {
        let claims = self.open_proof(token)?;
        let stored = self.users.get(&claims.id).map_err(Self::as_user_not_found)?;

        let expires_at = stored
            .doc
            .password_reset_token_expires_at
            .ok_or(UserError::VerificationMissing { kind: "token" })?;
        if expires_at < self.clock.now_millis() {
            return Err(UserError::VerificationExpired { kind: "token" }.into());
        }
        if stored.doc.password_reset_token.as_deref() != Some(token) {
            return Err(UserError::VerificationMismatch { kind: "token" }.into());
        }
        if crypto::verify_password(new_password, &stored.doc.password).is_ok() {
            return Err(UserError::PasswordReused.into());
        }

        let hash = crypto::hash_password(new_password)?;
        self.users.update_with(&stored.id, |current| {
            let mut user = current.doc.clone();
            user.audit.u_by = Some(current.id.clone());
            user.password = hash.clone();
            user.password_reset_token = None;
            user.password_reset_token_expires_at = None;
            Ok(user)
        })
    }

    /// Changes a password for a logged-in user.
    pub fn reset_password(
        &self,
        id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<Stored<User>> {
        let stored = self.users.get(id).map_err(Self::as_user_not_found)?;

        if crypto::verify_password(current_password, &stored.doc.password).is_err() {
            return Err(UserError::CurrentPasswordMismatch.into());
        }
        if current_password == new_password {
            return Err(UserError::PasswordReused.into());
        }

        let hash = crypto::hash_password(new_password)?;
        self.users.update_with(id, |current| {
            let mut user = current.doc.clone();
            user.audit.u_by = Some(current.id.clone());
            user.password = hash.clone();
            Ok(user)
        })
    }

    /// Merge-updates the mutable account fields.
    pub fn update(&self, id: &str, patch: &UpdateUser, actor: &str) -> Result<Stored<User>> {
        self.users
            .get(id)
            .map_err(Self::as_user_not_found)?;
        self.users.update_with(id, |current| {
            merge_typed(
                &current.doc,
                patch,
                actor,
                self.clock.as_ref(),
                MergeOptions::default(),
            )
        })
    }

    /// Fetches an account's public view, joined with its profile.
    pub fn find(&self, id: &str) -> Result<UserView> {
        let stored = self.users.get(id).map_err(Self::as_user_not_found)?;
        let profile = self
            .profiles
            .find_first(|p| p.user == stored.id)?
            .map(|p| p.doc);
        Ok(UserView::new(stored.id, &stored.doc, profile))
    }

    /// Looks up an account by (lowercased) email.
    pub fn find_by_email(&self, email: &str) -> Result<Option<Stored<User>>> {
        self.users.find_first(|u| u.email == email)
    }

    fn mark_verified(&self, id: &str) -> Result<Stored<User>> {
        self.users.update_with(id, |current| {
            let mut user = current.doc.clone();
            user.is_verified = true;
            Ok(user)
        })
    }

    fn seal_proof(&self, id: &str, email: &str) -> Result<String> {
        let claims = ProofClaims {
            id: id.to_string(),
            email: email.to_string(),
        };
        crypto::seal(serde_json::to_vec(&claims)?, self.keys.sealing_key())
    }

    fn open_proof(&self, token: &str) -> Result<ProofClaims> {
        let plaintext = crypto::open(token, self.keys.sealing_key())?;
        serde_json::from_slice(&plaintext).map_err(Error::from)
    }

    fn as_user_not_found(err: Error) -> Error {
        if err.is_not_found() {
            UserError::NotFound.into()
        } else {
            err
        }
    }
}
