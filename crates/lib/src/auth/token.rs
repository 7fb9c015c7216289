//! Signed access tokens.
//!
//! Access tokens are an Ed25519-signed JSON claims payload:
//! `base64(claims).base64(signature)`. The signing key is derived
//! deterministically from the server secret so tokens survive restarts
//! without any stored key material.

use base64ct::{Base64Unpadded, Encoding};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::crypto::{self, KEY_LENGTH};
use super::errors::AuthError;
use crate::Result;
use crate::clock::Clock;
use crate::constants::ACCESS_TOKEN_TTL_MILLIS;

/// Application salt for deriving the access-token signing seed.
const SIGNING_SEED_SALT: &[u8] = b"bazaar/access-token/v1";

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    #[serde(rename = "_id")]
    pub sub: String,
    pub email: String,
    pub is_verified: bool,
    pub is_admin: bool,
    pub is_super_admin: bool,
    /// Expiry, millis since epoch.
    pub exp: u64,
}

/// The authenticated caller, as handlers see it.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
    pub is_super_admin: bool,
}

impl From<AccessClaims> for Identity {
    fn from(claims: AccessClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            is_admin: claims.is_admin,
            is_super_admin: claims.is_super_admin,
        }
    }
}

/// Key material derived from the server secret.
///
/// Holds the Ed25519 signing key for access tokens and the AES sealing key
/// for single-purpose tokens. Both derive deterministically from one
/// secret, so rotating the secret invalidates everything outstanding.
#[derive(Debug)]
pub struct AuthKeys {
    signing: SigningKey,
    sealing: [u8; KEY_LENGTH],
}

impl AuthKeys {
    /// Derives key material from the server secret.
    pub fn derive(secret: impl AsRef<str>) -> Result<Self> {
        let secret = secret.as_ref();

        let mut seed = [0u8; KEY_LENGTH];
        argon2::Argon2::default()
            .hash_password_into(secret.as_bytes(), SIGNING_SEED_SALT, &mut seed)
            .map_err(|e| AuthError::HashingFailed {
                reason: format!("Signing seed derivation failed: {e}"),
            })?;
        let signing = SigningKey::from_bytes(&seed);
        seed.zeroize();

        let sealing = crypto::derive_sealing_key(secret)?;

        Ok(Self { signing, sealing })
    }

    /// The AES key used for sealed single-purpose tokens.
    pub fn sealing_key(&self) -> &[u8; KEY_LENGTH] {
        &self.sealing
    }

    /// Issues a signed access token for the given claims.
    pub fn issue(&self, claims: &AccessClaims) -> Result<String> {
        let payload = serde_json::to_vec(claims)?;
        let signature = self.signing.sign(&payload);
        Ok(format!(
            "{}.{}",
            Base64Unpadded::encode_string(&payload),
            Base64Unpadded::encode_string(&signature.to_bytes())
        ))
    }

    /// Verifies a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: impl AsRef<str>, clock: &dyn Clock) -> Result<AccessClaims> {
        let token = token.as_ref();
        let (payload_b64, sig_b64) =
            token.split_once('.').ok_or_else(|| AuthError::TokenInvalid {
                reason: "missing signature separator".to_string(),
            })?;

        let payload =
            Base64Unpadded::decode_vec(payload_b64).map_err(|_| AuthError::TokenInvalid {
                reason: "payload is not base64".to_string(),
            })?;
        let sig_bytes =
            Base64Unpadded::decode_vec(sig_b64).map_err(|_| AuthError::TokenInvalid {
                reason: "signature is not base64".to_string(),
            })?;
        let signature =
            Signature::from_slice(&sig_bytes).map_err(|_| AuthError::TokenInvalid {
                reason: "signature has wrong length".to_string(),
            })?;

        let verifying: VerifyingKey = self.signing.verifying_key();
        verifying
            .verify(&payload, &signature)
            .map_err(|_| AuthError::TokenInvalid {
                reason: "signature verification failed".to_string(),
            })?;

        let claims: AccessClaims =
            serde_json::from_slice(&payload).map_err(|e| AuthError::TokenInvalid {
                reason: format!("claims unparsable: {e}"),
            })?;

        if claims.exp <= clock.now_millis() {
            return Err(AuthError::TokenExpired.into());
        }

        Ok(claims)
    }
}

/// Computes the expiry for a token issued now.
pub fn access_token_expiry(clock: &dyn Clock) -> u64 {
    clock.now_millis() + ACCESS_TOKEN_TTL_MILLIS
}
