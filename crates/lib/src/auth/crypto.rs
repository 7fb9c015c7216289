//! Cryptographic functions for the auth system
//!
//! Provides password hashing and sealed single-purpose tokens using:
//! - Argon2id for password hashing and key derivation
//! - AES-256-GCM for sealing email-proof and password-reset tokens

use aes_gcm::{
    Aes256Gcm, KeyInit, Nonce,
    aead::{Aead, AeadCore, OsRng},
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};
use zeroize::Zeroize;

use super::errors::AuthError;
use crate::Result;

/// Nonce length for AES-GCM (12 bytes standard)
pub const NONCE_LENGTH: usize = 12;

/// Derived key length for AES-256 (32 bytes)
pub const KEY_LENGTH: usize = 32;

/// Application salt for deriving the token-sealing key from the server secret.
const TOKEN_KEY_SALT: &[u8] = b"bazaar/sealed-token/v1";

/// Hash a password using Argon2id
///
/// # Returns
/// The Argon2 hash string in PHC format, with the salt embedded.
pub fn hash_password(password: impl AsRef<str>) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| AuthError::HashingFailed {
            reason: format!("Password hashing failed: {e}"),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored hash
///
/// # Returns
/// Ok(()) if the password is correct, Err otherwise
pub fn verify_password(password: impl AsRef<str>, password_hash: impl AsRef<str>) -> Result<()> {
    let parsed_hash = PasswordHash::new(password_hash.as_ref()).map_err(|e| {
        AuthError::HashingFailed {
            reason: format!("Stored hash unparsable: {e}"),
        }
    })?;

    Argon2::default()
        .verify_password(password.as_ref().as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::WrongPassword.into())
}

/// Derive a 32-byte sealing key from the server secret using Argon2id
pub fn derive_sealing_key(secret: impl AsRef<str>) -> Result<[u8; KEY_LENGTH]> {
    let mut key = [0u8; KEY_LENGTH];
    Argon2::default()
        .hash_password_into(secret.as_ref().as_bytes(), TOKEN_KEY_SALT, &mut key)
        .map_err(|e| AuthError::HashingFailed {
            reason: format!("Key derivation failed: {e}"),
        })?;
    Ok(key)
}

/// Seal a plaintext payload into an opaque token string
///
/// The output is `hex(ciphertext).hex(nonce)`; the nonce is generated
/// fresh per seal.
pub fn seal(plaintext: impl AsRef<[u8]>, key: &[u8; KEY_LENGTH]) -> Result<String> {
    let cipher = Aes256Gcm::new(key.into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_ref())
        .map_err(|e| AuthError::SealFailed {
            reason: format!("Encryption failed: {e}"),
        })?;

    Ok(format!("{}.{}", hex::encode(ciphertext), hex::encode(nonce)))
}

/// Open a sealed token string, returning the plaintext payload
pub fn open(token: impl AsRef<str>, key: &[u8; KEY_LENGTH]) -> Result<Vec<u8>> {
    let token = token.as_ref();
    let (cipher_hex, nonce_hex) = token.split_once('.').ok_or_else(|| AuthError::TokenInvalid {
        reason: "missing nonce separator".to_string(),
    })?;

    let mut ciphertext = hex::decode(cipher_hex).map_err(|_| AuthError::TokenInvalid {
        reason: "ciphertext is not hex".to_string(),
    })?;
    let nonce_bytes = hex::decode(nonce_hex).map_err(|_| AuthError::TokenInvalid {
        reason: "nonce is not hex".to_string(),
    })?;
    if nonce_bytes.len() != NONCE_LENGTH {
        ciphertext.zeroize();
        return Err(AuthError::TokenInvalid {
            reason: "nonce has wrong length".to_string(),
        }
        .into());
    }

    let cipher = Aes256Gcm::new(key.into());
    let nonce = Nonce::from_slice(&nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext.as_ref())
        .map_err(|_| AuthError::TokenInvalid {
            reason: "decryption failed".to_string(),
        }
        .into())
}
