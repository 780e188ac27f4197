//! Salted secret hashing and verification.
//!
//! Stored form: `base64(salt ‖ SHA-256(salt ‖ secret))` with a 16-byte
//! random salt. The layout is fixed, so verification can split the
//! decoded bytes positionally without a separate header.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use curb_types::HashedSecret;

use crate::error::CryptoError;

/// Salt length in bytes, prepended to the digest in the stored form.
const SALT_LEN: usize = 16;
/// SHA-256 digest length in bytes.
const DIGEST_LEN: usize = 32;

/// Salted one-way hashing and verification of actor secrets.
///
/// Stateless; a single shared instance serves all callers.
#[derive(Clone, Copy, Debug, Default)]
pub struct CredentialVault;

impl CredentialVault {
    pub fn new() -> Self {
        Self
    }

    /// Hash a secret under a fresh random salt.
    ///
    /// Fails only if the OS random source cannot produce the salt.
    pub fn hash(&self, secret: &str) -> Result<HashedSecret, CryptoError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| CryptoError::CryptoUnavailable(e.to_string()))?;
        Ok(HashedSecret::from_encoded(BASE64.encode(combine(
            &salt,
            &digest(&salt, secret),
        ))))
    }

    /// Verify a secret against a stored salt‖digest value.
    ///
    /// Returns `false` on any mismatch, malformed encoding, or wrong
    /// length: an authentication failure must never escape this boundary
    /// as an error. The digest comparison runs in constant time.
    pub fn verify(&self, secret: &str, stored: &HashedSecret) -> bool {
        let Ok(combined) = BASE64.decode(stored.as_str()) else {
            return false;
        };
        if combined.len() != SALT_LEN + DIGEST_LEN {
            return false;
        }
        let (salt, expected) = combined.split_at(SALT_LEN);
        let computed = digest(salt, secret);
        computed.as_slice().ct_eq(expected).into()
    }
}

fn digest(salt: &[u8], secret: &str) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(secret.as_bytes());
    hasher.finalize().into()
}

fn combine(salt: &[u8], digest: &[u8]) -> Vec<u8> {
    let mut combined = Vec::with_capacity(salt.len() + digest.len());
    combined.extend_from_slice(salt);
    combined.extend_from_slice(digest);
    combined
}
