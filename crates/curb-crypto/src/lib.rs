//! Cryptographic credential handling for Curbline.
//!
//! Provides salted one-way hashing and constant-time verification of
//! actor secrets. All operations wrap established libraries; there is no
//! custom cryptography here.

pub mod error;
pub mod vault;

pub use error::CryptoError;
pub use vault::CredentialVault;
