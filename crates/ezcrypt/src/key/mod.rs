//! Key material: the persisted [`KeyPair`] and the key derived from it.
//!
//! # Lifecycle
//!
//! 1. [`store::KeyStore::initialize`] loads the key file, or generates and
//!    persists a fresh pair when the file is missing or corrupt.
//! 2. [`derive::StrengthenedKey::derive`] hashes both halves into the single
//!    symmetric key used for encryption and authentication.
//! 3. The pair is read-only afterwards. There is no rotation or expiry.

pub mod derive;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::random::{random_bytes, RandomError};

/// Byte length of the public half before hex encoding.
pub const PUBLIC_KEY_LEN: usize = 16;

/// Byte length of the secret half before hex encoding.
pub const SECRET_KEY_LEN: usize = 32;

/// A long-lived key pair, stored as hex strings exactly as they appear on disk.
///
/// Serialises to `{"publicKey": "<32 hex>", "secretKey": "<64 hex>"}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    public_key: String,
    secret_key: String,
}

impl KeyPair {
    /// Generate a fresh key pair from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`RandomError`] if the secure random source is unavailable.
    pub fn generate() -> Result<Self, RandomError> {
        let public = random_bytes::<PUBLIC_KEY_LEN>()?;
        let secret = random_bytes::<SECRET_KEY_LEN>()?;
        Ok(Self {
            public_key: hex::encode(public),
            secret_key: hex::encode(secret),
        })
    }

    /// Build a key pair from existing hex strings, checking their shape.
    ///
    /// Returns `None` unless `public_key` is [`PUBLIC_KEY_LEN`] bytes and
    /// `secret_key` is [`SECRET_KEY_LEN`] bytes of valid hex.
    pub fn from_hex(public_key: impl Into<String>, secret_key: impl Into<String>) -> Option<Self> {
        let pair = Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        };
        pair.is_well_formed().then_some(pair)
    }

    /// Hex-encoded public half.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Hex-encoded secret half.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// `true` when both halves are hex strings of the expected byte lengths.
    pub(crate) fn is_well_formed(&self) -> bool {
        is_hex_of_len(&self.public_key, PUBLIC_KEY_LEN)
            && is_hex_of_len(&self.secret_key, SECRET_KEY_LEN)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

fn is_hex_of_len(s: &str, byte_len: usize) -> bool {
    hex::decode(s).is_ok_and(|bytes| bytes.len() == byte_len)
}
