//! [`Crypter`]: the per-process context tying a key pair to the cipher.

use tracing::info;

use crate::crypto::cipher::{self, CipherError};
use crate::crypto::token::Token;
use crate::key::derive::StrengthenedKey;
use crate::key::store::{KeyStore, KeyStoreError};
use crate::key::KeyPair;

/// A loaded key pair plus its cached [`StrengthenedKey`].
///
/// Construct once and share by reference or `Arc`. All methods take `&self` and
/// the contents never change, so concurrent use needs no locking.
#[derive(Debug, Clone)]
pub struct Crypter {
    pair: KeyPair,
    key: StrengthenedKey,
}

impl Crypter {
    /// Load (or create) the key pair from `store` and derive the working key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::Write`] or [`KeyStoreError::Random`] when a new
    /// key pair is needed but cannot be produced or saved.
    pub fn initialize(store: &KeyStore) -> Result<Self, KeyStoreError> {
        let pair = store.initialize()?;
        info!(public_key = pair.public_key(), "crypter initialised");
        Ok(Self::from_key_pair(pair))
    }

    /// Build a context around an existing key pair without touching disk.
    pub fn from_key_pair(pair: KeyPair) -> Self {
        let key = StrengthenedKey::derive(&pair);
        Self { pair, key }
    }

    /// The key pair this context encrypts under.
    pub fn key_pair(&self) -> &KeyPair {
        &self.pair
    }

    /// Encrypt `plaintext` into a [`Token`].
    ///
    /// # Errors
    ///
    /// See [`cipher::encrypt`].
    pub fn encrypt(&self, plaintext: &str) -> Result<Token, CipherError> {
        cipher::encrypt(plaintext, &self.key)
    }

    /// Verify and decrypt a token produced under the same key pair.
    ///
    /// # Errors
    ///
    /// See [`cipher::decrypt_verify`].
    pub fn decrypt_verify(&self, token: &str) -> Result<String, CipherError> {
        cipher::decrypt_verify(token, &self.key)
    }
}
