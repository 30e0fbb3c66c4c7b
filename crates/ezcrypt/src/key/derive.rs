//! [`StrengthenedKey`]: the single symmetric key derived from a [`KeyPair`].

use sha2::{Digest, Sha256};

use super::KeyPair;

/// Byte length of the derived key (AES-256 and HMAC-SHA256 key size).
pub const STRENGTHENED_KEY_LEN: usize = 32;

/// `SHA-256(secretKey || publicKey)` over the UTF-8 hex strings.
///
/// The concatenation order is part of the token contract: swapping it silently
/// produces a different key and every existing token stops verifying.
///
/// Never persisted. The bytes are zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct StrengthenedKey([u8; STRENGTHENED_KEY_LEN]);

impl StrengthenedKey {
    /// Derive the key for `pair`. Pure and deterministic.
    pub fn derive(pair: &KeyPair) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(pair.secret_key().as_bytes());
        hasher.update(pair.public_key().as_bytes());
        Self(hasher.finalize().into())
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; STRENGTHENED_KEY_LEN] {
        &self.0
    }
}

impl Drop for StrengthenedKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for StrengthenedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StrengthenedKey([REDACTED])")
    }
}
