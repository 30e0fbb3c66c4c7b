//! Local authenticated encryption of text into opaque tokens.
//!
//! A long-lived [`KeyPair`] is loaded from (or generated into) a key file by the
//! [`KeyStore`]. Both halves are compressed into a single 32-byte
//! [`StrengthenedKey`] that drives AES-256-CBC and HMAC-SHA256 in an
//! Encrypt-then-MAC construction.
//!
//! # Token format
//!
//! ```text
//! base64(hmac_sha256(key, iv || ciphertext)) || base64(iv || ciphertext)
//! ```
//!
//! The tag is always [`TAG_B64_LEN`] characters wide, so the decoder splits at a
//! fixed offset. There is no separator and no algorithm or version marker.
//!
//! # Usage
//!
//! Build one [`Crypter`] per process and share it by reference (or `Arc`):
//!
//! ```no_run
//! use ezcrypt::{Crypter, KeyStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let crypter = Crypter::initialize(&KeyStore::default())?;
//! let token = crypter.encrypt("user@example.com")?;
//! assert_eq!(crypter.decrypt_verify(token.as_str())?, "user@example.com");
//! # Ok(())
//! # }
//! ```
//!
//! # Known race
//!
//! Key-file writes are not coordinated across processes. Two processes that start
//! against a missing key file at the same moment may each persist a different
//! key pair; the last writer wins and tokens produced by the other process can no
//! longer be decrypted.

pub mod context;
pub mod crypto;
pub mod key;
pub mod random;

pub use context::Crypter;
pub use crypto::cipher::{CipherError, IV_LEN, TAG_B64_LEN, TAG_LEN};
pub use crypto::token::Token;
pub use key::derive::{StrengthenedKey, STRENGTHENED_KEY_LEN};
pub use key::store::{KeyStore, KeyStoreError, KEY_FILE_MODE, KEY_FILE_NAME};
pub use key::{KeyPair, PUBLIC_KEY_LEN, SECRET_KEY_LEN};
pub use random::RandomError;
