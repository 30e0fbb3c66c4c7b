//! AES-256-CBC + HMAC-SHA256 Encrypt-then-MAC primitives.
//!
//! This module is free of file and HTTP concerns. It takes a
//! [`StrengthenedKey`](crate::StrengthenedKey) and produces or consumes
//! [`Token`](token::Token)s.
//!
//! # Token format
//!
//! ```text
//! base64(auth_tag) || base64(iv || ciphertext)
//! ```
//!
//! The MAC covers the IV and ciphertext and is checked before any decryption
//! takes place, so padding errors are only ever observable on authentic input.

pub mod cipher;
pub mod token;

pub use cipher::{decrypt_verify, encrypt, CipherError};
