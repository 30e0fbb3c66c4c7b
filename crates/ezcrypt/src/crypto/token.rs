//! Text layout of the opaque token.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use super::cipher::{TAG_B64_LEN, TAG_LEN};

/// Errors from splitting or decoding a token string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Fewer than [`TAG_B64_LEN`] characters, or the split falls inside a
    /// multi-byte character.
    #[error("token too short to hold an authentication tag")]
    TooShort,

    /// The tag prefix is not canonical base64 of exactly [`TAG_LEN`] bytes.
    #[error("invalid authentication tag encoding")]
    InvalidTag,

    /// The payload suffix is not canonical base64.
    #[error("invalid payload encoding")]
    InvalidPayload,
}

/// An encrypted, authenticated token: `base64(tag) || base64(iv || ciphertext)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

/// The decoded halves of a [`Token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParts {
    /// Raw HMAC tag bytes.
    pub tag: [u8; TAG_LEN],
    /// Raw `iv || ciphertext` bytes.
    pub payload: Vec<u8>,
}

impl Token {
    /// Encode `tag` and `payload` into the token layout.
    pub fn encode(tag: &[u8; TAG_LEN], payload: &[u8]) -> Self {
        let mut s = STANDARD.encode(tag);
        STANDARD.encode_string(payload, &mut s);
        Self(s)
    }

    /// Split `s` at the fixed tag width and decode both halves.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenError`] describing which half is malformed.
    pub fn decode(s: &str) -> Result<TokenParts, TokenError> {
        let (tag_b64, payload_b64) = match (s.get(..TAG_B64_LEN), s.get(TAG_B64_LEN..)) {
            (Some(tag), Some(payload)) => (tag, payload),
            _ => return Err(TokenError::TooShort),
        };

        let tag = STANDARD
            .decode(tag_b64)
            .ok()
            .and_then(|bytes| <[u8; TAG_LEN]>::try_from(bytes).ok())
            .ok_or(TokenError::InvalidTag)?;

        let payload = STANDARD
            .decode(payload_b64)
            .map_err(|_| TokenError::InvalidPayload)?;

        Ok(TokenParts { tag, payload })
    }

    /// Borrow the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}
