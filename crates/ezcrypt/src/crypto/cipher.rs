//! Encrypt-then-MAC with AES-256-CBC (PKCS#7) and HMAC-SHA256.
//!
//! **Ordering matters.** [`decrypt_verify`] checks the tag in constant time
//! before touching the cipher. Reversing that order turns padding errors into
//! a padding oracle.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

use super::token::Token;
use crate::key::derive::StrengthenedKey;
use crate::random::{random_bytes, RandomError};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Byte length of the CBC initialisation vector (one AES block).
pub const IV_LEN: usize = 16;

/// Byte length of an HMAC-SHA256 tag.
pub const TAG_LEN: usize = 32;

/// Character width of the base64-encoded tag at the front of every token.
pub const TAG_B64_LEN: usize = base64_len(TAG_LEN);

/// Padded standard base64 length for `n` input bytes: `4 * ceil(n / 3)`.
pub const fn base64_len(n: usize) -> usize {
    n.div_ceil(3) * 4
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The tag did not verify, or the token could not be split into a tag and
    /// payload. Decryption was not attempted.
    #[error("Authentication failed. The data may have been tampered with.")]
    Authentication,

    /// The token authenticated but its ciphertext, padding, or UTF-8 was invalid.
    #[error("decryption failed: {0}")]
    Decryption(&'static str),

    /// A fresh IV could not be drawn.
    #[error(transparent)]
    Random(#[from] RandomError),

    /// The MAC could not be keyed.
    #[error("invalid key length")]
    InvalidKeyLength,
}

/// Encrypt `plaintext` under `key` into a [`Token`].
///
/// A fresh random IV is drawn from the OS CSPRNG for every call, so encrypting
/// the same text twice yields different tokens.
///
/// # Errors
///
/// Returns [`CipherError::Random`] if the IV cannot be generated.
pub fn encrypt(plaintext: &str, key: &StrengthenedKey) -> Result<Token, CipherError> {
    let iv = random_bytes::<IV_LEN>()?;
    let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let mut payload = Vec::with_capacity(IV_LEN + ciphertext.len());
    payload.extend_from_slice(&iv);
    payload.extend_from_slice(&ciphertext);

    let tag: [u8; TAG_LEN] = keyed_mac(key, &payload)?.finalize().into_bytes().into();
    Ok(Token::encode(&tag, &payload))
}

/// Verify `token` under `key` and, only if authentic, decrypt it.
///
/// # Errors
///
/// Returns [`CipherError::Authentication`] if the token is malformed or the tag
/// does not match, and [`CipherError::Decryption`] if an authentic payload does
/// not decrypt to valid UTF-8.
pub fn decrypt_verify(token: &str, key: &StrengthenedKey) -> Result<String, CipherError> {
    let parts = Token::decode(token).map_err(|e| {
        debug!(error = %e, "rejecting malformed token");
        CipherError::Authentication
    })?;

    keyed_mac(key, &parts.payload)?
        .verify_slice(&parts.tag)
        .map_err(|_| CipherError::Authentication)?;

    if parts.payload.len() < IV_LEN {
        return Err(CipherError::Decryption("payload shorter than IV"));
    }
    let (iv, ciphertext) = parts.payload.split_at(IV_LEN);
    let mut iv_block = [0u8; IV_LEN];
    iv_block.copy_from_slice(iv);

    let plaintext = Aes256CbcDec::new(key.as_bytes().into(), &iv_block.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::Decryption("invalid padding"))?;

    String::from_utf8(plaintext).map_err(|_| CipherError::Decryption("plaintext is not UTF-8"))
}

fn keyed_mac(key: &StrengthenedKey, payload: &[u8]) -> Result<HmacSha256, CipherError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key.as_bytes())
        .map_err(|_| CipherError::InvalidKeyLength)?;
    mac.update(payload);
    Ok(mac)
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    use super::*;
    use crate::key::KeyPair;

    fn random_key() -> StrengthenedKey {
        StrengthenedKey::derive(&KeyPair::generate().unwrap())
    }

    /// Build a token whose tag is valid for an arbitrary payload.
    fn forge_authentic(key: &StrengthenedKey, payload: &[u8]) -> String {
        let tag: [u8; TAG_LEN] = keyed_mac(key, payload).unwrap().finalize().into_bytes().into();
        Token::encode(&tag, payload).into_string()
    }

    #[test]
    fn tag_width_follows_base64_expansion() {
        assert_eq!(TAG_B64_LEN, 44);
        assert_eq!(base64_len(0), 0);
        assert_eq!(base64_len(1), 4);
        assert_eq!(base64_len(48), 64);
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = random_key();
        let long = "x".repeat(1000);
        for text in ["", "a", "user@example.com", "héllo wörld ✓", long.as_str()] {
            let token = encrypt(text, &key).unwrap();
            assert_eq!(decrypt_verify(token.as_str(), &key).unwrap(), text);
        }
    }

    #[test]
    fn token_length_tracks_padded_plaintext() {
        let key = random_key();
        // 15 bytes pads to one block; 16 bytes gains a full padding block.
        assert_eq!(encrypt(&"a".repeat(15), &key).unwrap().as_str().len(), 44 + 44);
        assert_eq!(encrypt(&"a".repeat(16), &key).unwrap().as_str().len(), 44 + 64);
    }

    #[test]
    fn prefix_decodes_to_tag() {
        let key = random_key();
        let token = encrypt("hello", &key).unwrap();
        let tag = STANDARD.decode(&token.as_str()[..TAG_B64_LEN]).unwrap();
        assert_eq!(tag.len(), TAG_LEN);
    }

    #[test]
    fn same_plaintext_gives_fresh_tokens() {
        let key = random_key();
        let a = encrypt("repeat", &key).unwrap();
        let b = encrypt("repeat", &key).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let token = encrypt("secret", &random_key()).unwrap();
        assert!(matches!(
            decrypt_verify(token.as_str(), &random_key()),
            Err(CipherError::Authentication)
        ));
    }

    #[test]
    fn every_single_character_mutation_is_rejected() {
        let key = random_key();
        let token = encrypt("tamper me", &key).unwrap().into_string();
        for (i, original) in token.char_indices() {
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(i..i + 1, &replacement.to_string());
            assert!(
                matches!(decrypt_verify(&tampered, &key), Err(CipherError::Authentication)),
                "mutation at {i} was not rejected"
            );
        }
    }

    #[test]
    fn truncated_token_fails_authentication() {
        let key = random_key();
        let token = encrypt("short", &key).unwrap();
        let s = token.as_str();
        assert!(matches!(decrypt_verify(&s[..20], &key), Err(CipherError::Authentication)));
        assert!(matches!(
            decrypt_verify(&s[..s.len() - 4], &key),
            Err(CipherError::Authentication)
        ));
    }

    #[test]
    fn authentic_but_short_payload_is_decryption_error() {
        let key = random_key();
        let token = forge_authentic(&key, &[0u8; 8]);
        assert!(matches!(decrypt_verify(&token, &key), Err(CipherError::Decryption(_))));
    }

    #[test]
    fn authentic_but_bad_padding_is_decryption_error() {
        let key = random_key();
        // IV plus one block that is not a whole number of blocks after the IV.
        let token = forge_authentic(&key, &[0u8; IV_LEN + 5]);
        assert!(matches!(decrypt_verify(&token, &key), Err(CipherError::Decryption(_))));
    }

    #[test]
    fn authentic_but_non_utf8_is_decryption_error() {
        let key = random_key();
        let iv = [3u8; IV_LEN];
        let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(&[0xFF, 0xFE, 0xFD]);
        let payload = [iv.as_slice(), ciphertext.as_slice()].concat();
        let token = forge_authentic(&key, &payload);
        assert!(matches!(decrypt_verify(&token, &key), Err(CipherError::Decryption(_))));
    }

    #[test]
    fn authentication_error_mentions_tampering() {
        assert!(CipherError::Authentication.to_string().contains("tampered"));
    }
}
