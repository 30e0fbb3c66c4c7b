//! End-to-end behaviour of a key file backed [`Crypter`].

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ezcrypt::{CipherError, Crypter, KeyStore, KEY_FILE_NAME, TAG_B64_LEN, TAG_LEN};
use tempfile::TempDir;

const USER_EMAIL: &str = "user@example.com";

fn crypter_in(dir: &TempDir) -> (KeyStore, Crypter) {
    let store = KeyStore::new(dir.path().join(KEY_FILE_NAME));
    let crypter = Crypter::initialize(&store).expect("initialise crypter");
    (store, crypter)
}

#[test]
fn email_token_is_108_characters_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let (_, crypter) = crypter_in(&dir);

    let token = crypter.encrypt(USER_EMAIL).unwrap();
    assert_eq!(token.as_str().len(), 108);

    let tag = STANDARD.decode(&token.as_str()[..TAG_B64_LEN]).unwrap();
    assert_eq!(tag.len(), TAG_LEN);

    assert_eq!(crypter.decrypt_verify(token.as_str()).unwrap(), USER_EMAIL);
}

#[test]
fn replacing_a_character_everywhere_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, crypter) = crypter_in(&dir);
    let token = crypter.encrypt(USER_EMAIL).unwrap().into_string();

    // Pick a character that is guaranteed to occur in the token.
    let target = token.chars().nth(60).unwrap();
    let replacement = if target == 'B' { 'C' } else { 'B' };
    let tampered = token.replace(target, &replacement.to_string());
    assert_ne!(tampered, token);

    let err = crypter.decrypt_verify(&tampered).unwrap_err();
    assert!(matches!(err, CipherError::Authentication));
    assert!(err.to_string().contains("tampered"));
}

#[test]
fn reinitialising_reuses_the_persisted_pair() {
    let dir = tempfile::tempdir().unwrap();
    let (store, first) = crypter_in(&dir);
    let second = Crypter::initialize(&store).unwrap();
    assert_eq!(first.key_pair(), second.key_pair());

    let token = first.encrypt("survives restart").unwrap();
    assert_eq!(second.decrypt_verify(token.as_str()).unwrap(), "survives restart");
}

#[test]
fn deleted_key_file_is_recreated_with_new_pair() {
    let dir = tempfile::tempdir().unwrap();
    let (store, original) = crypter_in(&dir);
    let token = original.encrypt(USER_EMAIL).unwrap();

    std::fs::remove_file(store.path()).unwrap();
    let fresh = Crypter::initialize(&store).unwrap();

    assert!(store.path().exists());
    let raw = std::fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["publicKey"].as_str().unwrap().len(), 32);
    assert_eq!(json["secretKey"].as_str().unwrap().len(), 64);

    assert_ne!(original.key_pair(), fresh.key_pair());
    assert!(matches!(
        fresh.decrypt_verify(token.as_str()),
        Err(CipherError::Authentication)
    ));
}

#[test]
fn corrupt_key_file_self_heals() {
    let dir = tempfile::tempdir().unwrap();
    let store = KeyStore::new(dir.path().join(KEY_FILE_NAME));
    std::fs::write(store.path(), b"\x00\x01 not a key file").unwrap();

    let crypter = Crypter::initialize(&store).unwrap();
    assert_eq!(&store.load().unwrap(), crypter.key_pair());
}

#[test]
fn shared_crypter_serves_concurrent_callers() {
    let dir = tempfile::tempdir().unwrap();
    let (_, crypter) = crypter_in(&dir);
    let crypter = Arc::new(crypter);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let crypter = Arc::clone(&crypter);
            std::thread::spawn(move || {
                let text = format!("message {i}");
                let token = crypter.encrypt(&text).unwrap();
                assert_eq!(crypter.decrypt_verify(token.as_str()).unwrap(), text);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
