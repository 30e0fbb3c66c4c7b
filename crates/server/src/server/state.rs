//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use ezcrypt::Crypter;

/// Application state shared across all request handlers.
///
/// The [`Crypter`] is read-only after startup, so an `Arc` is all the sharing
/// it needs.
#[derive(Clone)]
pub struct AppState {
    /// Key pair and derived key used for every request.
    pub crypter: Arc<Crypter>,
}

impl AppState {
    /// Create a new [`AppState`] around an initialised [`Crypter`].
    pub fn new(crypter: Crypter) -> Self {
        Self {
            crypter: Arc::new(crypter),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State backed by a freshly generated in-memory key pair.
    pub fn ephemeral() -> Self {
        let pair = ezcrypt::KeyPair::generate().expect("OS random source");
        Self::new(Crypter::from_key_pair(pair))
    }
}
