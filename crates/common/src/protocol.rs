//! Request and response bodies exchanged over the HTTP API.
//!
//! Field names follow the wire format exactly (`text`, `hash`, `decryptedText`).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Generate endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /generateHash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateHashRequest {
    /// Plaintext to encrypt.
    pub text: String,
}

/// Successful response body for `POST /generateHash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateHashResponse {
    /// The opaque authenticated token.
    pub hash: String,
}

// ---------------------------------------------------------------------------
// Read endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /readHash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadHashRequest {
    /// Token previously returned by `POST /generateHash`.
    pub hash: String,
}

/// Successful response body for `POST /readHash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadHashResponse {
    /// The verified, decrypted plaintext.
    pub decrypted_text: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"authentication_failed"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status; always `"ok"` once the server is listening.
    pub status: String,
    /// Crate version of the running server.
    pub version: String,
}
