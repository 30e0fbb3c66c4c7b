//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    ErrorResponse, GenerateHashRequest, GenerateHashResponse, HealthResponse, ReadHashRequest,
    ReadHashResponse,
};
use common::ServiceError;
use ezcrypt::CipherError;
use tracing::{error, warn};

use super::state::AppState;

/// `POST /generateHash` — encrypt `text` into an authenticated token.
pub async fn generate_hash(
    State(state): State<AppState>,
    Json(req): Json<GenerateHashRequest>,
) -> Response {
    match state.crypter.encrypt(&req.text) {
        Ok(token) => (
            StatusCode::OK,
            Json(GenerateHashResponse {
                hash: token.into_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "encryption failed");
            error_response(service_error(e))
        }
    }
}

/// `POST /readHash` — verify a token and return its plaintext.
///
/// Tokens that fail authentication are rejected before any decryption is
/// attempted.
pub async fn read_hash(State(state): State<AppState>, Json(req): Json<ReadHashRequest>) -> Response {
    match state.crypter.decrypt_verify(&req.hash) {
        Ok(decrypted_text) => {
            (StatusCode::OK, Json(ReadHashResponse { decrypted_text })).into_response()
        }
        Err(e) => {
            warn!(error = %e, "token rejected");
            error_response(service_error(e))
        }
    }
}

/// `GET /health` — liveness check.
///
/// The key pair is loaded before the listener binds, so a responding server is
/// always ready.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

fn service_error(e: CipherError) -> ServiceError {
    match e {
        CipherError::Authentication => ServiceError::AuthenticationFailed(e.to_string()),
        CipherError::Decryption(_) => ServiceError::DecryptionFailed(e.to_string()),
        CipherError::Random(_) | CipherError::InvalidKeyLength => {
            ServiceError::Internal(e.to_string())
        }
    }
}

fn error_response(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.to_response())).into_response()
}
