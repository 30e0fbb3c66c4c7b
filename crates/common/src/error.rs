//! Service-level error type shared by the HTTP layer.

use thiserror::Error;

use crate::protocol::ErrorResponse;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::AuthenticationFailed`] → 400
/// - [`ServiceError::DecryptionFailed`] → 400
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The token did not authenticate under the service key.
    #[error("{0}")]
    AuthenticationFailed(String),

    /// The token authenticated but could not be decrypted.
    #[error("{0}")]
    DecryptionFailed(String),

    /// An unexpected internal error occurred (e.g. the random source failed).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::AuthenticationFailed(_) => 400,
            ServiceError::DecryptionFailed(_) => 400,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in [`ErrorResponse::code`].
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::AuthenticationFailed(_) => "authentication_failed",
            ServiceError::DecryptionFailed(_) => "decryption_failed",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    /// Render this error as the standard response body.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.to_string())
    }
}
