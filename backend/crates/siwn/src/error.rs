//! SIWN Error Types
//!
//! This module provides SIWN-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// SIWN-specific result type alias
pub type SiwnResult<T> = Result<T, SiwnError>;

/// SIWN-specific error variants
///
/// Every login failure is terminal for the request; nothing is retried
/// internally. The variant records the precise cause for logging and tests
/// while [`SiwnError::client_message`] controls what a client may learn.
#[derive(Debug, Error)]
pub enum SiwnError {
    /// Required request input absent or blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Challenge text failed structural parsing
    #[error("Malformed sign-in message: {0}")]
    MalformedMessage(String),

    /// Claimed domain not covered by the allow-list
    #[error("Domain is not allowed")]
    DomainRejected,

    /// Message domain differs from the expected one
    #[error("Domain does not match")]
    DomainMismatch,

    /// Message nonce differs from the expected one
    #[error("Nonce does not match")]
    NonceMismatch,

    /// Expiration time lies before the validation time
    #[error("Message has expired")]
    MessageExpired,

    /// Issued-at lies after the validation time
    #[error("Message issued-at is in the future")]
    IssuedInFuture,

    /// Public key failed to decode
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Derived address differs from the claimed address
    #[error("Public key does not match the address")]
    KeyAddressMismatch,

    /// Signature did not verify against the message and key
    #[error("Signature verification failed")]
    InvalidSignature,

    /// No live (address, nonce) record was available to consume
    #[error("Invalid or expired nonce")]
    InvalidOrExpiredNonce,

    /// Required configuration absent or unparsable
    #[error("Missing or invalid configuration: {0}")]
    Configuration(&'static str),

    /// Identity store call failed
    #[error("Identity store error: {0}")]
    IdentityStore(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl SiwnError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SiwnError::MissingField(_)
            | SiwnError::MalformedMessage(_)
            | SiwnError::DomainRejected
            | SiwnError::DomainMismatch
            | SiwnError::InvalidPublicKey
            | SiwnError::KeyAddressMismatch => ErrorKind::BadRequest,
            SiwnError::NonceMismatch
            | SiwnError::MessageExpired
            | SiwnError::IssuedInFuture
            | SiwnError::InvalidSignature
            | SiwnError::InvalidOrExpiredNonce => ErrorKind::Unauthorized,
            SiwnError::Configuration(_)
            | SiwnError::IdentityStore(_)
            | SiwnError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Client-visible message.
    ///
    /// Signature and nonce failures collapse into one generic message so
    /// the endpoint cannot be used as an oracle to distinguish a bad
    /// signature from a spent or expired nonce.
    pub fn client_message(&self) -> String {
        match self {
            SiwnError::InvalidSignature
            | SiwnError::InvalidOrExpiredNonce
            | SiwnError::NonceMismatch => "Authentication failed".to_string(),
            SiwnError::MalformedMessage(_) => "Malformed sign-in message".to_string(),
            other if other.kind().is_server_error() => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to AppError for the HTTP layer
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.client_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            SiwnError::Database(e) => {
                tracing::error!(error = %e, "SIWN database error");
            }
            SiwnError::IdentityStore(msg) => {
                tracing::error!(message = %msg, "Identity store failure");
            }
            SiwnError::Configuration(name) => {
                tracing::error!(variable = %name, "Missing server configuration");
            }
            SiwnError::InvalidSignature | SiwnError::InvalidOrExpiredNonce => {
                tracing::warn!(error = %self, "Login attempt rejected");
            }
            _ => {
                tracing::debug!(error = %self, "SIWN request error");
            }
        }
    }
}

impl IntoResponse for SiwnError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<neo::NeoError> for SiwnError {
    fn from(err: neo::NeoError) -> Self {
        match err {
            neo::NeoError::InvalidPublicKey(detail) => {
                tracing::debug!(detail = %detail, "Rejected public key");
                SiwnError::InvalidPublicKey
            }
            neo::NeoError::InvalidSignature(detail) => {
                tracing::debug!(detail = %detail, "Rejected signature encoding");
                SiwnError::InvalidSignature
            }
        }
    }
}
