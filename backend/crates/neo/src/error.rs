//! Neo Error Types

use thiserror::Error;

/// Result type alias for wallet-format operations
pub type NeoResult<T> = Result<T, NeoError>;

/// Errors raised while decoding wallet material.
///
/// Signature *mismatch* is not an error; see [`crate::signature::verify`].
#[derive(Debug, Clone, Error)]
pub enum NeoError {
    /// Public key is not valid hex, not 33 bytes, or not a P-256 point
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Signature is not valid hex or not a 64-byte r||s pair
    #[error("Invalid signature encoding: {0}")]
    InvalidSignature(String),
}
