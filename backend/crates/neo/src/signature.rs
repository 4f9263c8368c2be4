//! Signature verification
//!
//! Boolean gate over the wallet envelope: `true` only when the signature
//! checks out against the pre-image and public key. Structural problems
//! with the input are logged at debug level and reported as `false` so the
//! caller cannot distinguish "bad signature" from "garbage signature".

use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};

use crate::address::decode_public_key;
use crate::error::{NeoError, NeoResult};
use crate::preimage::wrap;

/// Raw r||s signature length
const SIGNATURE_LEN: usize = 64;

/// Verify `signature_hex` over the wallet envelope of `message` with the
/// given compressed public key. Never panics, never returns an error.
pub fn verify(message: &str, signature_hex: &str, public_key_hex: &str) -> bool {
    match try_verify(message, signature_hex, public_key_hex) {
        Ok(valid) => valid,
        Err(err) => {
            tracing::debug!(error = %err, "rejected structurally invalid signature input");
            false
        }
    }
}

fn try_verify(message: &str, signature_hex: &str, public_key_hex: &str) -> NeoResult<bool> {
    let key_bytes = decode_public_key(public_key_hex)?;
    // decode_public_key already proved this parses
    let verifying_key = VerifyingKey::from_sec1_bytes(&key_bytes)
        .map_err(|_| NeoError::InvalidPublicKey("not a valid P-256 point".to_string()))?;

    let signature = decode_signature(signature_hex)?;
    let preimage = wrap(message);

    // ECDSA-SHA256 over the 36-byte sign data, matching the wallet
    Ok(verifying_key.verify(&preimage, &signature).is_ok())
}

fn decode_signature(signature_hex: &str) -> NeoResult<Signature> {
    let bytes = hex::decode(signature_hex)
        .map_err(|e| NeoError::InvalidSignature(format!("not valid hex: {e}")))?;

    if bytes.len() != SIGNATURE_LEN {
        return Err(NeoError::InvalidSignature(format!(
            "expected {SIGNATURE_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    Signature::from_slice(&bytes)
        .map_err(|_| NeoError::InvalidSignature("r or s out of range".to_string()))
}
