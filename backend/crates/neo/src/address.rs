//! Address derivation
//!
//! Deterministic mapping from a compressed P-256 public key to a Neo N3
//! address: build the single-signature verification script, hash it with
//! RIPEMD-160(SHA-256), Base58Check-encode with the N3 version byte.

use p256::ecdsa::VerifyingKey;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::error::{NeoError, NeoResult};

/// N3 address version byte
pub const ADDRESS_VERSION: u8 = 0x35;

/// Compressed SEC1 public key length
const PUBLIC_KEY_LEN: usize = 33;

/// Derive the wallet address for a compressed public key.
///
/// Fails with [`NeoError::InvalidPublicKey`] on malformed hex, wrong
/// length, or a point that is not on the curve.
pub fn address_from_public_key(public_key_hex: &str) -> NeoResult<String> {
    let key = decode_public_key(public_key_hex)?;
    let script = verification_script(&key);
    let script_hash = hash160(&script);
    Ok(bs58::encode(script_hash)
        .with_check_version(ADDRESS_VERSION)
        .into_string())
}

/// Decode and validate a compressed public key.
pub fn decode_public_key(public_key_hex: &str) -> NeoResult<[u8; PUBLIC_KEY_LEN]> {
    let bytes = hex::decode(public_key_hex)
        .map_err(|e| NeoError::InvalidPublicKey(format!("not valid hex: {e}")))?;

    let key: [u8; PUBLIC_KEY_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
        NeoError::InvalidPublicKey(format!("expected {PUBLIC_KEY_LEN} bytes, got {}", b.len()))
    })?;

    if key[0] != 0x02 && key[0] != 0x03 {
        return Err(NeoError::InvalidPublicKey(format!(
            "expected compressed key prefix 02/03, got {:02x}",
            key[0]
        )));
    }

    // Reject well-formed hex that is not a point on the curve
    VerifyingKey::from_sec1_bytes(&key)
        .map_err(|_| NeoError::InvalidPublicKey("not a valid P-256 point".to_string()))?;

    Ok(key)
}

/// Single-signature verification script:
/// `PUSHDATA1 0x21 <key> SYSCALL System.Crypto.CheckSig`
pub fn verification_script(public_key: &[u8; PUBLIC_KEY_LEN]) -> Vec<u8> {
    let mut script = Vec::with_capacity(2 + PUBLIC_KEY_LEN + 5);
    script.push(0x0c);
    script.push(PUBLIC_KEY_LEN as u8);
    script.extend_from_slice(public_key);
    script.push(0x41);
    script.extend_from_slice(&[0x56, 0xe7, 0xb3, 0x27]);
    script
}

/// RIPEMD-160 over SHA-256, the script-hash digest
fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "0307077e6f8cc500ac6993a90324d553b49e095b3f114674384a62174621c7694f";

    #[test]
    fn test_address_fixed_vector() {
        let address = address_from_public_key(KEY_HEX).unwrap();
        assert_eq!(address, "NWxZhS89HjdRw2ZushLjEZTdd51ErUFx6a");
    }

    #[test]
    fn test_address_is_deterministic() {
        let a = address_from_public_key(KEY_HEX).unwrap();
        let b = address_from_public_key(KEY_HEX).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_hex() {
        let err = address_from_public_key("zz077e6f").unwrap_err();
        assert!(matches!(err, NeoError::InvalidPublicKey(_)));
    }

    #[test]
    fn test_rejects_wrong_length() {
        // 32 bytes, one short
        let short = &KEY_HEX[..64];
        let err = address_from_public_key(short).unwrap_err();
        assert!(matches!(err, NeoError::InvalidPublicKey(_)));
    }

    #[test]
    fn test_rejects_uncompressed_prefix() {
        let mut key = String::from("04");
        key.push_str(&KEY_HEX[2..]);
        let err = address_from_public_key(&key).unwrap_err();
        assert!(matches!(err, NeoError::InvalidPublicKey(_)));
    }

    #[test]
    fn test_rejects_off_curve_point() {
        // Valid prefix and length, x coordinate of all 0xFF is not on the curve
        let bogus = format!("02{}", "ff".repeat(32));
        let err = address_from_public_key(&bogus).unwrap_err();
        assert!(matches!(err, NeoError::InvalidPublicKey(_)));
    }

    #[test]
    fn test_verification_script_layout() {
        let key = decode_public_key(KEY_HEX).unwrap();
        let script = verification_script(&key);
        assert_eq!(script.len(), 40);
        assert_eq!(&script[..2], &[0x0c, 0x21]);
        assert_eq!(&script[2..35], &key);
        assert_eq!(&script[35..], &[0x41, 0x56, 0xe7, 0xb3, 0x27]);
    }
}
