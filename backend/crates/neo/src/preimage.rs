//! Signature pre-image
//!
//! Neo wallet extensions do not sign raw text. The message is embedded in
//! a zeroed pseudo-transaction and the actual sign data is
//! `network magic (u32 LE) || sha256(pseudo-transaction)`, the same shape
//! real transactions are signed with. This module reproduces that envelope
//! byte for byte; the constants are part of the wallet's wire protocol and
//! must not change.

use sha2::{Digest, Sha256};

/// Zeroed pseudo-transaction header: version, nonce, system/network fee,
/// valid-until-block, empty signer and attribute lists. All zero bytes.
const TX_HEADER_LEN: usize = 49;

/// Network magic used for message signing (not a real network)
pub const NETWORK_MAGIC: u32 = 0;

/// Sign-data length: 4-byte magic plus a 32-byte digest
pub const PREIMAGE_LEN: usize = 36;

/// Build the exact byte sequence the wallet signs for `message`.
pub fn wrap(message: &str) -> Vec<u8> {
    let payload = message.as_bytes();

    let mut tx = Vec::with_capacity(TX_HEADER_LEN + 9 + payload.len());
    tx.extend_from_slice(&[0u8; TX_HEADER_LEN]);
    tx.extend_from_slice(&encode_var_int(payload.len() as u64));
    tx.extend_from_slice(payload);

    let digest: [u8; 32] = Sha256::digest(&tx).into();

    let mut preimage = Vec::with_capacity(PREIMAGE_LEN);
    preimage.extend_from_slice(&NETWORK_MAGIC.to_le_bytes());
    preimage.extend_from_slice(&digest);
    preimage
}

/// Neo variable-length integer: one byte below 0xFD, otherwise a marker
/// byte followed by a 2/4/8-byte little-endian value.
pub fn encode_var_int(value: u64) -> Vec<u8> {
    if value < 0xFD {
        vec![value as u8]
    } else if value <= 0xFFFF {
        let mut out = vec![0xFD];
        out.extend_from_slice(&(value as u16).to_le_bytes());
        out
    } else if value <= 0xFFFF_FFFF {
        let mut out = vec![0xFE];
        out.extend_from_slice(&(value as u32).to_le_bytes());
        out
    } else {
        let mut out = vec![0xFF];
        out.extend_from_slice(&value.to_le_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_int_boundaries() {
        assert_eq!(encode_var_int(0), vec![0x00]);
        assert_eq!(encode_var_int(0x42), vec![0x42]);
        assert_eq!(encode_var_int(0xFC), vec![0xFC]);
        assert_eq!(encode_var_int(0xFD), vec![0xFD, 0xFD, 0x00]);
        assert_eq!(encode_var_int(0xFFFF), vec![0xFD, 0xFF, 0xFF]);
        assert_eq!(encode_var_int(0x10000), vec![0xFE, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(
            encode_var_int(0x1_0000_0000),
            vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_preimage_shape() {
        let preimage = wrap("hello");
        assert_eq!(preimage.len(), PREIMAGE_LEN);
        // Magic 0, little-endian
        assert_eq!(&preimage[..4], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_preimage_matches_manual_construction() {
        let message = "hello";
        let mut tx = vec![0u8; 49];
        tx.push(5); // var-int of the byte length
        tx.extend_from_slice(b"hello");
        let digest: [u8; 32] = Sha256::digest(&tx).into();

        let mut expected = vec![0u8; 4];
        expected.extend_from_slice(&digest);
        assert_eq!(wrap(message), expected);
    }

    #[test]
    fn test_preimage_is_deterministic_and_message_sensitive() {
        assert_eq!(wrap("abc"), wrap("abc"));
        assert_ne!(wrap("abc"), wrap("abd"));
        assert_ne!(wrap(""), wrap(" "));
    }

    #[test]
    fn test_preimage_long_message_uses_wide_var_int() {
        // 0x0100 bytes of payload forces the 0xFD marker; the envelope must
        // still hash to a 32-byte digest behind the 4-byte magic
        let long = "x".repeat(0x0100);
        let preimage = wrap(&long);
        assert_eq!(preimage.len(), PREIMAGE_LEN);

        let mut tx = vec![0u8; 49];
        tx.extend_from_slice(&[0xFD, 0x00, 0x01]);
        tx.extend_from_slice(long.as_bytes());
        let digest: [u8; 32] = Sha256::digest(&tx).into();
        assert_eq!(&preimage[4..], &digest);
    }

    #[test]
    fn test_preimage_multibyte_utf8_counts_bytes() {
        // "é" is two UTF-8 bytes; the var-int must count bytes, not chars
        let message = "é";
        let mut tx = vec![0u8; 49];
        tx.push(2);
        tx.extend_from_slice(message.as_bytes());
        let digest: [u8; 32] = Sha256::digest(&tx).into();
        assert_eq!(&wrap(message)[4..], &digest);
    }
}
