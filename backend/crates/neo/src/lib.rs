//! Neo N3 Wallet Format
//!
//! Everything needed to verify a message signed by a Neo N3 wallet
//! extension:
//! - `address` - compressed public key to Base58Check address derivation
//! - `preimage` - the pseudo-transaction envelope wallets wrap a message
//!   in before signing
//! - `signature` - ECDSA P-256 verification over that envelope
//!
//! ## Security Model
//! - The envelope is a fixed binary format dictated by the signing wallet;
//!   it is pinned by tests and must never be "approximately" reproduced
//! - Verification is a boolean gate: malformed input is logged and folded
//!   into `false`, never surfaced as an error to callers

pub mod address;
pub mod error;
pub mod preimage;
pub mod signature;

pub use address::address_from_public_key;
pub use error::NeoError;
pub use preimage::wrap;
pub use signature::verify;
