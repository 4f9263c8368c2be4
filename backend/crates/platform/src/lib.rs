//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations that carry no domain meaning:
//! - Cryptographic utilities (SHA-256, HMAC, Base64, CSPRNG)

pub mod crypto;
