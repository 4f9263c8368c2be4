//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::NonceId;

/// Provider tag recorded on wallet mappings
pub const WALLET_PROVIDER: &str = "neo";

/// Single-use login nonce issued for an address
#[derive(Debug, Clone)]
pub struct NonceRecord {
    pub id: NonceId,
    pub address: String,
    pub nonce: String,
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl NonceRecord {
    /// Create a new nonce record expiring `ttl_ms` from now
    pub fn new(address: String, nonce: String, ttl_ms: i64) -> Self {
        let now = Utc::now();
        Self {
            id: NonceId::new(),
            address,
            nonce,
            expires_at_ms: now.timestamp_millis() + ttl_ms,
            created_at: now,
        }
    }

    /// Check if the nonce has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}

/// Immutable binding between a wallet address and an identity-store
/// account. Created on first verified login, read on every later one.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletAccount {
    pub account_id: String,
    pub address: String,
    pub provider: String,
}

impl WalletAccount {
    pub fn new(account_id: String, address: String) -> Self {
        Self {
            account_id,
            address,
            provider: WALLET_PROVIDER.to_string(),
        }
    }
}
