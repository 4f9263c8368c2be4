//! Repository Traits
//!
//! Interfaces for data persistence and the external identity store.
//! Implementations live in the infrastructure layer.

use crate::domain::entities::{NonceRecord, WalletAccount};
use crate::error::SiwnResult;

/// Nonce repository trait
#[trait_variant::make(NonceRepository: Send)]
pub trait LocalNonceRepository {
    /// Persist a freshly issued nonce
    async fn create(&self, record: &NonceRecord) -> SiwnResult<()>;

    /// Atomically delete one unexpired record matching (address, nonce).
    /// Returns true iff a record was deleted; expired records never match.
    async fn consume(&self, address: &str, nonce: &str) -> SiwnResult<bool>;
}

/// Wallet mapping repository trait
#[trait_variant::make(WalletAccountRepository: Send)]
pub trait LocalWalletAccountRepository {
    /// Look up the mapping for an address
    async fn find_by_address(&self, address: &str) -> SiwnResult<Option<WalletAccount>>;

    /// Insert-or-keep: returns the surviving row, so two concurrent first
    /// logins for the same address converge on one mapping
    async fn create(&self, account: &WalletAccount) -> SiwnResult<WalletAccount>;
}

/// Session material minted by the external identity store
#[derive(Debug, Clone)]
pub struct IdentitySession {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds
    pub expires_at: i64,
    /// Raw identity-store user payload, passed through to the client
    pub user: serde_json::Value,
}

/// Narrow capability interface over the external identity store
#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Create an account bound to the derived credential; returns the
    /// opaque account id
    async fn create_account(&self, email: &str, password: &str) -> SiwnResult<String>;

    /// Password sign-in with the derived credential
    async fn authenticate(&self, email: &str, password: &str) -> SiwnResult<IdentitySession>;
}
