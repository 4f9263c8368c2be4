//! Login Use Case
//!
//! Sequences the full verify-then-authenticate flow. Every check is
//! fail-fast and terminal: parse, allow-list, temporal validation, key to
//! address match, signature, nonce consumption, identity resolution,
//! session issuance. The nonce is consumed only after the signature
//! checks out, so a failed attempt does not burn the challenge.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::SiwnConfig;
use crate::domain::entities::WalletAccount;
use crate::domain::matcher;
use crate::domain::message::ChallengeMessage;
use crate::domain::repository::{IdentityProvider, NonceRepository, WalletAccountRepository};
use crate::error::{SiwnError, SiwnResult};

/// Input DTO for login
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub message: String,
    pub signature: String,
    pub public_key: String,
}

/// Output DTO for login
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub user: serde_json::Value,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Login Use Case
pub struct LoginUseCase<N, W, I>
where
    N: NonceRepository,
    W: WalletAccountRepository,
    I: IdentityProvider,
{
    nonce_repo: Arc<N>,
    wallet_repo: Arc<W>,
    identity: Arc<I>,
    config: Arc<SiwnConfig>,
}

impl<N, W, I> LoginUseCase<N, W, I>
where
    N: NonceRepository,
    W: WalletAccountRepository,
    I: IdentityProvider,
{
    pub fn new(
        nonce_repo: Arc<N>,
        wallet_repo: Arc<W>,
        identity: Arc<I>,
        config: Arc<SiwnConfig>,
    ) -> Self {
        Self {
            nonce_repo,
            wallet_repo,
            identity,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> SiwnResult<LoginOutput> {
        let message = ChallengeMessage::parse(&input.message)?;

        if !matcher::is_allowed(&message.domain, &self.config.allowed_domains) {
            tracing::warn!(domain = %message.domain, "Login domain not in allow-list");
            return Err(SiwnError::DomainRejected);
        }

        message.validate(Utc::now(), None, None)?;

        let derived_address = neo::address_from_public_key(&input.public_key)?;
        if derived_address != message.address {
            tracing::warn!(
                claimed = %message.address,
                derived = %derived_address,
                "Public key does not derive the claimed address"
            );
            return Err(SiwnError::KeyAddressMismatch);
        }

        if !neo::verify(&input.message, &input.signature, &input.public_key) {
            tracing::warn!(address = %message.address, "Signature verification failed");
            return Err(SiwnError::InvalidSignature);
        }

        if !self
            .nonce_repo
            .consume(&message.address, &message.nonce)
            .await?
        {
            tracing::warn!(address = %message.address, "Nonce missing, expired or already used");
            return Err(SiwnError::InvalidOrExpiredNonce);
        }

        let email = wallet_email(&message.address);
        let credential = derive_wallet_credential(&self.config.link_secret, &message.address);

        let account = match self.wallet_repo.find_by_address(&message.address).await? {
            Some(account) => account,
            None => {
                let account_id = self.identity.create_account(&email, &credential).await?;
                let mapping = WalletAccount::new(account_id, message.address.clone());
                // Insert-or-keep: a concurrent first login converges on
                // whichever mapping won the insert
                self.wallet_repo.create(&mapping).await?
            }
        };

        let session = self.identity.authenticate(&email, &credential).await?;

        tracing::info!(
            address = %message.address,
            account_id = %account.account_id,
            "Wallet login verified"
        );

        Ok(LoginOutput {
            user: session.user,
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_at: session.expires_at,
        })
    }
}

/// Synthetic identity-store email for an address. Address casing is
/// preserved: base58 is case-sensitive.
pub(crate) fn wallet_email(address: &str) -> String {
    format!("{address}@neo.local")
}

/// Per-address credential derived from the server secret. Never leaves
/// the backend and is never accepted from a client.
pub(crate) fn derive_wallet_credential(secret: &[u8; 32], address: &str) -> String {
    platform::crypto::to_base64(&platform::crypto::hmac_sha256(secret, address.as_bytes()))
}
