//! Request Nonce Use Case

use std::sync::Arc;

use platform::crypto::random_bytes;

use crate::application::config::SiwnConfig;
use crate::domain::entities::NonceRecord;
use crate::domain::repository::NonceRepository;
use crate::error::{SiwnError, SiwnResult};

/// Request Nonce Use Case
pub struct RequestNonceUseCase<N>
where
    N: NonceRepository,
{
    nonce_repo: Arc<N>,
    config: Arc<SiwnConfig>,
}

impl<N> RequestNonceUseCase<N>
where
    N: NonceRepository,
{
    pub fn new(nonce_repo: Arc<N>, config: Arc<SiwnConfig>) -> Self {
        Self { nonce_repo, config }
    }

    pub async fn execute(&self, address: &str) -> SiwnResult<String> {
        if address.trim().is_empty() {
            return Err(SiwnError::MissingField("Address"));
        }

        let token = hex::encode(random_bytes(self.config.nonce_bytes_len));
        let record = NonceRecord::new(
            address.to_string(),
            token.clone(),
            self.config.nonce_ttl_ms(),
        );

        self.nonce_repo.create(&record).await?;

        // The token value stays out of the logs
        tracing::info!(
            nonce_id = %record.id,
            address = %address,
            "Issued login nonce"
        );

        Ok(token)
    }
}
