//! Application Configuration
//!
//! All configuration is environment-sourced, read once at process start,
//! and passed into the use cases as an immutable value. Nothing reads the
//! environment after startup.

use std::env;
use std::time::Duration;

use crate::error::{SiwnError, SiwnResult};

/// SIWN application configuration
#[derive(Debug, Clone)]
pub struct SiwnConfig {
    /// Origin allow-list patterns (exact, `*.suffix`, `prefix:*`)
    pub allowed_domains: Vec<String>,
    /// Secret used only to derive per-address identity credentials.
    /// Never exposed in any response.
    pub link_secret: [u8; 32],
    /// Random bytes per nonce token (hex doubles the length on the wire)
    pub nonce_bytes_len: usize,
    /// Nonce TTL
    pub nonce_ttl: Duration,
    /// Identity store base URL
    pub identity_base_url: String,
    /// Identity store service key (admin scope); never logged
    pub identity_service_key: String,
}

impl Default for SiwnConfig {
    fn default() -> Self {
        Self {
            allowed_domains: Vec::new(),
            link_secret: [0u8; 32],
            nonce_bytes_len: 16,
            nonce_ttl: Duration::from_secs(300),
            identity_base_url: String::new(),
            identity_service_key: String::new(),
        }
    }
}

impl SiwnConfig {
    /// Read the full configuration from the environment.
    ///
    /// A missing or unparsable required variable is a
    /// [`SiwnError::Configuration`]; the caller is expected to fail fast.
    pub fn from_env() -> SiwnResult<Self> {
        let raw_domains = env::var("SIWN_ALLOWED_DOMAINS")
            .map_err(|_| SiwnError::Configuration("SIWN_ALLOWED_DOMAINS"))?;
        let allowed_domains = parse_domain_list(&raw_domains);
        if allowed_domains.is_empty() {
            return Err(SiwnError::Configuration("SIWN_ALLOWED_DOMAINS"));
        }

        let secret_b64 = env::var("SIWN_LINK_SECRET")
            .map_err(|_| SiwnError::Configuration("SIWN_LINK_SECRET"))?;
        let secret_bytes = platform::crypto::from_base64(secret_b64.trim())
            .map_err(|_| SiwnError::Configuration("SIWN_LINK_SECRET"))?;
        let link_secret: [u8; 32] = secret_bytes
            .try_into()
            .map_err(|_| SiwnError::Configuration("SIWN_LINK_SECRET"))?;

        let identity_base_url = env::var("IDENTITY_BASE_URL")
            .map_err(|_| SiwnError::Configuration("IDENTITY_BASE_URL"))?
            .trim_end_matches('/')
            .to_string();
        let identity_service_key = env::var("IDENTITY_SERVICE_KEY")
            .map_err(|_| SiwnError::Configuration("IDENTITY_SERVICE_KEY"))?;

        Ok(Self {
            allowed_domains,
            link_secret,
            identity_base_url,
            identity_service_key,
            ..Self::default()
        })
    }

    /// Create config with a random link secret (for development and tests)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            link_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for local development (localhost origins allowed)
    pub fn development() -> Self {
        Self {
            allowed_domains: vec!["localhost:*".to_string(), "127.0.0.1:*".to_string()],
            ..Self::with_random_secret()
        }
    }

    pub fn nonce_ttl_ms(&self) -> i64 {
        self.nonce_ttl.as_millis() as i64
    }
}

/// Split a comma-separated pattern list, dropping blanks
pub fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|domain| domain.trim().to_string())
        .filter(|domain| !domain.is_empty())
        .collect()
}
