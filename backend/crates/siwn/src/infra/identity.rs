//! HTTP Identity Provider
//!
//! GoTrue-style identity store client: admin user creation plus password
//! grant sign-in. The service key authorizes the admin call and never
//! appears in logs or error messages.

use serde::Deserialize;

use crate::domain::repository::{IdentityProvider, IdentitySession};
use crate::error::{SiwnError, SiwnResult};

/// Identity store client over HTTP
#[derive(Clone)]
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedUser {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    user: serde_json::Value,
}

impl IdentityProvider for HttpIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> SiwnResult<String> {
        let url = format!("{}/admin/users", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "email_confirm": true,
            }))
            .send()
            .await
            .map_err(|e| SiwnError::IdentityStore(format!("create account request: {e}")))?;

        if !response.status().is_success() {
            return Err(SiwnError::IdentityStore(format!(
                "create account returned {}",
                response.status()
            )));
        }

        let user: CreatedUser = response
            .json()
            .await
            .map_err(|e| SiwnError::IdentityStore(format!("create account body: {e}")))?;

        tracing::info!(account_id = %user.id, "Identity account created");

        Ok(user.id)
    }

    async fn authenticate(&self, email: &str, password: &str) -> SiwnResult<IdentitySession> {
        let url = format!("{}/token?grant_type=password", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.service_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| SiwnError::IdentityStore(format!("sign-in request: {e}")))?;

        if !response.status().is_success() {
            return Err(SiwnError::IdentityStore(format!(
                "sign-in returned {}",
                response.status()
            )));
        }

        let grant: TokenGrant = response
            .json()
            .await
            .map_err(|e| SiwnError::IdentityStore(format!("sign-in body: {e}")))?;

        // Some deployments send expires_in instead of an absolute time
        let expires_at = grant
            .expires_at
            .unwrap_or_else(|| chrono::Utc::now().timestamp() + grant.expires_in.unwrap_or(3600));

        Ok(IdentitySession {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at,
            user: grant.user,
        })
    }
}
