//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Query for GET /api/siwn/nonce
#[derive(Debug, Clone, Deserialize)]
pub struct NonceParams {
    #[serde(default)]
    pub address: Option<String>,
}

/// Response for GET /api/siwn/nonce
#[derive(Debug, Clone, Serialize)]
pub struct NonceResponse {
    pub nonce: String,
}

/// Request for POST /api/siwn/login
///
/// Fields are optional at the serde level so an absent field surfaces as
/// the domain's MissingField error instead of a deserializer rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
}

/// Identity-store session material, snake_case on the wire
#[derive(Debug, Clone, Serialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Response for POST /api/siwn/login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: serde_json::Value,
    pub session: SessionTokens,
}
