//! HTTP Handlers

use axum::Json;
use axum::extract::{Query, State};
use std::sync::Arc;

use crate::application::config::SiwnConfig;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::request_nonce::RequestNonceUseCase;
use crate::domain::repository::{IdentityProvider, NonceRepository, WalletAccountRepository};
use crate::error::{SiwnError, SiwnResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, NonceParams, NonceResponse, SessionTokens,
};

/// Shared state for SIWN handlers
#[derive(Clone)]
pub struct SiwnAppState<R, I>
where
    R: NonceRepository + WalletAccountRepository + Clone + Send + Sync + 'static,
    I: IdentityProvider + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub identity: Arc<I>,
    pub config: Arc<SiwnConfig>,
}

/// GET /api/siwn/nonce
pub async fn request_nonce<R, I>(
    State(state): State<SiwnAppState<R, I>>,
    Query(params): Query<NonceParams>,
) -> SiwnResult<Json<NonceResponse>>
where
    R: NonceRepository + WalletAccountRepository + Clone + Send + Sync + 'static,
    I: IdentityProvider + Clone + Send + Sync + 'static,
{
    let address = params
        .address
        .filter(|address| !address.trim().is_empty())
        .ok_or(SiwnError::MissingField("Address"))?;

    let use_case = RequestNonceUseCase::new(state.repo.clone(), state.config.clone());

    let nonce = use_case.execute(&address).await?;

    Ok(Json(NonceResponse { nonce }))
}

/// POST /api/siwn/login
pub async fn login<R, I>(
    State(state): State<SiwnAppState<R, I>>,
    Json(req): Json<LoginRequest>,
) -> SiwnResult<Json<LoginResponse>>
where
    R: NonceRepository + WalletAccountRepository + Clone + Send + Sync + 'static,
    I: IdentityProvider + Clone + Send + Sync + 'static,
{
    let input = LoginInput {
        message: req
            .message
            .filter(|value| !value.is_empty())
            .ok_or(SiwnError::MissingField("Message"))?,
        signature: req
            .signature
            .filter(|value| !value.is_empty())
            .ok_or(SiwnError::MissingField("Signature"))?,
        public_key: req
            .public_key
            .filter(|value| !value.is_empty())
            .ok_or(SiwnError::MissingField("Public key"))?,
    };

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.identity.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(input).await?;

    Ok(Json(LoginResponse {
        user: output.user,
        session: SessionTokens {
            access_token: output.access_token,
            refresh_token: output.refresh_token,
            expires_at: output.expires_at,
        },
    }))
}
