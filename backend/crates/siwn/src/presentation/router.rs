//! SIWN Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::SiwnConfig;
use crate::domain::repository::{IdentityProvider, NonceRepository, WalletAccountRepository};
use crate::infra::identity::HttpIdentityProvider;
use crate::infra::postgres::PgSiwnRepository;
use crate::presentation::handlers::{self, SiwnAppState};

/// Create the SIWN router with the PostgreSQL repository and the HTTP
/// identity provider
pub fn siwn_router(
    repo: PgSiwnRepository,
    identity: HttpIdentityProvider,
    config: SiwnConfig,
) -> Router {
    siwn_router_generic(repo, identity, config)
}

/// Create a SIWN router for any repository / identity implementation
pub fn siwn_router_generic<R, I>(repo: R, identity: I, config: SiwnConfig) -> Router
where
    R: NonceRepository + WalletAccountRepository + Clone + Send + Sync + 'static,
    I: IdentityProvider + Clone + Send + Sync + 'static,
{
    let state = SiwnAppState {
        repo: Arc::new(repo),
        identity: Arc::new(identity),
        config: Arc::new(config),
    };

    Router::new()
        .route("/nonce", get(handlers::request_nonce::<R, I>))
        .route("/login", post(handlers::login::<R, I>))
        .with_state(state)
}
