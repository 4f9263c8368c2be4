//! SIWN (Sign-In With Neo) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database and identity-store implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Security Model
//! - Backend is the sole authority for nonce issuance, TTL, and signature
//!   verification; nothing a client sends is trusted before the full check
//!   chain passes
//! - Nonce consumption is atomic (no double-spend)
//! - The credential linking an address to its identity-store account is
//!   derived server-side from a secret and never crosses the wire to the
//!   client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SiwnConfig;
pub use error::{SiwnError, SiwnResult};
pub use infra::identity::HttpIdentityProvider;
pub use infra::postgres::PgSiwnRepository;
pub use presentation::router::{siwn_router, siwn_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};
