//! Application Layer - Use Cases

pub mod config;
pub mod login;
pub mod request_nonce;

pub use config::SiwnConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use request_nonce::RequestNonceUseCase;
