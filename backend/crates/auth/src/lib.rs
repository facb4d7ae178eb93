//! Auth (Wallet Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Challenge/response login: the wallet signs a timestamped message,
//!   the server verifies the Ed25519 signature against the address
//! - Find-or-create identity resolution keyed by wallet address
//! - Server-side sessions with HMAC-signed cookie tokens
//! - Auth gate with two strength levels (session, complete profile)
//! - Profile updates (username, display fields, creator settings)
//!
//! ## Security Model
//! - No passwords; ownership of the address's private key is the credential
//! - Challenge freshness window bounds replay exposure (the protocol has
//!   no server-issued nonce; see `domain::challenge`)
//! - Session tokens are HMAC-SHA256 signed; the cookie cannot be forged
//!   or tampered with client-side

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryAuthRepository;
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
