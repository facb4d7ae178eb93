//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod guard;
pub mod login;
pub mod sign_out;
pub mod token;
pub mod update_profile;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use guard::AuthGate;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use sign_out::SignOutUseCase;
pub use update_profile::{UpdateProfileInput, UpdateProfileUseCase};
