//! Domain Layer
//!
//! Contains entities, value objects, domain services, and repository traits.

pub mod challenge;
pub mod entity;
pub mod repository;
pub mod signature;
pub mod value_object;

// Re-exports
pub use entity::{session::AuthSession, user::User};
pub use repository::{SessionRepository, UserRepository};
