//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::SessionId;

use crate::domain::entity::{session::AuthSession, user::User};
use crate::domain::value_object::{UserId, Username, WalletAddress};
use crate::error::AuthResult;

/// User repository trait
///
/// The only path by which identities are minted is `resolve_or_create`;
/// a uniqueness constraint on the wallet address makes it race-safe
/// (concurrent first logins converge on one surviving row).
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find the identity for a wallet address, creating it on first sight.
    ///
    /// Upsert semantics: under a concurrent first login, the loser of the
    /// race receives the winner's row instead of an error.
    async fn resolve_or_create(&self, wallet_address: &WalletAddress) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by wallet address
    async fn find_by_wallet_address(
        &self,
        wallet_address: &WalletAddress,
    ) -> AuthResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>>;

    /// Update user (profile mutations)
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Auth session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, session_id: SessionId) -> AuthResult<Option<AuthSession>>;

    /// Update session (e.g., last activity)
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    /// Delete a session; deleting a missing session is not an error
    async fn delete(&self, session_id: SessionId) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
