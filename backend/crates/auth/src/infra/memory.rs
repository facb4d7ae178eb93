//! In-Memory Repository Implementation
//!
//! HashMap-backed repository for tests and local development. Mirrors
//! the PostgreSQL semantics, including race-safe find-or-create: the
//! whole resolve happens under one lock, so concurrent first logins for
//! the same address converge on a single identity.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use kernel::id::SessionId;
use uuid::Uuid;

use crate::domain::entity::{session::AuthSession, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{UserId, Username, WalletAddress};
use crate::error::{AuthError, AuthResult};

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
    sessions: Arc<Mutex<HashMap<Uuid, AuthSession>>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_users(&self) -> AuthResult<std::sync::MutexGuard<'_, HashMap<Uuid, User>>> {
        self.users
            .lock()
            .map_err(|_| AuthError::Internal("User store lock poisoned".to_string()))
    }

    fn lock_sessions(&self) -> AuthResult<std::sync::MutexGuard<'_, HashMap<Uuid, AuthSession>>> {
        self.sessions
            .lock()
            .map_err(|_| AuthError::Internal("Session store lock poisoned".to_string()))
    }

    /// Number of stored sessions (test helper)
    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn resolve_or_create(&self, wallet_address: &WalletAddress) -> AuthResult<User> {
        let mut users = self.lock_users()?;

        if let Some(user) = users
            .values()
            .find(|u| &u.wallet_address == wallet_address)
        {
            return Ok(user.clone());
        }

        let user = User::new(wallet_address.clone());
        users.insert(*user.user_id.as_uuid(), user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.lock_users()?.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_wallet_address(
        &self,
        wallet_address: &WalletAddress,
    ) -> AuthResult<Option<User>> {
        Ok(self
            .lock_users()?
            .values()
            .find(|u| &u.wallet_address == wallet_address)
            .cloned())
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        Ok(self
            .lock_users()?
            .values()
            .find(|u| u.username.as_ref() == Some(username))
            .cloned())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        self.lock_users()?
            .insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }
}

impl SessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.lock_sessions()?
            .insert(session.session_id.into_uuid(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: SessionId) -> AuthResult<Option<AuthSession>> {
        Ok(self.lock_sessions()?.get(session_id.as_uuid()).cloned())
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        self.lock_sessions()?
            .insert(session.session_id.into_uuid(), session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: SessionId) -> AuthResult<()> {
        self.lock_sessions()?.remove(session_id.as_uuid());
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut sessions = self.lock_sessions()?;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        Ok((before - sessions.len()) as u64)
    }
}
