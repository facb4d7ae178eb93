//! Auth Gate
//!
//! The composed entry point every protected operation goes through. Two
//! strength levels:
//!
//! - [`AuthGate::require_session`] — "some known wallet": fails with
//!   `Unauthorized` when no valid session exists.
//! - [`AuthGate::require_complete_profile`] — additionally re-resolves the
//!   session to a live identity and demands a username. `Unauthorized`
//!   and `ProfileIncomplete` stay distinct so callers can branch
//!   (re-login vs. onboarding prompt).
//!
//! Profile completeness is read from the user row on every call, never
//! cached in the session token, so finishing onboarding takes effect
//! immediately without re-login. The token is threaded in explicitly;
//! nothing here reads ambient request state.

use std::sync::Arc;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::session::SessionData;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Auth gate
pub struct AuthGate<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> AuthGate<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Require a valid session; returns the bound identity pair.
    pub async fn require_session(&self, token: Option<&str>) -> AuthResult<SessionData> {
        let token = token.ok_or(AuthError::Unauthorized)?;

        let check = CheckSessionUseCase::new(self.repo.clone(), self.config.clone());
        check
            .read(token)
            .await?
            .ok_or(AuthError::Unauthorized)
    }

    /// Require a valid session whose user has completed onboarding.
    ///
    /// A session whose user row has vanished is treated as no session at
    /// all (`Unauthorized`), not as a missing resource.
    pub async fn require_complete_profile(&self, token: Option<&str>) -> AuthResult<User> {
        let session = self.require_session(token).await?;

        // Both repository traits expose a find_by_id; name the user one
        let user = UserRepository::find_by_id(self.repo.as_ref(), &session.user_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !user.has_complete_profile() {
            return Err(AuthError::ProfileIncomplete);
        }

        Ok(user)
    }
}
