//! Sign Out Use Case
//!
//! Destroys the current session. Unconditionally idempotent: signing out
//! with no session, a bad token, or an already-deleted session all
//! succeed — logout never fails from the client's point of view.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::parse_session_token;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Destroy the session referenced by `token`, if any.
    pub async fn execute(&self, token: Option<&str>) -> AuthResult<()> {
        let Some(token) = token else {
            return Ok(());
        };

        let Some(session_id) = parse_session_token(&self.config.session_secret, token) else {
            return Ok(());
        };

        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "Session destroyed");
        Ok(())
    }
}
