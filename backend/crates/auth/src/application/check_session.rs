//! Check Session Use Case
//!
//! Reads the session referenced by a cookie token. Absence of a valid
//! session is a normal state: missing, malformed, tampered, and expired
//! tokens all read as `None`, never as an error.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::parse_session_token;
use crate::domain::entity::session::SessionData;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Read the session bound to `token`, if one is valid and unexpired.
    ///
    /// Expired rows are deleted on read, so a dead cookie cannot be
    /// resurrected by clock games later.
    pub async fn read(&self, token: &str) -> AuthResult<Option<SessionData>> {
        let Some(session_id) = parse_session_token(&self.config.session_secret, token) else {
            return Ok(None);
        };

        let Some(session) = self.session_repo.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Ok(None);
        }

        let data = SessionData::from(&session);

        // Update last activity in the background; the read must not wait
        let mut session = session;
        session.touch();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update(&session).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(Some(data))
    }
}
