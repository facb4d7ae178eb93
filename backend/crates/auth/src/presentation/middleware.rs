//! Auth Middleware
//!
//! Middleware for gating protected routes. Two strengths, matching the
//! two failure modes clients must distinguish: no valid session (401)
//! and a session whose user has not finished onboarding (403 with the
//! `PROFILE_INCOMPLETE` code).

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::AuthGate;
use crate::application::config::AuthConfig;
use crate::domain::entity::session::SessionData;
use crate::domain::repository::{SessionRepository, UserRepository};

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Middleware that requires a valid auth session
///
/// On success the resolved [`SessionData`] is stored in request
/// extensions for downstream handlers.
pub async fn require_auth_session<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let gate = AuthGate::new(state.repo.clone(), state.config.clone());

    let session = gate
        .require_session(token.as_deref())
        .await
        .map_err(|e| e.into_response())?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

/// Middleware that requires a session whose user has a complete profile
///
/// Completeness is read from the user row on every request, so finishing
/// onboarding takes effect without a re-login.
pub async fn require_complete_profile<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let gate = AuthGate::new(state.repo.clone(), state.config.clone());

    let user = gate
        .require_complete_profile(token.as_deref())
        .await
        .map_err(|e| e.into_response())?;

    req.extensions_mut().insert(SessionData {
        wallet_address: user.wallet_address.clone(),
        user_id: user.user_id,
    });

    Ok(next.run(req).await)
}
