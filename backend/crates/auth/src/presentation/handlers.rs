//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthGate, LoginInput, LoginUseCase, SignOutUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LogoutResponse, UpdateProfileRequest, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let wallet_address = req
        .wallet_address
        .ok_or_else(|| AuthError::InvalidRequest("walletAddress is required".to_string()))?;
    let message = req
        .message
        .ok_or_else(|| AuthError::InvalidRequest("message is required".to_string()))?;
    let signature = req
        .signature
        .ok_or_else(|| AuthError::InvalidRequest("signature is required".to_string()))?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            wallet_address,
            message,
            signature,
        })
        .await?;

    let cookie = state
        .config
        .cookie_config()
        .build_set_cookie(&output.session_token);

    // Same flat user object as /me
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.user)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Always succeeds, cookie or not; the only observable effect of a
/// missing session is that there was nothing to destroy.
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_session_cookie(&headers, &state.config.session_cookie_name);

    let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(token.as_deref()).await?;

    let cookie = state.config.cookie_config().build_delete_cookie();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LogoutResponse { success: true }),
    ))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_session_cookie(&headers, &state.config.session_cookie_name);

    let gate = AuthGate::new(state.repo.clone(), state.config.clone());
    let session = gate.require_session(token.as_deref()).await?;

    let user = UserRepository::find_by_id(state.repo.as_ref(), &session.user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Update Profile
// ============================================================================

/// POST /api/user/profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_session_cookie(&headers, &state.config.session_cookie_name);

    let gate = AuthGate::new(state.repo.clone(), state.config.clone());
    let session = gate.require_session(token.as_deref()).await?;

    let use_case = UpdateProfileUseCase::new(state.repo.clone());

    let user = use_case
        .execute(
            &session.user_id,
            UpdateProfileInput {
                username: req.username,
                display_name: req.display_name,
                bio: req.bio,
                email: req.email,
                profile_image: req.profile_image,
                cover_image: req.cover_image,
                is_creator: req.is_creator,
                subscription_price: req.subscription_price,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn extract_session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, name)
}
