//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::challenge::ChallengeError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body is missing required fields or fails validation
    #[error("{0}")]
    InvalidRequest(String),

    /// Challenge message is malformed or outside the freshness window
    #[error("Invalid or expired message")]
    ChallengeRejected(#[source] ChallengeError),

    /// Signature does not verify against the wallet address
    #[error("Invalid signature")]
    SignatureInvalid,

    /// No valid session for this request
    #[error("Unauthorized")]
    Unauthorized,

    /// Valid session, but the user has not completed onboarding
    #[error("Profile incomplete")]
    ProfileIncomplete,

    /// User referenced by the session no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Chosen username is taken by another user
    #[error("Username is already taken")]
    UsernameTaken,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidRequest(_) | AuthError::ChallengeRejected(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::SignatureInvalid | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::ProfileIncomplete => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::UsernameTaken => StatusCode::CONFLICT,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidRequest(_) | AuthError::ChallengeRejected(_) => ErrorKind::BadRequest,
            AuthError::SignatureInvalid | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::ProfileIncomplete => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Machine-readable code so clients can branch on the exact failure.
    ///
    /// `UNAUTHORIZED` and `PROFILE_INCOMPLETE` must stay distinguishable
    /// end-to-end: the first means re-login, the second means show the
    /// onboarding prompt.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidRequest(_) => "INVALID_REQUEST",
            AuthError::ChallengeRejected(_) => "CHALLENGE_REJECTED",
            AuthError::SignatureInvalid => "SIGNATURE_INVALID",
            AuthError::Unauthorized => "UNAUTHORIZED",
            AuthError::ProfileIncomplete => "PROFILE_INCOMPLETE",
            AuthError::UserNotFound => "NOT_FOUND",
            AuthError::UsernameTaken => "USERNAME_TAKEN",
            AuthError::Database(_) | AuthError::Internal(_) => "INTERNAL",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string()).with_code(self.code())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::SignatureInvalid => {
                tracing::warn!("Signature verification failed");
            }
            AuthError::ChallengeRejected(reason) => {
                tracing::warn!(reason = %reason, "Challenge rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<ChallengeError> for AuthError {
    fn from(err: ChallengeError) -> Self {
        AuthError::ChallengeRejected(err)
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
