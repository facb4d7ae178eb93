//! Login Use Case
//!
//! The whole wallet authentication pipeline: challenge freshness check,
//! signature verification, identity resolution, session issuance.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::token::generate_session_token;
use crate::domain::challenge;
use crate::domain::entity::{session::AuthSession, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::signature::verify_wallet_signature;
use crate::domain::value_object::WalletAddress;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    /// Encoded wallet address
    pub wallet_address: String,
    /// The signed challenge message, exactly as signed
    pub message: String,
    /// Raw Ed25519 signature bytes
    pub signature: Vec<u8>,
}

/// Login output
pub struct LoginOutput {
    /// Session token for cookie
    pub session_token: String,
    /// The resolved (possibly just-created) identity
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Challenge freshness first; no cryptography for stale requests
        let timestamp = challenge::validate(
            &input.message,
            Utc::now().timestamp_millis(),
            self.config.challenge_freshness_window_ms(),
            self.config.max_clock_skew_ms(),
        )?;

        // A syntactically invalid address cannot have signed anything,
        // so it fails the same way a bad signature does
        let wallet_address = WalletAddress::parse(&input.wallet_address)
            .map_err(|_| AuthError::SignatureInvalid)?;

        if !verify_wallet_signature(&wallet_address, input.message.as_bytes(), &input.signature) {
            return Err(AuthError::SignatureInvalid);
        }

        // Find-or-create: the only path that mints identities
        let user = self.user_repo.resolve_or_create(&wallet_address).await?;

        let session = AuthSession::new(
            user.user_id,
            user.wallet_address.clone(),
            chrono::Duration::milliseconds(self.config.session_ttl_ms()),
        );
        self.session_repo.create(&session).await?;

        let session_token = generate_session_token(&self.config.session_secret, session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            challenge_ts = timestamp,
            "Wallet authenticated"
        );

        Ok(LoginOutput {
            session_token,
            user,
        })
    }
}
