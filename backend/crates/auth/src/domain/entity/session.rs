//! Auth Session Entity
//!
//! Represents an authenticated session: the server-trusted binding of a
//! cookie to a resolved identity. Stored in the database; the cookie holds
//! only a signed reference to the session ID.

use chrono::{DateTime, Duration, Utc};
use kernel::id::SessionId;

use crate::domain::value_object::{UserId, WalletAddress};

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4), referenced by the cookie token
    pub session_id: SessionId,
    /// Reference to the user
    pub user_id: UserId,
    /// Wallet address the session was authenticated for
    pub wallet_address: WalletAddress,
    /// Session expiration (Unix timestamp ms), fixed TTL from creation
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session.
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, wallet_address: WalletAddress, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user_id,
            wallet_address,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}

/// The identity pair a valid session resolves to.
///
/// This is the only thing the rest of the system may learn from a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub wallet_address: WalletAddress,
    pub user_id: UserId,
}

impl From<&AuthSession> for SessionData {
    fn from(session: &AuthSession) -> Self {
        Self {
            wallet_address: session.wallet_address.clone(),
            user_id: session.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session(ttl: Duration) -> AuthSession {
        AuthSession::new(
            UserId::new(),
            WalletAddress::from_public_key(&[3u8; 32]),
            ttl,
        )
    }

    #[test]
    fn test_fresh_session_not_expired() {
        let session = test_session(Duration::days(7));
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 0);
    }

    #[test]
    fn test_negative_ttl_expired() {
        let session = test_session(Duration::seconds(-1));
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }

    #[test]
    fn test_session_data_binding() {
        let session = test_session(Duration::days(7));
        let data = SessionData::from(&session);
        assert_eq!(data.user_id, session.user_id);
        assert_eq!(data.wallet_address, session.wallet_address);
    }
}
