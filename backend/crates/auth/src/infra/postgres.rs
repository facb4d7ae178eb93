//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::SessionId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{session::AuthSession, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{UserId, Username, WalletAddress};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn resolve_or_create(&self, wallet_address: &WalletAddress) -> AuthResult<User> {
        // Upsert keyed on the unique wallet_address column. Under a
        // concurrent first login both inserts target the same key and
        // the no-op DO UPDATE makes RETURNING yield the surviving row
        // for winner and loser alike.
        let candidate = User::new(wallet_address.clone());

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                user_id,
                wallet_address,
                is_creator,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (wallet_address)
                DO UPDATE SET wallet_address = EXCLUDED.wallet_address
            RETURNING
                user_id,
                wallet_address,
                username,
                display_name,
                bio,
                email,
                profile_image,
                cover_image,
                is_creator,
                subscription_price,
                created_at,
                updated_at
            "#,
        )
        .bind(candidate.user_id.as_uuid())
        .bind(candidate.wallet_address.as_str())
        .bind(candidate.is_creator)
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.into_user()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                wallet_address,
                username,
                display_name,
                bio,
                email,
                profile_image,
                cover_image,
                is_creator,
                subscription_price,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_wallet_address(
        &self,
        wallet_address: &WalletAddress,
    ) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                wallet_address,
                username,
                display_name,
                bio,
                email,
                profile_image,
                cover_image,
                is_creator,
                subscription_price,
                created_at,
                updated_at
            FROM users
            WHERE wallet_address = $1
            "#,
        )
        .bind(wallet_address.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                wallet_address,
                username,
                display_name,
                bio,
                email,
                profile_image,
                cover_image,
                is_creator,
                subscription_price,
                created_at,
                updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                display_name = $3,
                bio = $4,
                email = $5,
                profile_image = $6,
                cover_image = $7,
                is_creator = $8,
                subscription_price = $9,
                updated_at = $10
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.username.as_ref().map(|u| u.as_str()))
        .bind(&user.display_name)
        .bind(&user.bio)
        .bind(&user.email)
        .bind(&user.profile_image)
        .bind(&user.cover_image)
        .bind(user.is_creator)
        .bind(user.subscription_price)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                wallet_address,
                expires_at_ms,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.session_id.into_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.wallet_address.as_str())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: SessionId) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                wallet_address,
                expires_at_ms,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_session()).transpose()
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions SET
                expires_at_ms = $2,
                last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id.into_uuid())
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: SessionId) -> AuthResult<()> {
        // Deleting an already-gone session is fine; logout is idempotent
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        self.cleanup_expired().await
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    wallet_address: String,
    username: Option<String>,
    display_name: Option<String>,
    bio: Option<String>,
    email: Option<String>,
    profile_image: Option<String>,
    cover_image: Option<String>,
    is_creator: bool,
    subscription_price: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let wallet_address = WalletAddress::parse(&self.wallet_address)
            .map_err(|e| AuthError::Internal(format!("Invalid wallet_address: {}", e)))?;

        let username = self
            .username
            .map(Username::new)
            .transpose()
            .map_err(|e| AuthError::Internal(format!("Invalid username: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            wallet_address,
            username,
            display_name: self.display_name,
            bio: self.bio,
            email: self.email,
            profile_image: self.profile_image,
            cover_image: self.cover_image,
            is_creator: self.is_creator,
            subscription_price: self.subscription_price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: Uuid,
    wallet_address: String,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthResult<AuthSession> {
        let wallet_address = WalletAddress::parse(&self.wallet_address)
            .map_err(|e| AuthError::Internal(format!("Invalid wallet_address: {}", e)))?;

        Ok(AuthSession {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            wallet_address,
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        })
    }
}
