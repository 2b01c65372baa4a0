//! # User Repository
//!
//! Database operations for accounts and their sessions.
//!
//! ## Session Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sign_in                                                                │
//! │     │  verify password → create_session(user_id, ttl)                   │
//! │     ▼                                                                   │
//! │  sessions table: token (opaque UUID) → user_id, expires_at              │
//! │     │                                                                   │
//! │     │  app restart → find_session(token)                                │
//! │     │     expired rows are deleted on lookup and report None            │
//! │     ▼                                                                   │
//! │  sign_out → delete_session(token)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Password hashes are opaque strings here; hashing and verification live in
//! the auth provider. This layer never sees plaintext passwords.

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;

/// An account row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// A session row. The token is the opaque bearer credential handed to the
/// frontend; there is nothing to decode inside it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Repository for accounts and sessions.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    // === Accounts ===

    /// Creates an account.
    ///
    /// ## Errors
    /// Returns [`DbError::UniqueViolation`] when the email already has an
    /// account; the caller maps that to its own duplicate-email error.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        display_name: &str,
    ) -> DbResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            display_name: display_name.to_string(),
            created_at: Utc::now(),
        };

        debug!(email = %user.email, "Creating account");

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, display_name, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.display_name)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Finds an account by email.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, display_name, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Finds an account by id.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, display_name, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    // === Sessions ===

    /// Creates a session for a user with the given time-to-live.
    pub async fn create_session(&self, user_id: &str, ttl: Duration) -> DbResult<Session> {
        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at: now + ttl,
        };

        debug!(user_id = %session.user_id, "Creating session");

        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&session.token)
        .bind(&session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(session)
    }

    /// Looks up a session by token.
    ///
    /// Expired sessions are deleted on lookup and report `None`, so callers
    /// never observe a stale session.
    pub async fn find_session(&self, token: &str) -> DbResult<Option<Session>> {
        let session: Option<Session> = sqlx::query_as(
            r#"
            SELECT token, user_id, created_at, expires_at
            FROM sessions
            WHERE token = ?1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        match session {
            Some(s) if s.is_expired() => {
                debug!("Session expired, removing");
                self.delete_session(&s.token).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Deletes a session by token. Deleting an unknown token is a no-op.
    pub async fn delete_session(&self, token: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Removes all expired sessions. Returns how many rows were deleted.
    pub async fn purge_expired_sessions(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        let purged = result.rows_affected();
        if purged > 0 {
            debug!(purged, "Purged expired sessions");
        }
        Ok(purged)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_account() {
        let db = test_db().await;
        let repo = db.users();

        let user = repo
            .create("reseller@example.com", "phc-hash", "Reseller")
            .await
            .unwrap();

        let by_email = repo
            .find_by_email("reseller@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(by_email.display_name, "Reseller");

        let by_id = repo.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "reseller@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = test_db().await;
        let repo = db.users();

        repo.create("reseller@example.com", "h1", "A")
            .await
            .unwrap();
        let err = repo
            .create("reseller@example.com", "h2", "B")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let db = test_db().await;
        let repo = db.users();

        let user = repo.create("a@b.com", "h", "A").await.unwrap();
        let session = repo
            .create_session(&user.id, Duration::days(30))
            .await
            .unwrap();

        let found = repo.find_session(&session.token).await.unwrap().unwrap();
        assert_eq!(found.user_id, user.id);
        assert!(!found.is_expired());

        repo.delete_session(&session.token).await.unwrap();
        assert!(repo.find_session(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_reports_none_and_is_purged() {
        let db = test_db().await;
        let repo = db.users();

        let user = repo.create("a@b.com", "h", "A").await.unwrap();
        let session = repo
            .create_session(&user.id, Duration::seconds(-1))
            .await
            .unwrap();

        // Lookup sees the expiry, deletes the row, and reports None
        assert!(repo.find_session(&session.token).await.unwrap().is_none());
        assert_eq!(repo.purge_expired_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_purge_expired_sessions() {
        let db = test_db().await;
        let repo = db.users();

        let user = repo.create("a@b.com", "h", "A").await.unwrap();
        repo.create_session(&user.id, Duration::seconds(-1))
            .await
            .unwrap();
        let live = repo
            .create_session(&user.id, Duration::days(30))
            .await
            .unwrap();

        assert_eq!(repo.purge_expired_sessions().await.unwrap(), 1);
        assert!(repo.find_session(&live.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_session_for_unknown_user_is_fk_violation() {
        let db = test_db().await;
        let err = db
            .users()
            .create_session("no-such-user", Duration::days(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
