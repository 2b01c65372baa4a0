//! # Auth Provider
//!
//! Account sign-up, sign-in, sign-out, and session restore.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sign_up ──► validate ──► argon2 hash ──► users row ──► session row    │
//! │  sign_in ──► find account ──► verify hash ──► session row              │
//! │  restore ──► find_session(token) ──► load account ──► signed in        │
//! │  sign_out ──► delete session row ──► signed out                        │
//! │                                                                         │
//! │  Every transition publishes on a watch channel; the store layer         │
//! │  subscribes and loads or clears the working set accordingly.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Credential Privacy
//! Sign-in failure is a single error regardless of whether the email exists
//! or the password was wrong. When no account matches, a throwaway hash is
//! still verified so both paths cost roughly the same.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::AuthError;
use lume_core::validation::{validate_email, validate_password, validate_password_confirmation};
use lume_db::{Database, DbError};

/// The signed-in identity handed to the frontend and the store layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Opaque bearer token; also the sessions-table primary key.
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub expires_at: DateTime<Utc>,
}

/// Provider owning authentication state.
///
/// Cheap to clone; clones share the same session watch channel.
#[derive(Debug, Clone)]
pub struct AuthProvider {
    db: Database,
    session_lifetime: Duration,
    session_tx: watch::Sender<Option<SessionState>>,
}

impl AuthProvider {
    /// Creates a provider in the signed-out state.
    pub fn new(db: Database, session_lifetime: Duration) -> Self {
        let (session_tx, _) = watch::channel(None);
        AuthProvider {
            db,
            session_lifetime,
            session_tx,
        }
    }

    /// Registers a new account and signs it in.
    ///
    /// ## Errors
    /// - [`AuthError::Validation`] - bad email shape, short password, or
    ///   confirmation mismatch
    /// - [`AuthError::EmailTaken`] - the email already has an account
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirmation: &str,
        display_name: &str,
    ) -> Result<SessionState, AuthError> {
        validate_email(email)?;
        validate_password(password)?;
        validate_password_confirmation(password, confirmation)?;

        let email = email.trim().to_lowercase();
        let display_name = display_name.trim();
        // Fall back to the email's local part when no name was given
        let display_name = if display_name.is_empty() {
            email.split('@').next().unwrap_or_default()
        } else {
            display_name
        };

        let password_hash = hash_password(password)?;

        let user = match self.db.users().create(&email, &password_hash, display_name).await {
            Ok(user) => user,
            Err(DbError::UniqueViolation { .. }) => {
                warn!(email = %email, "Sign-up with taken email");
                return Err(AuthError::EmailTaken);
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, "Account created");

        self.open_session(&user.id, &user.email, &user.display_name)
            .await
    }

    /// Signs in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionState, AuthError> {
        let email = email.trim().to_lowercase();

        let user = self.db.users().find_by_email(&email).await?;

        let user = match user {
            Some(user) => user,
            None => {
                // Burn comparable time so a missing account is not
                // distinguishable by response latency
                let _ = verify_password("throwaway", &hash_password("throwaway")?);
                warn!("Sign-in with unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Sign-in with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %user.id, "Signed in");

        self.open_session(&user.id, &user.email, &user.display_name)
            .await
    }

    /// Restores a session from a stored token (app relaunch).
    ///
    /// Unknown and expired tokens both report [`AuthError::SessionExpired`].
    pub async fn restore(&self, token: &str) -> Result<SessionState, AuthError> {
        let session = self
            .db
            .users()
            .find_session(token)
            .await?
            .ok_or(AuthError::SessionExpired)?;

        let user = self
            .db
            .users()
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AuthError::SessionExpired)?;

        let state = SessionState {
            token: session.token,
            user_id: user.id,
            email: user.email,
            display_name: user.display_name,
            expires_at: session.expires_at,
        };

        info!(user_id = %state.user_id, "Session restored");
        self.session_tx.send_replace(Some(state.clone()));

        Ok(state)
    }

    /// Signs the current user out, deleting the session row.
    ///
    /// Signing out while already signed out is a no-op.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let current = self.session_tx.borrow().clone();

        if let Some(state) = current {
            self.db.users().delete_session(&state.token).await?;
            info!(user_id = %state.user_id, "Signed out");
        }

        self.session_tx.send_replace(None);
        Ok(())
    }

    /// The current session, if signed in.
    pub fn current_session(&self) -> Option<SessionState> {
        self.session_tx.borrow().clone()
    }

    /// The current user's id, or [`AuthError::NotAuthenticated`].
    pub fn current_user_id(&self) -> Result<String, AuthError> {
        self.current_session()
            .map(|s| s.user_id)
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Subscribes to session changes.
    ///
    /// The receiver observes `Some(state)` on sign-in/restore and `None` on
    /// sign-out. The store layer uses this to load or clear the working set.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionState>> {
        self.session_tx.subscribe()
    }

    async fn open_session(
        &self,
        user_id: &str,
        email: &str,
        display_name: &str,
    ) -> Result<SessionState, AuthError> {
        let session = self
            .db
            .users()
            .create_session(user_id, self.session_lifetime)
            .await?;

        let state = SessionState {
            token: session.token,
            user_id: user_id.to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            expires_at: session.expires_at,
        };

        self.session_tx.send_replace(Some(state.clone()));
        Ok(state)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a password with argon2id into a PHC string.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::Hash)?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC string.
fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::Hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

// =============================================================================
// Unit Tests
// =============================================================================
