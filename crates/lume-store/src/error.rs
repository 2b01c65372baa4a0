//! Provider error types.
//!
//! Two families: [`AuthError`] for the sign-in surface, [`StoreError`] for
//! the data surface. Both carry user-presentable messages; the frontend shows
//! them as transient notifications.

use lume_core::ValidationError;
use lume_db::DbError;
use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong email or wrong password.
    ///
    /// Deliberately a single variant: the message never reveals whether the
    /// email has an account.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Sign-up attempted with an email that already has an account.
    #[error("An account with this email already exists")]
    EmailTaken,

    /// The presented session token is unknown or expired.
    #[error("Session expired, please sign in again")]
    SessionExpired,

    /// An operation that requires a signed-in user was called without one.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Input validation failed (email shape, password length, confirmation).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Password hashing or verification failed.
    #[error("Password processing failed")]
    Hash,

    /// Underlying database error.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Store (sales, goals, customers) errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An operation was called while no user is signed in.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying database error.
    #[error(transparent)]
    Db(#[from] DbError),
}
