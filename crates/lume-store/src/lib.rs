//! # Lume Store
//!
//! Stateful application providers for the Lume sales tracker.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Provider Layer                                   │
//! │                                                                         │
//! │  Frontend (TypeScript)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AuthProvider ──── owns who is signed in                                │
//! │       │                │ watch channel: session changes                 │
//! │       ▼                ▼                                                │
//! │  StoreProvider ─── owns the signed-in user's working set                │
//! │       │            (sales, goals, customers, refreshed after            │
//! │       │             every mutation)                                     │
//! │       ▼                                                                 │
//! │  lume-db (SQLite) ── lume-core (pure types, stats calculator)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Rules
//! - Every read and mutation is scoped to the signed-in user.
//! - Mutations never patch in-memory state; they write, then refetch.
//! - Derived statistics are computed from the working set, never stored.

pub mod auth;
pub mod config;
pub mod error;
pub mod store;

pub use auth::{AuthProvider, SessionState};
pub use config::{AppConfig, ConfigError};
pub use error::{AuthError, StoreError};
pub use store::{NewCustomer, NewSale, StoreProvider};
