//! # lume-db: Database Layer for the Lume Sales Tracker
//!
//! This crate provides database access for the Lume sales tracker.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Lume Data Flow                                  │
//! │                                                                         │
//! │  StoreProvider / AuthProvider (lume-store)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      lume-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (sale.rs,    │    │  (embedded)  │  │   │
//! │  │   │               │    │   goal.rs,    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│   customer.rs,│    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │   user.rs)    │    │              │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (sale, goal, customer, user)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lume_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let config = DbConfig::new("path/to/lume.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories; every read is scoped to the owning user
//! let sales = db.sales().list_for_user("user-uuid").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::goal::GoalRepository;
pub use repository::sale::{NewSaleRow, SaleRepository};
pub use repository::user::{Session, User, UserRepository};
