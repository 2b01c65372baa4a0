//! # lume-core: Pure Business Logic for the Lume Sales Tracker
//!
//! This crate is the **heart** of Lume. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Lume Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (Web UI)                            │   │
//! │  │    Dashboard ──► Add Sale ──► Goals ──► Customers              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              lume-store (providers)                             │   │
//! │  │    AuthProvider, StoreProvider, stats snapshot per reload      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lume-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   stats   │  │ validation│  │   │
//! │  │   │   Sale    │  │   Money   │  │ Snapshot  │  │   rules   │  │   │
//! │  │   │   Goal    │  │ (cents)   │  │ computing │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    lume-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, Goal, Customer, PaymentMethod)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`stats`] - Derived statistics over the loaded working set
//! - [`error`] - Domain error types
//! - [`validation`] - Entry-time validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lume_core::stats::compute_snapshot;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
//! let snapshot = compute_snapshot(&[], &[], today);
//!
//! // Empty working set yields zeros, never an error
//! assert_eq!(snapshot.month_profit_cents, 0);
//! assert_eq!(snapshot.month_goal_progress, 0.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use lume_core::Money` instead of
// `use lume_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use stats::{compute_snapshot, goal_for_month, StatsSnapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity for a single recorded sale
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g., typing 1000 instead of 10).
/// A reseller moving more than 999 units of one product in one entry
/// is outside this product's scale.
pub const MAX_SALE_QUANTITY: i64 = 999;

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum length for product and customer names
pub const MAX_NAME_LEN: usize = 200;
