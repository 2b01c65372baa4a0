//! # Repository Module
//!
//! Database repository implementations for the Lume sales tracker.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  StoreProvider                                                         │
//! │       │                                                                 │
//! │       │  db.sales().list_for_user(user_id)                             │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── list_for_user(&self, user_id)                                     │
//! │  ├── insert(&self, row)                                                │
//! │  ├── update(&self, row)                                                │
//! │  └── delete(&self, id, user_id)                                        │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                        │
//! │  • Per-user row scoping lives in exactly one layer                     │
//! │  • Easy to test against an in-memory database                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`sale::SaleRepository`] - Sale rows (totals at storage time)
//! - [`goal::GoalRepository`] - Monthly profit targets
//! - [`customer::CustomerRepository`] - Customer registry
//! - [`user::UserRepository`] - Accounts and sessions

pub mod customer;
pub mod goal;
pub mod sale;
pub mod user;
