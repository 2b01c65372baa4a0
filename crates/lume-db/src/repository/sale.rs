//! # Sale Repository
//!
//! Database operations for sale rows.
//!
//! ## Storage Shape vs Domain Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Row Mapping                                     │
//! │                                                                         │
//! │  ENTRY (provider)                 STORAGE (this repo)                  │
//! │  ───────────────                  ───────────────────                  │
//! │  quantity: 3                      product_name: "3x Lip Gloss"         │
//! │  unit cost: R$10.00       ──►     cost_price_cents: 3000 (total)       │
//! │  unit price: R$25.00              sale_price_cents: 7500 (total)       │
//! │  payment: Pix                     (payment method not persisted)       │
//! │                                                                         │
//! │  READ (back to domain)                                                 │
//! │  ─────────────────────                                                 │
//! │  quantity folded to 1, payment method defaulted to Cash,               │
//! │  profit derived as sale - cost, never read from storage                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every read is filtered to the owning user; a sale id from another account
//! behaves exactly like a missing row.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use lume_core::{PaymentMethod, Sale};

/// A sale row exactly as stored.
///
/// Kept private to this module; the public API speaks domain [`Sale`].
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    user_id: String,
    product_name: String,
    cost_price_cents: i64,
    sale_price_cents: i64,
    date: NaiveDate,
    customer_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Sale {
            id: row.id,
            user_id: row.user_id,
            product_name: row.product_name,
            // Storage aggregates totals; read-side quantity is always 1
            quantity: 1,
            cost_cents: row.cost_price_cents,
            sale_cents: row.sale_price_cents,
            date: row.date,
            // Not persisted by the row schema; defaulted on read
            payment_method: PaymentMethod::default(),
            customer_id: row.customer_id,
            created_at: row.created_at,
        }
    }
}

/// A sale row ready for insert or update.
///
/// The provider builds this after folding quantity into the totals and the
/// label. `cost_price_cents` and `sale_price_cents` are totals, not units.
#[derive(Debug, Clone)]
pub struct NewSaleRow {
    pub id: String,
    pub user_id: String,
    pub product_name: String,
    pub cost_price_cents: i64,
    pub sale_price_cents: i64,
    pub date: NaiveDate,
    pub customer_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Lists all sales for a user, newest transaction date first.
    ///
    /// This is the select-all-for-user read the provider's `refresh()` runs
    /// after every mutation.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<Sale>> {
        let rows: Vec<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, product_name, cost_price_cents, sale_price_cents,
                   date, customer_id, created_at
            FROM sales
            WHERE user_id = ?1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Sale::from).collect())
    }

    /// Gets a single sale by id, scoped to the owning user.
    pub async fn get_by_id(&self, id: &str, user_id: &str) -> DbResult<Option<Sale>> {
        let row: Option<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, product_name, cost_price_cents, sale_price_cents,
                   date, customer_id, created_at
            FROM sales
            WHERE id = ?1 AND user_id = ?2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Sale::from))
    }

    /// Inserts a sale row.
    pub async fn insert(&self, row: &NewSaleRow) -> DbResult<()> {
        debug!(id = %row.id, product = %row.product_name, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, user_id, product_name, cost_price_cents, sale_price_cents,
                date, customer_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.product_name)
        .bind(row.cost_price_cents)
        .bind(row.sale_price_cents)
        .bind(row.date)
        .bind(&row.customer_id)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a sale row by id, scoped to the owning user.
    ///
    /// Overwrites the editable fields; `created_at` is immutable.
    pub async fn update(&self, row: &NewSaleRow) -> DbResult<()> {
        debug!(id = %row.id, "Updating sale");

        let result = sqlx::query(
            r#"
            UPDATE sales SET
                product_name = ?3,
                cost_price_cents = ?4,
                sale_price_cents = ?5,
                date = ?6,
                customer_id = ?7
            WHERE id = ?1 AND user_id = ?2
            "#,
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.product_name)
        .bind(row.cost_price_cents)
        .bind(row.sale_price_cents)
        .bind(row.date)
        .bind(&row.customer_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", &row.id));
        }

        Ok(())
    }

    /// Deletes a sale by id, scoped to the owning user.
    pub async fn delete(&self, id: &str, user_id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting sale");

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
