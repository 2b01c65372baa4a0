//! # Customer Repository
//!
//! Database operations for the customer registry.
//!
//! Deleting a customer only removes the registry row. Sales that reference
//! the customer keep their `customer_id` value and simply stop resolving to
//! a name; this repository never touches the sales table.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use lume_core::Customer;

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    user_id: String,
    name: String,
    contact_handle: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            contact_handle: row.contact_handle,
            created_at: row.created_at,
        }
    }
}

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists all customers for a user, alphabetically by name.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<Customer>> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, contact_handle, created_at
            FROM customers
            WHERE user_id = ?1
            ORDER BY name COLLATE NOCASE ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Gets a customer by id, scoped to the owning user.
    pub async fn get_by_id(&self, id: &str, user_id: &str) -> DbResult<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, contact_handle, created_at
            FROM customers
            WHERE id = ?1 AND user_id = ?2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    /// Inserts a customer row.
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, name = %customer.name, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, user_id, name, contact_handle, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.user_id)
        .bind(&customer.name)
        .bind(&customer.contact_handle)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a customer's name and contact handle, scoped to the owning user.
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers SET name = ?3, contact_handle = ?4
            WHERE id = ?1 AND user_id = ?2
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.user_id)
        .bind(&customer.name)
        .bind(&customer.contact_handle)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.id));
        }

        Ok(())
    }

    /// Deletes a customer by id, scoped to the owning user.
    ///
    /// Sales referencing this customer are left untouched.
    pub async fn delete(&self, id: &str, user_id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::sale::NewSaleRow;
    use chrono::NaiveDate;
    use uuid::Uuid;

    async fn test_db_with_user() -> (Database, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user = db
            .users()
            .create("reseller@example.com", "hash", "Reseller")
            .await
            .unwrap();
        (db, user.id)
    }

    fn customer_for(user_id: &str, name: &str) -> Customer {
        Customer {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            contact_handle: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_list_alphabetical() {
        let (db, user_id) = test_db_with_user().await;
        let repo = db.customers();

        repo.insert(&customer_for(&user_id, "maria")).await.unwrap();
        repo.insert(&customer_for(&user_id, "Ana")).await.unwrap();
        repo.insert(&customer_for(&user_id, "Carla")).await.unwrap();

        let customers = repo.list_for_user(&user_id).await.unwrap();
        let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Carla", "maria"]);
    }

    #[tokio::test]
    async fn test_update_contact_handle() {
        let (db, user_id) = test_db_with_user().await;
        let repo = db.customers();

        let mut customer = customer_for(&user_id, "Ana");
        repo.insert(&customer).await.unwrap();

        customer.contact_handle = Some("@ana.beleza".to_string());
        repo.update(&customer).await.unwrap();

        let fetched = repo
            .get_by_id(&customer.id, &user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.contact_handle.as_deref(), Some("@ana.beleza"));
    }

    #[tokio::test]
    async fn test_delete_leaves_linked_sales_alone() {
        let (db, user_id) = test_db_with_user().await;

        let customer = customer_for(&user_id, "Ana");
        db.customers().insert(&customer).await.unwrap();

        db.sales()
            .insert(&NewSaleRow {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.clone(),
                product_name: "1x Batom".to_string(),
                cost_price_cents: 500,
                sale_price_cents: 1500,
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                customer_id: Some(customer.id.clone()),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        db.customers().delete(&customer.id, &user_id).await.unwrap();

        // Sale survives with its (now dangling) customer link intact
        let sales = db.sales().list_for_user(&user_id).await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].customer_id.as_deref(), Some(customer.id.as_str()));
    }

    #[tokio::test]
    async fn test_delete_foreign_row_is_not_found() {
        let (db, user_id) = test_db_with_user().await;
        let repo = db.customers();

        let customer = customer_for(&user_id, "Ana");
        repo.insert(&customer).await.unwrap();

        let err = repo.delete(&customer.id, "someone-else").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
