//! # Store Provider
//!
//! Owns the signed-in user's working set: sales, goals, customers, and the
//! derived statistics computed over them.
//!
//! ## Refresh Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_sale / update_goal / delete_customer / ...                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate ──► write through the repository ──► refresh()               │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │  working set replaced wholesale from the database                       │
//! │  (mutations never patch cached rows in place)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Statistics are recomputed from the working set on every call to
//! [`StoreProvider::stats`]; nothing derived is ever written back.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::AuthProvider;
use crate::error::StoreError;
use lume_core::stats::{compute_snapshot, goal_for_month};
use lume_core::validation::{
    validate_customer_name, validate_goal_target, validate_month_key, validate_price_cents,
    validate_product_name, validate_quantity,
};
use lume_core::{Customer, Goal, PaymentMethod, Sale, StatsSnapshot};
use lume_db::{Database, NewSaleRow};

/// A sale as entered in the form: per-unit prices and a quantity.
///
/// The provider folds quantity into the stored totals and the product label
/// before the row hits the database.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub product_name: String,
    pub quantity: i64,
    /// Cost per unit, in centavos.
    pub unit_cost_cents: i64,
    /// Sale price per unit, in centavos.
    pub unit_price_cents: i64,
    pub date: NaiveDate,
    /// Captured in the form but not persisted by the current schema.
    pub payment_method: PaymentMethod,
    pub customer_id: Option<String>,
}

/// A customer as entered in the form.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    /// Phone or social handle, free-form.
    pub contact_handle: Option<String>,
}

/// The cached working set for one signed-in user.
#[derive(Debug, Default)]
struct WorkingSet {
    sales: Vec<Sale>,
    goals: Vec<Goal>,
    customers: Vec<Customer>,
}

/// Provider owning the signed-in user's data.
///
/// Cheap to clone; clones share the cached working set.
#[derive(Debug, Clone)]
pub struct StoreProvider {
    db: Database,
    auth: AuthProvider,
    state: Arc<Mutex<WorkingSet>>,
}

impl StoreProvider {
    /// Creates a provider with an empty working set.
    pub fn new(db: Database, auth: AuthProvider) -> Self {
        StoreProvider {
            db,
            auth,
            state: Arc::new(Mutex::new(WorkingSet::default())),
        }
    }

    /// Spawns a task that mirrors session changes into the working set:
    /// sign-in and restore trigger a load, sign-out clears the cache.
    pub fn spawn_session_listener(&self) -> tokio::task::JoinHandle<()> {
        let provider = self.clone();
        let mut rx = self.auth.subscribe();

        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let signed_in = rx.borrow_and_update().is_some();
                if signed_in {
                    if let Err(e) = provider.refresh().await {
                        tracing::error!(error = %e, "Working set load failed");
                    }
                } else {
                    provider.clear().await;
                }
            }
        })
    }

    fn current_user_id(&self) -> Result<String, StoreError> {
        self.auth
            .current_user_id()
            .map_err(|_| StoreError::NotAuthenticated)
    }

    // =========================================================================
    // Working Set
    // =========================================================================

    /// Reloads the entire working set from the database.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        let user_id = self.current_user_id()?;

        let sales = self.db.sales().list_for_user(&user_id).await?;
        let goals = self.db.goals().list_for_user(&user_id).await?;
        let customers = self.db.customers().list_for_user(&user_id).await?;

        debug!(
            sales = sales.len(),
            goals = goals.len(),
            customers = customers.len(),
            "Working set refreshed"
        );

        let mut state = self.state.lock().await;
        state.sales = sales;
        state.goals = goals;
        state.customers = customers;

        Ok(())
    }

    /// Drops the cached working set (sign-out).
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        *state = WorkingSet::default();
    }

    /// Sales, newest transaction date first.
    pub async fn sales(&self) -> Vec<Sale> {
        self.state.lock().await.sales.clone()
    }

    /// Goals, most recent month first.
    pub async fn goals(&self) -> Vec<Goal> {
        self.state.lock().await.goals.clone()
    }

    /// Customers, alphabetical.
    pub async fn customers(&self) -> Vec<Customer> {
        self.state.lock().await.customers.clone()
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Records a sale.
    ///
    /// Quantity is folded into the stored row: totals are quantity times the
    /// unit prices, and the product label becomes `"{quantity}x {name}"`.
    pub async fn add_sale(&self, sale: NewSale) -> Result<(), StoreError> {
        let user_id = self.current_user_id()?;
        let row = self.sale_row(&user_id, Uuid::new_v4().to_string(), &sale)?;

        info!(product = %row.product_name, "Recording sale");
        self.db.sales().insert(&row).await?;
        self.refresh().await
    }

    /// Rewrites a sale's editable fields.
    pub async fn update_sale(&self, id: &str, sale: NewSale) -> Result<(), StoreError> {
        let user_id = self.current_user_id()?;
        let row = self.sale_row(&user_id, id.to_string(), &sale)?;

        self.db.sales().update(&row).await?;
        self.refresh().await
    }

    /// Deletes a sale.
    pub async fn delete_sale(&self, id: &str) -> Result<(), StoreError> {
        let user_id = self.current_user_id()?;

        self.db.sales().delete(id, &user_id).await?;
        self.refresh().await
    }

    fn sale_row(&self, user_id: &str, id: String, sale: &NewSale) -> Result<NewSaleRow, StoreError> {
        validate_product_name(&sale.product_name)?;
        validate_quantity(sale.quantity)?;
        validate_price_cents(sale.unit_cost_cents)?;
        validate_price_cents(sale.unit_price_cents)?;

        Ok(NewSaleRow {
            id,
            user_id: user_id.to_string(),
            product_name: format!("{}x {}", sale.quantity, sale.product_name.trim()),
            cost_price_cents: sale.unit_cost_cents * sale.quantity,
            sale_price_cents: sale.unit_price_cents * sale.quantity,
            date: sale.date,
            customer_id: sale.customer_id.clone(),
            created_at: Utc::now(),
        })
    }

    // =========================================================================
    // Goals
    // =========================================================================

    /// Sets the profit target for a month, creating or overwriting as needed.
    ///
    /// Upsert-by-lookup: the month's existing row is updated in place if one
    /// exists, so a month never accumulates more than one goal.
    pub async fn update_goal(&self, month: &str, target_cents: i64) -> Result<(), StoreError> {
        let user_id = self.current_user_id()?;
        validate_month_key(month)?;
        validate_goal_target(target_cents)?;

        match self.db.goals().find_by_month(&user_id, month).await? {
            Some(existing) => {
                info!(month, target_cents, "Overwriting goal");
                self.db
                    .goals()
                    .update_target(&existing.id, &user_id, target_cents)
                    .await?;
            }
            None => {
                info!(month, target_cents, "Creating goal");
                self.db
                    .goals()
                    .insert(&Goal {
                        id: Uuid::new_v4().to_string(),
                        user_id,
                        month: month.to_string(),
                        target_cents,
                        created_at: Utc::now(),
                    })
                    .await?;
            }
        }

        self.refresh().await
    }

    /// Deletes a goal.
    pub async fn delete_goal(&self, id: &str) -> Result<(), StoreError> {
        let user_id = self.current_user_id()?;

        self.db.goals().delete(id, &user_id).await?;
        self.refresh().await
    }

    /// The cached goal for a `"YYYY-MM"` month, if one is set.
    pub async fn goal_for_month(&self, month: &str) -> Option<Goal> {
        let state = self.state.lock().await;
        goal_for_month(&state.goals, month).cloned()
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Adds a customer to the registry.
    pub async fn add_customer(&self, customer: NewCustomer) -> Result<(), StoreError> {
        let user_id = self.current_user_id()?;
        validate_customer_name(&customer.name)?;

        self.db
            .customers()
            .insert(&Customer {
                id: Uuid::new_v4().to_string(),
                user_id,
                name: customer.name.trim().to_string(),
                contact_handle: customer.contact_handle,
                created_at: Utc::now(),
            })
            .await?;

        self.refresh().await
    }

    /// Rewrites a customer's name and contact handle.
    pub async fn update_customer(&self, id: &str, customer: NewCustomer) -> Result<(), StoreError> {
        let user_id = self.current_user_id()?;
        validate_customer_name(&customer.name)?;

        self.db
            .customers()
            .update(&Customer {
                id: id.to_string(),
                user_id,
                name: customer.name.trim().to_string(),
                contact_handle: customer.contact_handle,
                // Not written by update()
                created_at: Utc::now(),
            })
            .await?;

        self.refresh().await
    }

    /// Removes a customer from the registry.
    ///
    /// Sales linked to the customer keep their link; it simply stops
    /// resolving to a name.
    pub async fn delete_customer(&self, id: &str) -> Result<(), StoreError> {
        let user_id = self.current_user_id()?;

        self.db.customers().delete(id, &user_id).await?;
        self.refresh().await
    }

    /// Resolves a sale's customer link against the registry.
    ///
    /// Dangling links (deleted customers) resolve to `None`.
    pub async fn customer_name_for(&self, customer_id: &str) -> Option<String> {
        let state = self.state.lock().await;
        state
            .customers
            .iter()
            .find(|c| c.id == customer_id)
            .map(|c| c.name.clone())
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Statistics over the working set, with "today" taken from the local
    /// clock.
    pub async fn stats(&self) -> StatsSnapshot {
        self.stats_for(Local::now().date_naive()).await
    }

    /// Statistics over the working set for an explicit day.
    pub async fn stats_for(&self, today: NaiveDate) -> StatsSnapshot {
        let state = self.state.lock().await;
        compute_snapshot(&state.sales, &state.goals, today)
    }
}
