//! End-to-end provider tests over an in-memory database.
//!
//! These exercise the full path the frontend takes: sign up, record data
//! through the store provider, read the derived statistics, sign out.

use chrono::{Datelike, Duration, Local, NaiveDate};

use lume_core::PaymentMethod;
use lume_db::{Database, DbConfig};
use lume_store::{AuthProvider, NewCustomer, NewSale, StoreError, StoreProvider};

async fn signed_in_providers() -> (AuthProvider, StoreProvider) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let auth = AuthProvider::new(db.clone(), Duration::days(30));

    auth.sign_up("ana@example.com", "secret1", "secret1", "Ana")
        .await
        .unwrap();

    let store = StoreProvider::new(db, auth.clone());
    store.refresh().await.unwrap();
    (auth, store)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sale(product: &str, quantity: i64, cost: i64, price: i64, date: NaiveDate) -> NewSale {
    NewSale {
        product_name: product.to_string(),
        quantity,
        unit_cost_cents: cost,
        unit_price_cents: price,
        date,
        payment_method: PaymentMethod::Pix,
        customer_id: None,
    }
}

#[tokio::test]
async fn sale_entry_folds_quantity_into_stored_row() {
    let (_auth, store) = signed_in_providers().await;

    store
        .add_sale(sale("Batom Matte", 3, 1000, 2500, day(2024, 5, 10)))
        .await
        .unwrap();

    let sales = store.sales().await;
    assert_eq!(sales.len(), 1);

    // Label carries the quantity, prices are totals, read-back quantity is 1
    assert_eq!(sales[0].product_name, "3x Batom Matte");
    assert_eq!(sales[0].cost_cents, 3000);
    assert_eq!(sales[0].sale_cents, 7500);
    assert_eq!(sales[0].quantity, 1);
    assert_eq!(sales[0].profit_cents(), 4500);

    // Entry-time payment method is not persisted; reads default to Cash
    assert_eq!(sales[0].payment_method, PaymentMethod::Cash);
}

#[tokio::test]
async fn sale_update_and_delete_refresh_the_working_set() {
    let (_auth, store) = signed_in_providers().await;

    store
        .add_sale(sale("Perfume", 1, 4500, 9900, day(2024, 5, 10)))
        .await
        .unwrap();
    let id = store.sales().await[0].id.clone();

    store
        .update_sale(&id, sale("Perfume", 2, 4500, 9900, day(2024, 5, 11)))
        .await
        .unwrap();

    let sales = store.sales().await;
    assert_eq!(sales[0].product_name, "2x Perfume");
    assert_eq!(sales[0].sale_cents, 19800);
    assert_eq!(sales[0].date, day(2024, 5, 11));

    store.delete_sale(&id).await.unwrap();
    assert!(store.sales().await.is_empty());
}

#[tokio::test]
async fn invalid_sale_input_never_reaches_storage() {
    let (_auth, store) = signed_in_providers().await;

    let bad_name = store
        .add_sale(sale("", 1, 100, 200, day(2024, 5, 10)))
        .await;
    assert!(matches!(bad_name, Err(StoreError::Validation(_))));

    let bad_quantity = store
        .add_sale(sale("Perfume", 0, 100, 200, day(2024, 5, 10)))
        .await;
    assert!(matches!(bad_quantity, Err(StoreError::Validation(_))));

    let bad_price = store
        .add_sale(sale("Perfume", 1, -100, 200, day(2024, 5, 10)))
        .await;
    assert!(matches!(bad_price, Err(StoreError::Validation(_))));

    assert!(store.sales().await.is_empty());
}

#[tokio::test]
async fn goal_upsert_keeps_one_row_per_month() {
    let (_auth, store) = signed_in_providers().await;

    store.update_goal("2024-05", 100_000).await.unwrap();
    store.update_goal("2024-05", 250_000).await.unwrap();
    store.update_goal("2024-06", 50_000).await.unwrap();

    let goals = store.goals().await;
    assert_eq!(goals.len(), 2);

    let may = store.goal_for_month("2024-05").await.unwrap();
    assert_eq!(may.target_cents, 250_000);
}

#[tokio::test]
async fn goal_rejects_malformed_month() {
    let (_auth, store) = signed_in_providers().await;

    assert!(matches!(
        store.update_goal("May 2024", 100_000).await,
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        store.update_goal("2024-05", -1).await,
        Err(StoreError::Validation(_))
    ));
}

#[tokio::test]
async fn stats_match_the_worked_dashboard_example() {
    let (_auth, store) = signed_in_providers().await;

    // Two May sales with profit 50.00 + 30.00 against a 100.00 goal
    store
        .add_sale(sale("Perfume", 1, 1000, 6000, day(2024, 5, 1)))
        .await
        .unwrap();
    store
        .add_sale(sale("Batom", 1, 1000, 4000, day(2024, 5, 15)))
        .await
        .unwrap();
    store.update_goal("2024-05", 10_000).await.unwrap();

    let stats = store.stats_for(day(2024, 5, 20)).await;
    assert_eq!(stats.month_profit_cents, 8000);
    assert_eq!(stats.month_sales_count, 2);
    assert_eq!(stats.month_goal_progress, 80.0);
    assert_eq!(stats.today_sales_count, 0);

    // From the 15th, the second sale is also "today"
    let on_the_15th = store.stats_for(day(2024, 5, 15)).await;
    assert_eq!(on_the_15th.today_profit_cents, 3000);
    assert_eq!(on_the_15th.today_sales_count, 1);
}

#[tokio::test]
async fn customer_deletion_leaves_sales_dangling() {
    let (_auth, store) = signed_in_providers().await;

    store
        .add_customer(NewCustomer {
            name: "Ana Souza".to_string(),
            contact_handle: Some("@ana.souza".to_string()),
        })
        .await
        .unwrap();
    let customer_id = store.customers().await[0].id.clone();

    let mut linked = sale("Perfume", 1, 1000, 2000, day(2024, 5, 10));
    linked.customer_id = Some(customer_id.clone());
    store.add_sale(linked).await.unwrap();

    assert_eq!(
        store.customer_name_for(&customer_id).await.as_deref(),
        Some("Ana Souza")
    );

    store.delete_customer(&customer_id).await.unwrap();

    // The sale keeps its link; the link just stops resolving
    let sales = store.sales().await;
    assert_eq!(sales[0].customer_id.as_deref(), Some(customer_id.as_str()));
    assert!(store.customer_name_for(&customer_id).await.is_none());
}

#[tokio::test]
async fn operations_require_a_signed_in_user() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let auth = AuthProvider::new(db.clone(), Duration::days(30));
    let store = StoreProvider::new(db, auth);

    assert!(matches!(
        store.refresh().await,
        Err(StoreError::NotAuthenticated)
    ));
    assert!(matches!(
        store
            .add_sale(sale("Perfume", 1, 100, 200, day(2024, 5, 10)))
            .await,
        Err(StoreError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn users_only_see_their_own_data() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let auth = AuthProvider::new(db.clone(), Duration::days(30));
    let store = StoreProvider::new(db, auth.clone());

    // First account records a sale and a goal
    auth.sign_up("ana@example.com", "secret1", "secret1", "Ana")
        .await
        .unwrap();
    store.refresh().await.unwrap();
    store
        .add_sale(sale("Perfume", 1, 1000, 2000, day(2024, 5, 10)))
        .await
        .unwrap();
    store.update_goal("2024-05", 10_000).await.unwrap();
    auth.sign_out().await.unwrap();

    // Second account sees an empty working set
    auth.sign_up("bia@example.com", "secret2", "secret2", "Bia")
        .await
        .unwrap();
    store.refresh().await.unwrap();

    assert!(store.sales().await.is_empty());
    assert!(store.goals().await.is_empty());
    assert_eq!(store.stats_for(day(2024, 5, 20)).await.month_sales_count, 0);
}

#[tokio::test]
async fn session_listener_loads_and_clears_the_working_set() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let auth = AuthProvider::new(db.clone(), Duration::days(30));

    // Existing account with one sale on record
    auth.sign_up("ana@example.com", "secret1", "secret1", "Ana")
        .await
        .unwrap();
    let store = StoreProvider::new(db, auth.clone());
    store.refresh().await.unwrap();
    store
        .add_sale(sale("Perfume", 1, 1000, 2000, day(2024, 5, 10)))
        .await
        .unwrap();
    auth.sign_out().await.unwrap();
    store.clear().await;

    let listener = store.spawn_session_listener();

    auth.sign_in("ana@example.com", "secret1").await.unwrap();
    // The listener runs asynchronously; poll briefly for the load
    for _ in 0..50 {
        if !store.sales().await.is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(store.sales().await.len(), 1);

    auth.sign_out().await.unwrap();
    for _ in 0..50 {
        if store.sales().await.is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert!(store.sales().await.is_empty());

    listener.abort();
}

#[tokio::test]
async fn stats_use_local_clock_day() {
    let (_auth, store) = signed_in_providers().await;

    let today = Local::now().date_naive();
    store
        .add_sale(sale("Perfume", 1, 1000, 3500, today))
        .await
        .unwrap();

    let month = format!("{:04}-{:02}", today.year(), today.month());
    store.update_goal(&month, 10_000).await.unwrap();

    let stats = store.stats().await;
    assert_eq!(stats.today_profit_cents, 2500);
    assert_eq!(stats.month_profit_cents, 2500);
    assert_eq!(stats.month_goal_progress, 25.0);
}
