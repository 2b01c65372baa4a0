//! # Seed Data Generator
//!
//! Creates a demo account with sample sales, goals, and customers for
//! development.
//!
//! ## Usage
//! ```bash
//! cargo run -p lume-store --bin seed
//!
//! # Specify database path
//! LUME_DATABASE_PATH=./data/lume.db cargo run -p lume-store --bin seed
//! ```
//!
//! ## Demo Account
//! - Email: `demo@lume.app`
//! - Password: `demo123`
//!
//! Re-running against an existing database signs into the demo account and
//! adds another batch of sample data.

use chrono::{Datelike, Duration, Local};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lume_core::PaymentMethod;
use lume_db::{Database, DbConfig};
use lume_store::{AppConfig, AuthProvider, NewCustomer, NewSale, StoreProvider};

const DEMO_EMAIL: &str = "demo@lume.app";
const DEMO_PASSWORD: &str = "demo123";

/// Sample catalog: (product, unit cost centavos, unit price centavos).
const PRODUCTS: &[(&str, i64, i64)] = &[
    ("Perfume Essence 50ml", 4500, 9900),
    ("Batom Matte Vermelho", 900, 2500),
    ("Base Liquida Natural", 2200, 4990),
    ("Mascara de Cilios", 1500, 3490),
    ("Hidratante Corporal", 1800, 3990),
    ("Kit Esmaltes", 1200, 2990),
];

const CUSTOMERS: &[(&str, Option<&str>)] = &[
    ("Ana Souza", Some("@ana.souza")),
    ("Maria Silva", Some("(11) 99999-0001")),
    ("Carla Mendes", None),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(path = %config.database_path.display(), "Seeding database");

    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.max_connections),
    )
    .await?;

    let auth = AuthProvider::new(db.clone(), config.session_lifetime());

    // Sign in if the demo account already exists, create it otherwise
    let session = match auth.sign_in(DEMO_EMAIL, DEMO_PASSWORD).await {
        Ok(session) => session,
        Err(_) => {
            auth.sign_up(DEMO_EMAIL, DEMO_PASSWORD, DEMO_PASSWORD, "Demo Reseller")
                .await?
        }
    };
    info!(user_id = %session.user_id, "Demo account ready");

    let store = StoreProvider::new(db.clone(), auth.clone());
    store.refresh().await?;

    for &(name, handle) in CUSTOMERS {
        store
            .add_customer(NewCustomer {
                name: name.to_string(),
                contact_handle: handle.map(str::to_string),
            })
            .await?;
    }

    let customers = store.customers().await;
    let today = Local::now().date_naive();

    // One sale per product, spread over the last two weeks
    for (i, &(product, cost, price)) in PRODUCTS.iter().enumerate() {
        let quantity = (i as i64 % 3) + 1;
        let customer_id = customers.get(i % customers.len()).map(|c| c.id.clone());

        store
            .add_sale(NewSale {
                product_name: product.to_string(),
                quantity,
                unit_cost_cents: cost,
                unit_price_cents: price,
                date: today - Duration::days((i as i64 * 3) % 14),
                payment_method: match i % 3 {
                    0 => PaymentMethod::Pix,
                    1 => PaymentMethod::Cash,
                    _ => PaymentMethod::Card,
                },
                customer_id,
            })
            .await?;
    }

    // A goal for the current month: R$ 1.500,00 of profit
    let month = format!("{:04}-{:02}", today.year(), today.month());
    store.update_goal(&month, 150_000).await?;

    let stats = store.stats().await;
    info!(
        sales = store.sales().await.len(),
        customers = customers.len(),
        month_profit_cents = stats.month_profit_cents,
        progress = stats.month_goal_progress,
        "Seed complete"
    );

    db.close().await;
    Ok(())
}
