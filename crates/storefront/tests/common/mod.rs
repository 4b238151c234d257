//! Shared helpers for storefront integration tests.
//!
//! Every test gets its own in-memory `SQLite` database with the full schema
//! applied. The pool is capped at one connection so all queries see the same
//! in-memory database.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use juniper_core::Price;
use juniper_storefront::config::PaymentConfig;
use juniper_storefront::db::{MIGRATOR, ProductRepository};
use juniper_storefront::models::{Product, User};
use juniper_storefront::services::auth::AuthService;

/// Create a migrated in-memory database.
pub async fn setup_db() -> SqlitePool {
    let options: SqliteConnectOptions = "sqlite::memory:"
        .parse::<SqliteConnectOptions>()
        .expect("valid in-memory database URL")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");

    pool
}

/// Insert a catalog product.
#[allow(dead_code)]
pub async fn seed_product(pool: &SqlitePool, name: &str, price_cents: i64) -> Product {
    ProductRepository::new(pool)
        .insert(name, "A test product.", Price::from_cents(price_cents), None)
        .await
        .expect("Failed to seed product")
}

/// Register a user through the real registration path.
#[allow(dead_code)]
pub async fn register_user(pool: &SqlitePool, email: &str) -> User {
    AuthService::new(pool)
        .register(email, "a sturdy password", "a sturdy password")
        .await
        .expect("Failed to register test user")
}

/// Demo-mode payment configuration for checkout tests.
#[allow(dead_code)]
pub fn test_payment_config() -> PaymentConfig {
    PaymentConfig {
        seller_id: "1234567".to_owned(),
        demo_mode: true,
        return_url: "http://localhost:3000/checkout/success".to_owned(),
    }
}
