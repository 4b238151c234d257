//! CLI subcommands.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::SqlitePool;

/// Default `SQLite` database location, matching the storefront's default.
const DEFAULT_DATABASE_URL: &str = "sqlite:juniper.db";

/// Connect to the storefront database using `DATABASE_URL` or the default.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn connect() -> Result<SqlitePool, sqlx::Error> {
    dotenvy::dotenv().ok();

    let database_url = SecretString::from(
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
    );

    juniper_storefront::db::create_pool(&database_url).await
}
