//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TCO_SELLER_ID` - 2Checkout merchant/seller identifier
//!
//! ## Optional
//! - `DATABASE_URL` - `SQLite` connection string (default: `sqlite:juniper.db`)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL, used for the checkout return link
//!   (default: `http://127.0.0.1:3000`)
//! - `TCO_DEMO_MODE` - "1" sends `demo=Y` test orders (default: "1")
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default `SQLite` database location.
const DEFAULT_DATABASE_URL: &str = "sqlite:juniper.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `SQLite` database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Hosted-payment configuration
    pub payment: PaymentConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Hosted-checkout (2Checkout) configuration.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Merchant/seller identifier (`sid` form field)
    pub seller_id: String,
    /// When true, orders are placed with `demo=Y`
    pub demo_mode: bool,
    /// Absolute URL the payment page redirects back to on completion
    pub return_url: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = SecretString::from(
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
        );

        let host: IpAddr = env_or("STOREFRONT_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| invalid("STOREFRONT_HOST", e))?;

        let port: u16 = env_or("STOREFRONT_PORT", "3000")
            .parse()
            .map_err(|e| invalid("STOREFRONT_PORT", e))?;

        let base_url = env_or("STOREFRONT_BASE_URL", "http://127.0.0.1:3000");
        // Validate early; the return URL is derived from this.
        Url::parse(&base_url).map_err(|e| invalid("STOREFRONT_BASE_URL", e))?;

        let seller_id = std::env::var("TCO_SELLER_ID")
            .map_err(|_| ConfigError::MissingEnvVar("TCO_SELLER_ID".to_owned()))?;

        let demo_mode = env_or("TCO_DEMO_MODE", "1") != "0";

        let return_url = format!("{}/checkout/success", base_url.trim_end_matches('/'));

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            payment: PaymentConfig {
                seller_id,
                demo_mode,
                return_url,
            },
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn invalid(key: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_owned(), err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("TCO_SELLER_ID".to_owned());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: TCO_SELLER_ID"
        );
    }
}
