//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CART_API_URL` - Base URL of the Cart Store service
//!   (default: <http://127.0.0.1:3001>)
//! - `PRODUCT_API_URL` - Base URL of the Catalog Gateway
//!   (default: <http://127.0.0.1:3002>)
//! - `TAX_RATE` - Tax rate applied to cart subtotals (default: 0.13)
//! - `SENTRY_DSN` - Sentry error tracking DSN (optional)

use std::net::{IpAddr, SocketAddr};

use kubemart_core::config::{ConfigError, get_env_or_default, parse_env};
use rust_decimal::Decimal;

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the Cart Store service
    pub cart_api_url: String,
    /// Base URL of the Catalog Gateway
    pub product_api_url: String,
    /// Tax rate applied when deriving cart totals
    pub tax_rate: Decimal,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let cart_api_url = get_env_or_default("CART_API_URL", "http://127.0.0.1:3001");
        let product_api_url = get_env_or_default("PRODUCT_API_URL", "http://127.0.0.1:3002");
        let tax_rate = parse_env("TAX_RATE", "0.13")?;
        let sentry_dsn = std::env::var("SENTRY_DSN").ok();

        Ok(Self {
            host,
            port,
            cart_api_url,
            product_api_url,
            tax_rate,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
